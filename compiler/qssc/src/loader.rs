//! Filesystem import resolution.

use std::io;
use std::path::{Path, PathBuf};

use qss_eval::{ImportLoader, LoadError};

/// Resolves `@import` paths against a base directory, then against each
/// include path in order. Paths without an extension get `.qss`.
#[derive(Clone, Debug)]
pub struct FsLoader {
    base: PathBuf,
    include_paths: Vec<PathBuf>,
}

impl FsLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FsLoader {
            base: base.into(),
            include_paths: Vec::new(),
        }
    }

    /// Loader rooted at the directory containing `entry`.
    pub fn for_entry(entry: &Path) -> Self {
        let base = entry
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::new(base)
    }

    #[must_use]
    pub fn with_include_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.include_paths.extend(paths);
        self
    }

    fn search_dirs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.base.as_path()).chain(self.include_paths.iter().map(PathBuf::as_path))
    }
}

impl ImportLoader for FsLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        let relative = with_default_extension(path);
        for dir in self.search_dirs() {
            let candidate = dir.join(&relative);
            match std::fs::read_to_string(&candidate) {
                Ok(source) => {
                    tracing::debug!(import = path, resolved = %candidate.display(), "resolved import");
                    return Ok(source);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(LoadError::Io {
                        path: path.to_owned(),
                        source,
                    })
                }
            }
        }
        Err(LoadError::NotFound {
            path: path.to_owned(),
        })
    }
}

fn with_default_extension(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("qss")
    }
}
