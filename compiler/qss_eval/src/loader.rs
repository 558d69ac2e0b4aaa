//! Import loading.
//!
//! The evaluator never touches the filesystem. `@import` asks the host's
//! [`ImportLoader`] for the raw text behind a path.

use rustc_hash::FxHashMap;

/// Host capability: return the source text for an `@import` path.
pub trait ImportLoader {
    fn load(&self, path: &str) -> Result<String, LoadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot find import `{path}`")]
    NotFound { path: String },
    #[error("cannot read import `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// In-memory loader keyed by the exact import path.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }
}

impl ImportLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String, LoadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_owned(),
            })
    }
}
