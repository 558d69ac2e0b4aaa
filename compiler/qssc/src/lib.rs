//! QSS compiler driver.
//!
//! Wires the phases together (lex, parse, evaluate) and supplies the
//! pieces the core crates leave to the host: a filesystem [`FsLoader`] for
//! `@import`, [`CompileOptions`], and tracing setup for the binary.

pub mod commands;
mod error;
mod loader;
mod options;

use std::path::Path;
use std::sync::Once;

pub use error::CompileError;
pub use loader::FsLoader;
pub use options::CompileOptions;

use qss_eval::{Evaluator, ImportLoader};

/// Compile `source` to flat style sheet text, resolving imports through
/// `loader`.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile(
    source: &str,
    options: &CompileOptions,
    loader: &dyn ImportLoader,
) -> Result<String, CompileError> {
    let keywords = options.keywords();
    let sheet = qss_parse::parse_with_keywords(source, keywords.clone())?;
    tracing::debug!(statements = sheet.statements.len(), "parsed");
    let output = Evaluator::new(loader)
        .with_keywords(keywords)
        .evaluate_program(&sheet)?;
    Ok(output)
}

/// Read and compile the file at `path`. Imports resolve next to it first,
/// then in each of `options.include_paths`.
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<String, CompileError> {
    let source = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loader = FsLoader::for_entry(path).with_include_paths(options.include_paths.clone());
    compile(&source, options, &loader)
}

static TRACING_INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. With `QSSC_LOG_TREE` also set,
/// spans render as an indented tree instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        let registry = tracing_subscriber::registry().with(filter);
        if std::env::var("QSSC_LOG_TREE").is_ok() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
