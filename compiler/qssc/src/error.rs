use std::path::PathBuf;

use qss_diagnostic::{Diagnostic, ErrorCode};
use qss_eval::EvalError;
use qss_ir::Span;
use qss_parse::ParseError;

/// Any failure of a compilation, from reading the entry file to evaluation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CompileError {
    /// `None` for failures outside any source text.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            CompileError::Io { .. } => None,
            CompileError::Parse(err) => Some(err.code()),
            CompileError::Eval(err) => Some(err.code()),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Io { .. } => None,
            CompileError::Parse(err) => Some(err.span()),
            CompileError::Eval(err) => Some(err.span()),
        }
    }

    /// Diagnostic located in the entry file, if the error has a location.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            CompileError::Io { .. } => None,
            CompileError::Parse(err) => Some(err.to_diagnostic()),
            CompileError::Eval(err) => Some(err.to_diagnostic()),
        }
    }
}
