//! Evaluation errors.
//!
//! Evaluation is all-or-nothing: the first error aborts the whole program
//! and no partial output is returned. Every variant carries a span in the
//! source text of the file being compiled. Failures inside an imported
//! file are wrapped so their span points at the `@import` statement.

use qss_diagnostic::{Diagnostic, ErrorCode};
use qss_ir::Span;
use qss_parse::ParseError;

use crate::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },

    #[error("undefined mixin `{name}`")]
    UndefinedMixin { name: String, span: Span },

    #[error("mixin `{name}` takes {expected} argument(s) but {got} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },

    #[error("cannot apply `{op}` to {operands}")]
    TypeMismatch {
        op: &'static str,
        operands: String,
        span: Span,
    },

    #[error("division by zero")]
    DivisionByZero { span: Span },

    #[error("`&` used outside a ruleset")]
    ParentReferenceOutsideRuleset { span: Span },

    #[error("declaration outside a ruleset")]
    DeclarationOutsideRuleset { span: Span },

    #[error("import cycle through `{path}`")]
    ImportCycle { path: String, span: Span },

    #[error("{source}")]
    Load {
        #[source]
        source: LoadError,
        span: Span,
    },

    #[error("syntax error in `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParseError,
        span: Span,
    },

    #[error("in `{path}`: {source}")]
    InImport {
        path: String,
        #[source]
        source: Box<EvalError>,
        span: Span,
    },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::UndefinedVariable { span, .. }
            | EvalError::UndefinedMixin { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::TypeMismatch { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::ParentReferenceOutsideRuleset { span }
            | EvalError::DeclarationOutsideRuleset { span }
            | EvalError::ImportCycle { span, .. }
            | EvalError::Load { span, .. }
            | EvalError::Parse { span, .. }
            | EvalError::InImport { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EvalError::UndefinedVariable { .. } => ErrorCode::E2001,
            EvalError::UndefinedMixin { .. } => ErrorCode::E2002,
            EvalError::ArityMismatch { .. } => ErrorCode::E2003,
            EvalError::TypeMismatch { .. } => ErrorCode::E2004,
            EvalError::DivisionByZero { .. } => ErrorCode::E2005,
            EvalError::ParentReferenceOutsideRuleset { .. } => ErrorCode::E2006,
            EvalError::DeclarationOutsideRuleset { .. } => ErrorCode::E2007,
            EvalError::ImportCycle { .. } => ErrorCode::E3002,
            EvalError::Load { .. } => ErrorCode::E3001,
            EvalError::Parse { source, .. } => source.code(),
            EvalError::InImport { source, .. } => source.code(),
        }
    }

    /// Innermost error, looking through import wrappers.
    pub fn root_cause(&self) -> &EvalError {
        match self {
            EvalError::InImport { source, .. } => source.root_cause(),
            other => other,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EvalError::UndefinedVariable { .. } => "not defined in this scope",
            EvalError::UndefinedMixin { .. } => "no mixin with this name is visible here",
            EvalError::ArityMismatch { .. } => "too few arguments",
            EvalError::TypeMismatch { .. } => "incompatible operands",
            EvalError::DivisionByZero { .. } => "divisor evaluates to zero",
            EvalError::ParentReferenceOutsideRuleset { .. } => "no enclosing selector",
            EvalError::DeclarationOutsideRuleset { .. } => "declared here",
            EvalError::ImportCycle { .. } => "imported again here",
            EvalError::Load { .. } | EvalError::Parse { .. } => "imported here",
            EvalError::InImport { .. } => "error raised inside this import",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), self.label());
        if let EvalError::ArityMismatch { expected, got, .. } = self.root_cause() {
            diag = diag.with_note(format!("expected at least {expected}, found {got}"));
        }
        diag
    }
}
