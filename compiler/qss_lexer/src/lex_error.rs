//! Lexer error types.
//!
//! Lexing fails fast: the first error aborts the `next_token()` call that
//! hit it and the lexer does not resume.

use qss_diagnostic::{Diagnostic, ErrorCode};
use qss_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexError {
    /// Unrecognized character, or a `@`/`!` lexeme missing from the keyword table.
    #[error("unknown token `{lexeme}`")]
    TokenUnknown { lexeme: String, span: Span },
    /// Quoted string or bracketed attribute reaching end of input.
    #[error("unterminated {what}")]
    Unterminated { what: &'static str, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::TokenUnknown { span, .. } | LexError::Unterminated { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::TokenUnknown { .. } => ErrorCode::E0001,
            LexError::Unterminated { .. } => ErrorCode::E0002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self {
            LexError::TokenUnknown { .. } => "not valid here",
            LexError::Unterminated { .. } => "starts here",
        };
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(self.span(), label)
    }
}
