//! Parse error types.
//!
//! Parsing stops at the first error; there is no recovery and no partial
//! tree. Lexer failures surface through [`ParseError::Lex`] since the
//! parser pulls tokens on demand.

use qss_diagnostic::{Diagnostic, ErrorCode};
use qss_ir::{Span, TokenKind};
use qss_lexer::LexError;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A specific token (or token class) was required.
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },

    /// No prefix handler for the current token.
    #[error("expected expression, found {found}")]
    ExpectedExpression { found: TokenKind, span: Span },

    /// Input ended inside `{ ... }` or `( ... )`. `span` is the opener.
    #[error("unclosed {delimiter}")]
    Unclosed { delimiter: &'static str, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Unexpected { span, .. }
            | ParseError::ExpectedExpression { span, .. }
            | ParseError::Unclosed { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Lex(err) => err.code(),
            ParseError::Unexpected { .. } => ErrorCode::E1001,
            ParseError::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseError::Unclosed { .. } => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::Unexpected { expected, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(self.span(), format!("expected {expected} here")),
            ParseError::ExpectedExpression { .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(self.span(), "not an expression"),
            ParseError::Unclosed { delimiter, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_label(self.span(), format!("{delimiter} opened here"))
                .with_note("input ended before the matching close"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_errors_keep_their_code() {
        let err = ParseError::from(LexError::TokenUnknown {
            lexeme: "~".to_owned(),
            span: Span::new(0, 1),
        });
        assert_eq!(err.code(), ErrorCode::E0001);
        assert_eq!(err.span(), Span::new(0, 1));
        assert_eq!(err.to_string(), "unknown token `~`");
    }

    #[test]
    fn unexpected_message() {
        let err = ParseError::Unexpected {
            expected: "`{`",
            found: TokenKind::Semicolon,
            span: Span::new(4, 5),
        };
        assert_eq!(err.to_string(), "expected `{`, found `;`");
        assert_eq!(err.to_diagnostic().primary_span(), Some(Span::new(4, 5)));
    }
}
