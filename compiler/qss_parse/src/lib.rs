//! Recursive descent parser for QSS.
//!
//! Statements are parsed by recursive descent keyed on the current and
//! next token; expressions use precedence climbing over
//! [`Precedence`](qss_ir::Precedence). The parser pulls tokens from the
//! lexer on demand and keeps a two-token window (`current`, `peek`).
//!
//! The first error aborts the parse. There is no recovery.

mod error;
mod grammar;
mod stack;

pub use error::ParseError;

use qss_ir::{Span, StyleSheet, Token, TokenKind};
use qss_lexer::{Keywords, Lexer};

/// Parser state.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    peek: Token,
    /// Span of the most recently consumed token.
    prev_span: Span,
}

impl<'src> Parser<'src> {
    /// Create a parser, priming the lookahead window from `lexer`.
    pub fn new(mut lexer: Lexer<'src>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            peek,
            prev_span: Span::DUMMY,
        })
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.current.span
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.prev_span
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current.is(TokenKind::Eof)
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    #[inline]
    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let peek = std::mem::replace(&mut self.peek, next);
        let token = std::mem::replace(&mut self.current, peek);
        self.prev_span = token.span;
        Ok(token)
    }

    /// Consume the current token if it is `kind`.
    fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Consume a closing delimiter. Running out of input reports the
    /// unclosed opener at `open` rather than the end of input.
    fn expect_close(
        &mut self,
        kind: TokenKind,
        delimiter: &'static str,
        open: Span,
    ) -> Result<Token, ParseError> {
        if self.is_at_end() {
            return Err(ParseError::Unclosed {
                delimiter,
                span: open,
            });
        }
        self.expect(kind)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            expected,
            found: self.current_kind(),
            span: self.current_span(),
        }
    }
}

/// Parse `source` with the default keyword table.
pub fn parse(source: &str) -> Result<StyleSheet, ParseError> {
    Parser::new(Lexer::new(source))?.parse_program()
}

/// Parse `source` with a host-configured keyword table.
pub fn parse_with_keywords(source: &str, keywords: Keywords) -> Result<StyleSheet, ParseError> {
    Parser::new(Lexer::with_keywords(source, keywords))?.parse_program()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
