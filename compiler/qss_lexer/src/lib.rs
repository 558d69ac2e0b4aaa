//! QSS lexer.
//!
//! Turns style-sheet source into a stream of [`Token`](qss_ir::Token)s.
//! The lexer is pull-based: the parser asks for one token at a time with
//! [`Lexer::next_token`], and [`Lexer::tokenize`] collects the whole
//! stream for tools and tests.
//!
//! Whitespace and `//`/`/* */` comments are dropped, except whitespace
//! between two selectors, which is the descendant combinator and comes
//! out as a `GeneralSelector` token.

mod cursor;
mod keywords;
mod lex_error;
mod lexer;

pub use keywords::{is_color_name, Keywords};
pub use lex_error::LexError;
pub use lexer::Lexer;

/// Lex `source` with the default keyword table.
pub fn tokenize(source: &str) -> Result<Vec<qss_ir::Token>, LexError> {
    Lexer::new(source).tokenize()
}
