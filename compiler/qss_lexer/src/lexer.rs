//! On-demand lexer.
//!
//! The grammar is not context-free at the token level: `QLabel`, `color`
//! and `red` are all plain words, and a space may or may not be a
//! descendant combinator. The lexer resolves this with two pieces of
//! context:
//!
//! - the kind of the previous token, and
//! - a forward scan deciding whether the text up to the next `{` consists
//!   solely of selector characters (see [`selector_context_ahead`]).
//!
//! A word is a selector when both say so, a property when a `:` follows
//! it, and a value otherwise.

use qss_ir::{Span, Token, TokenKind};
use tracing::trace;

use crate::cursor::Cursor;
use crate::keywords::{is_color_name, Keywords};
use crate::LexError;

/// Streaming lexer; call [`next_token`](Lexer::next_token) until it returns
/// [`TokenKind::Eof`]. Further calls keep returning `Eof`.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    keywords: Keywords,
    prev: Option<TokenKind>,
    /// End offset of the previous token. Equal to the cursor position when
    /// nothing separates the previous token from the next one.
    prev_end: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_keywords(source, Keywords::new())
    }

    pub fn with_keywords(source: &'src str, keywords: Keywords) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            keywords,
            prev: None,
            prev_end: 0,
            done: false,
        }
    }

    /// True once only whitespace and comments remain.
    pub fn is_end(&self) -> bool {
        if self.done {
            return true;
        }
        let mut lookahead = self.cursor;
        skip_trivia(&mut lookahead);
        lookahead.is_eof()
    }

    /// Lex the whole input, `Eof` included.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let at_end = token.is(TokenKind::Eof);
            tokens.push(token);
            if at_end {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.scan()?;
        trace!(kind = ?token.kind, text = %token.text, span = %token.span, "token");
        self.prev = Some(token.kind);
        self.prev_end = self.cursor.pos();
        if token.is(TokenKind::Eof) {
            self.done = true;
        }
        Ok(token)
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        if let Some(combinator) = self.descendant_combinator() {
            return Ok(combinator);
        }

        skip_trivia(&mut self.cursor);
        let start = self.cursor.pos();
        if self.cursor.is_eof() {
            return Ok(Token::new(TokenKind::Eof, "", Span::from_range(start..start)));
        }

        let peek = self.cursor.peek();
        match self.cursor.current() {
            b'{' => Ok(self.single(TokenKind::LeftBrace)),
            b'}' => Ok(self.single(TokenKind::RightBrace)),
            b'(' => Ok(self.single(TokenKind::LeftParen)),
            b')' => Ok(self.single(TokenKind::RightParen)),
            b';' => Ok(self.single(TokenKind::Semicolon)),
            b',' => Ok(self.single(TokenKind::Comma)),
            b'+' => Ok(self.single(TokenKind::Plus)),
            b'-' => Ok(self.minus()),
            b'/' => Ok(self.single(TokenKind::Div)),
            b'<' => Ok(self.single(TokenKind::Lt)),
            b'&' => Ok(self.single(TokenKind::ParentReference)),
            b'=' if peek == b'=' => Ok(self.double(TokenKind::Eq)),
            b'!' if peek == b'=' => Ok(self.double(TokenKind::NotEq)),
            b'@' | b'!' => self.keyword(),
            b'>' => {
                let kind = if self.prev_is_simple_selector() {
                    TokenKind::ChildSelector
                } else {
                    TokenKind::Gt
                };
                Ok(self.single(kind))
            }
            b':' => {
                let attached = self.prev_is_simple_selector() && self.prev_end == start;
                if attached && starts_pseudo(peek, self.cursor.peek2()) {
                    self.selector_word()
                } else {
                    Ok(self.single(TokenKind::Assign))
                }
            }
            b'*' => {
                if self.selector_may_start() && selector_context_ahead(self.cursor.rest()) {
                    self.selector_word()
                } else {
                    Ok(self.single(TokenKind::Mul))
                }
            }
            b'$' => self.identifier(),
            quote @ (b'"' | b'\'') => self.string(quote),
            b'0'..=b'9' => Ok(self.number()),
            b'#' => self.hash(),
            b'.' | b'%' if is_name_start(peek) => self.selector_word(),
            c if is_name_start(c) => self.word(),
            _ => Err(self.unknown()),
        }
    }

    /// Whitespace or comments between two simple selectors become one
    /// `GeneralSelector` token carrying the exact source run.
    fn descendant_combinator(&mut self) -> Option<Token> {
        let (current, next) = (self.cursor.current(), self.cursor.peek());
        if !self.prev_is_simple_selector() || !starts_trivia(current, next) {
            return None;
        }
        let mut lookahead = self.cursor;
        skip_trivia(&mut lookahead);
        if !starts_selector(lookahead.current()) || !selector_context_ahead(lookahead.rest()) {
            return None;
        }
        let start = self.cursor.pos();
        self.cursor = lookahead;
        Some(self.token_from(TokenKind::GeneralSelector, start))
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.cursor.pos();
        self.cursor.advance();
        self.token_from(kind, start)
    }

    fn double(&mut self, kind: TokenKind) -> Token {
        let start = self.cursor.pos();
        self.cursor.advance_by(2);
        self.token_from(kind, start)
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            self.cursor.slice_from(start),
            Span::from_range(start..self.cursor.pos()),
        )
    }

    fn unknown(&self) -> LexError {
        let start = self.cursor.pos();
        let ch = self.cursor.current_char().unwrap_or('\0');
        LexError::TokenUnknown {
            lexeme: ch.to_string(),
            span: Span::from_range(start..start + ch.len_utf8()),
        }
    }

    fn prev_is_simple_selector(&self) -> bool {
        self.prev.is_some_and(TokenKind::is_simple_selector)
    }

    /// Whether the previous token can be followed by the start of a selector.
    fn selector_may_start(&self) -> bool {
        matches!(
            self.prev,
            None | Some(
                TokenKind::Semicolon
                    | TokenKind::LeftBrace
                    | TokenKind::RightBrace
                    | TokenKind::Comma
                    | TokenKind::GeneralSelector
                    | TokenKind::ChildSelector
            )
        )
    }

    /// `-name:` at the start of a declaration is a vendor property such as
    /// `-qt-background-role`; any other `-` is subtraction.
    fn minus(&mut self) -> Token {
        let start = self.cursor.pos();
        let declaration_start = matches!(
            self.prev,
            None | Some(TokenKind::Semicolon | TokenKind::LeftBrace | TokenKind::RightBrace)
        );
        let mut lookahead = self.cursor;
        lookahead.advance();
        if lookahead.current() == b'-' {
            lookahead.advance();
        }
        if declaration_start && is_name_start(lookahead.current()) {
            lookahead.eat_while(is_name_char);
            if property_follows(lookahead) {
                self.cursor = lookahead;
                return self.token_from(TokenKind::Property, start);
            }
        }
        self.single(TokenKind::Sub)
    }

    /// `@name` / `!name`, looked up in the keyword table.
    fn keyword(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        self.cursor
            .eat_while(|b| b.is_ascii_alphabetic() || b == b'-' || b == b'_');
        let lexeme = self.cursor.slice_from(start);
        match self.keywords.lookup(lexeme) {
            Some(kind) => Ok(self.token_from(kind, start)),
            None => Err(LexError::TokenUnknown {
                lexeme: lexeme.to_owned(),
                span: Span::from_range(start..self.cursor.pos()),
            }),
        }
    }

    /// `$name`; a `-` continues the name only when a letter follows it, so
    /// `$main-color` is one identifier and `$a-5` is a subtraction.
    fn identifier(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        if !is_name_start(self.cursor.current()) {
            return Err(LexError::TokenUnknown {
                lexeme: "$".to_owned(),
                span: Span::from_range(start..start + 1),
            });
        }
        loop {
            let b = self.cursor.current();
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.cursor.advance();
            } else if b == b'-' && self.cursor.peek().is_ascii_alphabetic() {
                self.cursor.advance();
            } else {
                break;
            }
        }
        Ok(self.token_from(TokenKind::Identifier, start))
    }

    /// Quoted string; the token text keeps the quotes.
    fn string(&mut self, quote: u8) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::Unterminated {
                    what: "string",
                    span: Span::from_range(start..self.cursor.pos()),
                });
            }
            match self.cursor.current() {
                b'\\' => self.cursor.advance_by(2),
                b if b == quote => {
                    self.cursor.advance();
                    return Ok(self.token_from(TokenKind::String, start));
                }
                _ => self.cursor.advance(),
            }
        }
    }

    /// Digits, an optional `.digits` fraction, then an optional unit
    /// (`px`, `em`, `%`, ...). No exponent form.
    fn number(&mut self) -> Token {
        let start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        if self.cursor.current() == b'%' {
            self.cursor.advance();
        } else {
            self.cursor.eat_while(|b| b.is_ascii_alphabetic());
        }
        self.token_from(TokenKind::Number, start)
    }

    /// `#` starts an id selector in selector context, a hex colour otherwise.
    fn hash(&mut self) -> Result<Token, LexError> {
        if self.selector_may_start() && selector_context_ahead(self.cursor.rest()) {
            return self.selector_word();
        }
        let start = self.cursor.pos();
        let mut lookahead = self.cursor;
        lookahead.advance();
        lookahead.eat_while(|b| b.is_ascii_hexdigit());
        let digits = lookahead.pos() - start - 1;
        if matches!(digits, 3 | 4 | 6 | 8) && !is_name_char(lookahead.current()) {
            self.cursor = lookahead;
            return Ok(self.token_from(TokenKind::Color, start));
        }
        if is_name_start(self.cursor.peek()) {
            return self.selector_word();
        }
        Err(self.unknown())
    }

    /// A word starting with a letter or `_`.
    fn word(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        let mut lookahead = self.cursor;
        lookahead.eat_while(is_name_char);
        let text = lookahead.slice_from(start);

        let literal = match text {
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            _ => None,
        };
        if let Some(kind) = literal {
            self.cursor = lookahead;
            return Ok(self.token_from(kind, start));
        }

        if self.selector_may_start() && selector_context_ahead(self.cursor.rest()) {
            return self.selector_word();
        }

        self.cursor = lookahead;
        let kind = if property_follows(lookahead) {
            TokenKind::Property
        } else if is_color_name(text) {
            TokenKind::Color
        } else {
            TokenKind::String
        };
        Ok(self.token_from(kind, start))
    }

    /// One compound selector: optional `.`/`#`/`%` prefix or `*`, a name,
    /// then any number of `[attr]`, `:state`, `::sub-control`, `.class`
    /// and `#id` parts.
    fn selector_word(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.pos();
        let first = self.cursor.current();
        let mut has_attribute = false;
        let mut has_pseudo = false;
        let mut has_subcontrol = false;

        if matches!(first, b'.' | b'#' | b'%' | b'*') {
            self.cursor.advance();
        }
        self.cursor.eat_while(is_name_char);

        loop {
            let peek = self.cursor.peek();
            match self.cursor.current() {
                b'[' => {
                    self.attribute()?;
                    has_attribute = true;
                }
                b':' if peek == b':' && is_name_start(self.cursor.peek2()) => {
                    self.cursor.advance_by(2);
                    self.cursor.eat_while(is_name_char);
                    has_subcontrol = true;
                }
                b':' if is_name_start(peek) || peek == b'!' => {
                    self.cursor.advance();
                    if self.cursor.current() == b'!' {
                        self.cursor.advance();
                    }
                    self.cursor.eat_while(is_name_char);
                    has_pseudo = true;
                }
                b'.' | b'#' if is_name_start(peek) => {
                    self.cursor.advance();
                    self.cursor.eat_while(is_name_char);
                }
                _ => break,
            }
        }

        let kind = if has_subcontrol {
            TokenKind::SubwidgetSelector
        } else if has_pseudo {
            TokenKind::ProdoSelector
        } else if has_attribute {
            TokenKind::PropertySelector
        } else {
            match first {
                b'.' => TokenKind::ClassSelector,
                b'#' => TokenKind::IdSelector,
                b'%' => TokenKind::PlaceholderSelector,
                _ => TokenKind::TypeSelector,
            }
        };
        Ok(self.token_from(kind, start))
    }

    /// `[name="value"]`, quotes respected; the cursor is on `[`.
    fn attribute(&mut self) -> Result<(), LexError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        let mut quote = None;
        loop {
            if self.cursor.is_eof() {
                return Err(LexError::Unterminated {
                    what: "attribute selector",
                    span: Span::from_range(start..self.cursor.pos()),
                });
            }
            let b = self.cursor.current();
            self.cursor.advance();
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b']' => return Ok(()),
                None => {}
            }
        }
    }
}

/// Whether the text up to the next `{` is made only of selector characters
/// and is not cut short by `;` or `}`. Comments count as whitespace.
///
/// Quoted values are only allowed inside `[...]`; a `{` inside an
/// unquoted attribute value makes the scan fail.
pub(crate) fn selector_context_ahead(rest: &str) -> bool {
    let mut cursor = Cursor::new(rest);
    let mut bracket_depth = 0u32;
    let mut quote: Option<u8> = None;
    while !cursor.is_eof() {
        let b = cursor.current();
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            cursor.advance();
            continue;
        }
        match (b, cursor.peek()) {
            (b'/', b'/') if bracket_depth == 0 => {
                cursor.skip_line();
                continue;
            }
            (b'/', b'*') if bracket_depth == 0 => {
                cursor.skip_block_comment();
                continue;
            }
            (b'{', _) => return bracket_depth == 0,
            (b';' | b'}', _) => return false,
            (b'[', _) => bracket_depth += 1,
            (b']', _) => bracket_depth = bracket_depth.saturating_sub(1),
            (b'"' | b'\'', _) if bracket_depth > 0 => quote = Some(b),
            (b, _) if is_selector_symbol(b) => {}
            _ => return false,
        }
        cursor.advance();
    }
    false
}

fn skip_trivia(cursor: &mut Cursor<'_>) {
    loop {
        cursor.eat_while(is_whitespace);
        match (cursor.current(), cursor.peek()) {
            (b'/', b'/') => cursor.skip_line(),
            (b'/', b'*') => cursor.skip_block_comment(),
            _ => return,
        }
    }
}

#[inline]
fn starts_trivia(b: u8, next: u8) -> bool {
    is_whitespace(b) || (b == b'/' && matches!(next, b'/' | b'*'))
}

/// After a word: optional horizontal space, then a single `:`.
fn property_follows(mut lookahead: Cursor<'_>) -> bool {
    lookahead.eat_while(|b| b == b' ' || b == b'\t');
    lookahead.current() == b':' && lookahead.peek() != b':'
}

fn starts_pseudo(next: u8, after: u8) -> bool {
    is_name_start(next) || next == b'!' || (next == b':' && is_name_start(after))
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[inline]
fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[inline]
fn starts_selector(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'.' | b'#' | b'*' | b'%' | b'&')
}

#[inline]
fn is_selector_symbol(b: u8) -> bool {
    is_name_char(b)
        || is_whitespace(b)
        || matches!(
            b,
            b'.' | b'#' | b'*' | b'>' | b'[' | b']' | b'=' | b':' | b'!' | b'&' | b',' | b'%'
        )
}

#[cfg(test)]
mod tests;
