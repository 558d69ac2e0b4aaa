//! Token types for the QSS lexer.
//!
//! A [`Token`] keeps the exact source text it was lexed from; nothing is
//! normalized at lex time. Numeric conversion happens in the parser.

use super::Span;
use std::fmt;

/// A lexed token: its kind, its verbatim source text, and where it came from.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Create a token without a source location, for tests and synthesized nodes.
    pub fn dummy(kind: TokenKind, text: impl Into<String>) -> Self {
        Token::new(kind, text, Span::DUMMY)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.text, self.span)
    }
}

/// Closed set of lexical categories.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Structural
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Semicolon,
    Comma,

    // Operators
    /// `:`, used both for variable assignment and between property and value.
    Assign,
    Plus,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,

    // Literals
    /// Digits with optional fraction and optional unit suffix: `5`, `1.5`, `20px`.
    Number,
    /// Quoted string (quotes included in the text) or bare word.
    String,
    /// Named colour or `#hex`.
    Color,
    True,
    False,

    /// `$name`, sigil included.
    Identifier,

    // Selectors
    /// `QPushButton`, `*`
    TypeSelector,
    /// `.warning`
    ClassSelector,
    /// `#okButton`
    IdSelector,
    /// `QPushButton[flat="false"]`
    PropertySelector,
    /// `>`
    ChildSelector,
    /// Whitespace between two selectors (descendant combinator).
    GeneralSelector,
    /// Pseudo-state: `:hover`, `QPushButton:pressed`
    ProdoSelector,
    /// Sub-control: `::indicator`, `QCheckBox::indicator`
    SubwidgetSelector,
    /// `%name`
    PlaceholderSelector,
    /// `&`
    ParentReference,

    /// Property name in a declaration (`width` in `width: 5;`).
    Property,

    // Keywords
    Import,
    Extend,
    Mixin,
    Include,
    If,
    Else,
    Default,
    Global,
    Important,

    /// End-of-input sentinel.
    Eof,
}

impl TokenKind {
    /// Whether this kind is part of a selector sequence.
    pub const fn is_selector(self) -> bool {
        matches!(
            self,
            TokenKind::TypeSelector
                | TokenKind::ClassSelector
                | TokenKind::IdSelector
                | TokenKind::PropertySelector
                | TokenKind::ChildSelector
                | TokenKind::GeneralSelector
                | TokenKind::ProdoSelector
                | TokenKind::SubwidgetSelector
                | TokenKind::PlaceholderSelector
                | TokenKind::ParentReference
        )
    }

    /// Selector kinds that name something (everything except combinators).
    ///
    /// Only these may be followed by a descendant-combinator space or a
    /// `>` child combinator.
    pub const fn is_simple_selector(self) -> bool {
        self.is_selector()
            && !matches!(self, TokenKind::ChildSelector | TokenKind::GeneralSelector)
    }

    /// `@`/`!` directive keywords.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Import
                | TokenKind::Extend
                | TokenKind::Mixin
                | TokenKind::Include
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Default
                | TokenKind::Global
                | TokenKind::Important
        )
    }

    /// Kinds that may start a ruleset at statement level.
    pub const fn starts_ruleset(self) -> bool {
        self.is_simple_selector()
    }

    /// Human-readable description used in parse errors.
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Assign => "`:`",
            TokenKind::Plus => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Eq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Number => "a number",
            TokenKind::String => "a string",
            TokenKind::Color => "a colour",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Identifier => "a variable",
            TokenKind::TypeSelector => "a type selector",
            TokenKind::ClassSelector => "a class selector",
            TokenKind::IdSelector => "an id selector",
            TokenKind::PropertySelector => "a property selector",
            TokenKind::ChildSelector => "a child combinator",
            TokenKind::GeneralSelector => "a descendant combinator",
            TokenKind::ProdoSelector => "a pseudo-state selector",
            TokenKind::SubwidgetSelector => "a sub-control selector",
            TokenKind::PlaceholderSelector => "a placeholder selector",
            TokenKind::ParentReference => "`&`",
            TokenKind::Property => "a property name",
            TokenKind::Import => "`@import`",
            TokenKind::Extend => "`@extend`",
            TokenKind::Mixin => "`@mixin`",
            TokenKind::Include => "`@include`",
            TokenKind::If => "`@if`",
            TokenKind::Else => "`@else`",
            TokenKind::Default => "`!default`",
            TokenKind::Global => "`!global`",
            TokenKind::Important => "`!important`",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinators_are_selectors_but_not_simple() {
        assert!(TokenKind::GeneralSelector.is_selector());
        assert!(!TokenKind::GeneralSelector.is_simple_selector());
        assert!(!TokenKind::ChildSelector.starts_ruleset());
        assert!(TokenKind::ParentReference.starts_ruleset());
    }

    #[test]
    fn token_keeps_verbatim_text() {
        let tok = Token::new(TokenKind::Number, "20px", Span::new(3, 7));
        assert!(tok.is(TokenKind::Number));
        assert_eq!(tok.text, "20px");
        assert_eq!(format!("{tok:?}"), "Number(\"20px\") @ 3..7");
    }
}
