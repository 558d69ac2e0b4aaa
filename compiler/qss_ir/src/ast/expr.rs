//! Expression nodes.

use super::operators::{BinaryOp, UnaryOp};
use crate::{Span, Token};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Variable reference: `$width`
    Identifier(Identifier),
    /// `5`, `1.5`, `20px`
    Number(NumberLiteral),
    /// Quoted string (quotes kept) or bare word.
    String(String),
    /// Named colour or `#hex`.
    Color(String),
    Bool(bool),
    Prefix {
        op: UnaryOp,
        right: Box<Expr>,
    },
    Infix {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Selector(Selector),
}

/// A `$`-prefixed name. The sigil is part of `name`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier {
            name: name.into(),
            span,
        }
    }
}

/// Numeric literal with its optional unit suffix.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub unit: Option<String>,
}

/// One selector token in a ruleset header or `@extend` target.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector {
    pub token: Token,
}

impl Selector {
    pub fn new(token: Token) -> Self {
        Selector { token }
    }
}
