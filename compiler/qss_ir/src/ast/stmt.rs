//! Statement nodes.
//!
//! Nodes are built once by the parser and never mutated afterwards.
//! Mixin definitions are reference-counted so an evaluation environment can
//! keep one alive after the stylesheet that declared it has been dropped
//! (mixins declared by imported files).

use std::rc::Rc;

use super::expr::{Expr, Identifier, Selector};
use crate::{Span, Token};

/// Parse root.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    pub statements: Vec<Stmt>,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Var(VarStatement),
    Ruleset(Ruleset),
    Rule(Rule),
    Mixin(Rc<Mixin>),
    Include(Include),
    Import(Import),
    Extend(Extend),
    If(IfStatement),
    Expression(Expr),
}

/// `$name: <expr> [!default] [!global];`
#[derive(Clone, Debug, PartialEq)]
pub struct VarStatement {
    pub name: Identifier,
    pub value: Expr,
    pub is_global: bool,
    /// Only assign when the name is not bound yet.
    pub is_default: bool,
}

/// Selector header plus body.
///
/// `rules` keeps the declaration-level statements (rules, includes,
/// variables, conditionals, ...) in source order; nested rulesets go to
/// `children`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ruleset {
    pub selectors: Vec<Selector>,
    pub rules: Vec<Stmt>,
    pub children: Vec<Ruleset>,
    pub span: Span,
}

/// `property: value [value ...] [!important];`
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub property: Token,
    /// Space-separated value list; always at least one entry.
    pub value: Vec<Expr>,
    pub important: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mixin {
    pub name: String,
    pub params: Vec<Identifier>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Include {
    pub mixin_name: String,
    pub args: Vec<Expr>,
}

/// `@import "path";`, path stored with the quotes removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub path: String,
}

/// `@extend <selector>;`. Recorded but not applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Extend {
    pub target: Vec<Selector>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub consequence: Block,
    /// `@else { ... }`; an `@else @if` chain is a block holding one `If`.
    pub alternative: Option<Block>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}
