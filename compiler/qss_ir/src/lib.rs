//! QSS IR - tokens and syntax tree
//!
//! Shared data structures for the QSS compiler phases:
//! - Spans for source locations
//! - `Token` / `TokenKind` produced by the lexer
//! - AST nodes (`StyleSheet`, `Stmt`, `Expr`, ...) produced by the parser
//!
//! Everything here is plain data. The lexer, parser and evaluator live in
//! their own crates and depend on this one.

pub mod ast;
mod span;
mod token;

pub use ast::{
    BinaryOp, Block, Expr, ExprKind, Extend, Identifier, IfStatement, Import, Include, Mixin,
    NumberLiteral, Precedence, Rule, Ruleset, Selector, Stmt, StmtKind, StyleSheet, UnaryOp,
    VarStatement,
};
pub use span::Span;
pub use token::{Token, TokenKind};
