//! Syntax tree for QSS stylesheets.
//!
//! - `expr.rs`: expressions, identifiers, selectors
//! - `stmt.rs`: statements and the `StyleSheet` root
//! - `operators.rs`: operator kinds and precedence

mod expr;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind, Identifier, NumberLiteral, Selector};
pub use operators::{BinaryOp, Precedence, UnaryOp};
pub use stmt::{
    Block, Extend, IfStatement, Import, Include, Mixin, Rule, Ruleset, Stmt, StmtKind,
    StyleSheet, VarStatement,
};
