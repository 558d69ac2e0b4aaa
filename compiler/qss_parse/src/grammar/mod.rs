//! Grammar productions.
//!
//! - `stmt.rs`: statement dispatch, rulesets, directives, blocks
//! - `expr.rs`: precedence climbing and literals

mod expr;
mod stmt;
