//! Diagnostic reporting for the QSS compiler.
//!
//! Phase errors (lexer, parser, evaluator) convert into [`Diagnostic`]s
//! carrying an [`ErrorCode`] and labeled spans. [`TextEmitter`] renders them
//! with line/column context for the host.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use emitter::TextEmitter;
pub use error_code::ErrorCode;
