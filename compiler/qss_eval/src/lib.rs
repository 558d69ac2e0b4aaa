//! Evaluator for QSS.
//!
//! Turns a parsed [`StyleSheet`](qss_ir::StyleSheet) into flat Qt style
//! sheet text:
//! - variables live in lexically nested scopes over a shared global scope
//! - mixins expand in the scope they were declared in
//! - nested rulesets are flattened, `&` standing for the parent selector
//! - `@import` goes through a host-supplied [`ImportLoader`]

mod environment;
mod errors;
mod evaluator;
mod loader;
mod operators;
mod selector;
mod stack;
mod value;

pub use environment::{Environment, LocalScope, MixinBinding, Scope, WeakScope};
pub use errors::EvalError;
pub use evaluator::Evaluator;
pub use loader::{ImportLoader, LoadError, MemoryLoader};
pub use value::Value;
