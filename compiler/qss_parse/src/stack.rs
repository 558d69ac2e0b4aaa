//! Stack safety for recursive parsing.
//!
//! Nested rulesets, blocks and parenthesized expressions all recurse, so
//! pathological input could otherwise overflow the native stack.

const RED_ZONE: usize = 100 * 1024; // 100KB
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Run `f`, growing the stack first if fewer than `RED_ZONE` bytes remain.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
