//! Stack growth for recursive walks over grammar source and IR.
//!
//! Grammar expressions nest without limit: `((((x))))` or `!!!!x` can be
//! arbitrarily deep, and the parser, type checker, printer and code
//! generator all recurse once per level. Each of those recursive entry
//! points runs its body through [`ensure_sufficient_stack`], which grows
//! the stack on the heap when it runs low.
//!
//! On `wasm32` the closure is called directly.

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
