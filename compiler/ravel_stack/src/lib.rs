//! Stack growth for deep recursion.
//!
//! Ravel evaluates programs by walking the AST on the host stack, and the
//! explanation renderer walks the justification graph the same way. Both
//! recurse once per nesting level, so a long-running loop or a deeply
//! recursive Ravel function can outgrow the default thread stack.
//!
//! [`ensure_sufficient_stack`] grows the stack on demand so that the
//! evaluator's own call-depth limit (see `ravel_eval::EvalConfig`) is what
//! stops runaway recursion, with a proper error report, rather than a host
//! stack overflow that aborts without one.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Grow the stack when fewer than this many bytes remain (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version: the engine's depth limit is the only guard.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Remaining stack in bytes, when the platform can tell.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

/// Remaining stack in bytes, when the platform can tell.
#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn passes_through_closure_result() {
        assert_eq!(ensure_sufficient_stack(|| "done"), "done");
    }

    #[test]
    fn survives_recursion_past_default_stack() {
        assert_eq!(nest(200_000), 200_000);
    }

    #[test]
    fn remaining_stack_is_reported_on_native() {
        #[cfg(not(target_arch = "wasm32"))]
        assert!(remaining_stack().is_some_and(|bytes| bytes > 0));
    }
}
