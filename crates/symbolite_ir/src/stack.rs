//! Stack safety for the recursive traversals.
//!
//! Expression trees are walked recursively; a long chain such as a sum
//! folded over thousands of terms nests just as deep. `stacker` grows the
//! stack on demand. WASM manages its own stack, so the guard is a plain
//! call there.

/// Run `f`, growing the stack first if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
