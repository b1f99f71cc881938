//! Scoped implicit backend.
//!
//! `with_backend` installs a backend for the current thread while a closure
//! runs; evaluation entry points that take no explicit backend pick it up.
//! Scopes nest, and the previous backend is restored when the closure
//! returns or unwinds.

use std::cell::RefCell;
use std::sync::Arc;

use crate::backend::Backend;

thread_local! {
    static CURRENT: RefCell<Option<Arc<dyn Backend>>> = const { RefCell::new(None) };
}

/// Puts the previous backend back on drop.
struct Restore {
    previous: Option<Arc<dyn Backend>>,
}

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

/// Run `f` with `backend` as the current thread's implicit backend.
pub fn with_backend<R>(backend: Arc<dyn Backend>, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT.with(|current| current.borrow_mut().replace(backend));
    let _restore = Restore { previous };
    f()
}

/// The backend installed by the innermost enclosing `with_backend`.
pub fn current_backend() -> Option<Arc<dyn Backend>> {
    CURRENT.with(|current| current.borrow().clone())
}
