//! Opaque handles carried through a chain.
//!
//! The engine stores and hands these out without looking inside. Only
//! interceptors and terminal operations that know the concrete type
//! downcast them.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Shared, lockable reference to the action instance an invocation runs
/// against.
///
/// An interceptor that locks the action must drop the guard before it
/// forwards with `invoke()`. The terminal operation never waits for the
/// lock; finding it held is reported as `TargetFault::AccessFailure`.
///
/// Built from any `Arc<Mutex<T>>` by unsized coercion:
///
/// ```
/// use kestrel_core::ActionHandle;
/// use std::sync::{Arc, Mutex};
///
/// struct LoginAction { user: String }
///
/// let action: ActionHandle = Arc::new(Mutex::new(LoginAction { user: "ada".into() }));
/// let guard = action.lock().unwrap();
/// assert!(guard.downcast_ref::<LoginAction>().is_some());
/// ```
pub type ActionHandle = Arc<Mutex<dyn Any + Send>>;

/// Opaque, cheaply clonable handle for a transport-level request or
/// response object.
#[derive(Clone)]
pub struct Handle {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Handle {
    /// Wrap a value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the wrapped value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Check whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Name of the wrapped type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether two handles wrap the same underlying object.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("type_name", &self.type_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Request {
        path: String,
    }

    #[test]
    fn test_handle_downcast() {
        let handle = Handle::new(Request {
            path: "/login".into(),
        });
        assert!(handle.is::<Request>());
        assert_eq!(handle.downcast_ref::<Request>().unwrap().path, "/login");
        assert!(handle.downcast_ref::<String>().is_none());
        assert!(handle.type_name().ends_with("Request"));
    }

    #[test]
    fn test_handle_clone_shares_object() {
        let handle = Handle::new(7u32);
        let copy = handle.clone();
        assert!(handle.ptr_eq(&copy));
        assert!(!handle.ptr_eq(&Handle::new(7u32)));
    }
}
