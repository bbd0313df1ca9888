use std::ops::{Deref, DerefMut};

use crate::invocation::ActionInvocation;

/// Guard that runs [`ActionInvocation::cleanup`] when dropped.
///
/// Holding the invocation through a scope makes cleanup happen on success,
/// on short-circuit, on error and while unwinding from a panic.
///
/// ```
/// use std::sync::Arc;
/// use kestrel_chain::{ActionInvocation, InterceptorStack, InvocationScope, InvocationState};
/// use kestrel_core::{BoxError, Invocation, Outcome, Target};
///
/// let target = Arc::new(Target::stateless("ping", || Ok::<_, BoxError>(Outcome::new("pong"))));
/// let mut invocation = ActionInvocation::new(target, Arc::new(InterceptorStack::empty("none")));
///
/// {
///     let mut scope = InvocationScope::new(&mut invocation);
///     assert_eq!(scope.invoke().unwrap(), "pong");
/// }
/// assert_eq!(invocation.state(), InvocationState::Cleaned);
/// ```
pub struct InvocationScope<'a> {
    invocation: &'a mut ActionInvocation,
}

impl<'a> InvocationScope<'a> {
    /// Take charge of cleaning up `invocation`.
    pub fn new(invocation: &'a mut ActionInvocation) -> Self {
        Self { invocation }
    }
}

impl Deref for InvocationScope<'_> {
    type Target = ActionInvocation;

    fn deref(&self) -> &Self::Target {
        self.invocation
    }
}

impl DerefMut for InvocationScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.invocation
    }
}

impl Drop for InvocationScope<'_> {
    fn drop(&mut self) {
        self.invocation.cleanup();
    }
}
