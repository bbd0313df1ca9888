//! Interceptor stacks.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use kestrel_core::{Interceptor, StackId};

/// An ordered, immutable sequence of interceptors.
///
/// A stack is assembled once and then shared (usually behind an `Arc`) by
/// every invocation routed through it. Invocations never mutate or reorder
/// it; each keeps its own position into the sequence.
#[derive(Clone)]
pub struct InterceptorStack {
    id: StackId,
    name: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorStack {
    /// Create a stack from an already-ordered list of interceptors.
    pub fn new(name: impl Into<String>, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self {
            id: StackId::new(),
            name: name.into(),
            interceptors,
        }
    }

    /// Create a stack with no interceptors; invocations go straight to the
    /// terminal operation.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Start building a stack.
    pub fn builder(name: impl Into<String>) -> InterceptorStackBuilder {
        InterceptorStackBuilder {
            name: name.into(),
            interceptors: Vec::new(),
        }
    }

    /// Stack identifier.
    pub fn id(&self) -> StackId {
        self.id
    }

    /// Stack name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns true if the stack has no interceptors.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// The interceptor at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Arc<dyn Interceptor>> {
        self.interceptors.get(index)
    }

    /// Iterate over the interceptors in stack order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Interceptor>> {
        self.interceptors.iter()
    }

    /// Interceptor names in stack order.
    pub fn names(&self) -> Vec<&str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }
}

impl Index<usize> for InterceptorStack {
    type Output = Arc<dyn Interceptor>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.interceptors[index]
    }
}

impl fmt::Debug for InterceptorStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorStack")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("interceptors", &self.names())
            .finish()
    }
}

/// Builder for [`InterceptorStack`].
pub struct InterceptorStackBuilder {
    name: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorStackBuilder {
    /// Append an interceptor.
    pub fn push<I>(mut self, interceptor: I) -> Self
    where
        I: Interceptor + 'static,
    {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Append an interceptor that is already shared with other stacks.
    pub fn push_shared(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Finish the stack.
    pub fn build(self) -> InterceptorStack {
        InterceptorStack::new(self.name, self.interceptors)
    }
}
