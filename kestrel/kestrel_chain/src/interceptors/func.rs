use std::fmt;

use kestrel_core::{Interceptor, Invocation, Outcome, Result};

type InterceptFn = Box<dyn Fn(&mut dyn Invocation) -> Result<Outcome> + Send + Sync>;

/// An interceptor backed by a closure.
///
/// ```
/// use kestrel_chain::FnInterceptor;
/// use kestrel_core::Interceptor;
///
/// let upper = FnInterceptor::new("uppercase", |invocation| {
///     let outcome = invocation.invoke()?;
///     Ok(outcome.as_str().to_uppercase().into())
/// });
/// assert_eq!(upper.name(), "uppercase");
/// ```
pub struct FnInterceptor {
    name: String,
    f: InterceptFn,
}

impl FnInterceptor {
    /// Create an interceptor named `name` running `f`.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut dyn Invocation) -> Result<Outcome> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(f),
        }
    }
}

impl Interceptor for FnInterceptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
        (self.f)(invocation)
    }
}

impl fmt::Debug for FnInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInterceptor")
            .field("name", &self.name)
            .finish()
    }
}
