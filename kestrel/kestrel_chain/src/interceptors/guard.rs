use std::sync::Arc;

use kestrel_core::{Interceptor, InterceptorError, Invocation, Outcome, Result};
use tracing::debug;

type Predicate = Arc<dyn Fn(&dyn Invocation) -> bool + Send + Sync>;

/// What a guard does when its predicate does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// Short-circuit the chain with this outcome
    Outcome(Outcome),

    /// Fail with `InterceptorError::Rejected` carrying this reason
    Reject(String),
}

/// Forwards when a predicate over the invocation holds, otherwise stops the
/// chain before any later interceptor or the terminal operation runs.
///
/// Typical uses are authentication and input checks:
///
/// ```
/// use kestrel_chain::{Denial, GuardInterceptor};
/// use kestrel_core::Outcome;
///
/// let require_request = GuardInterceptor::new(
///     "require-request",
///     |invocation| invocation.request().is_some(),
///     Denial::Outcome(Outcome::new("login")),
/// );
/// ```
#[derive(Clone)]
pub struct GuardInterceptor {
    name: String,
    predicate: Predicate,
    denial: Denial,
}

impl GuardInterceptor {
    /// Create a guard.
    pub fn new<F>(name: impl Into<String>, predicate: F, denial: Denial) -> Self
    where
        F: Fn(&dyn Invocation) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            denial,
        }
    }

    /// What happens when the predicate fails.
    pub fn denial(&self) -> &Denial {
        &self.denial
    }
}

impl Interceptor for GuardInterceptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
        if (self.predicate)(&*invocation) {
            return invocation.invoke();
        }

        debug!(
            guard = %self.name,
            invocation = %invocation.id(),
            "guard denied invocation"
        );
        match &self.denial {
            Denial::Outcome(outcome) => Ok(outcome.clone()),
            Denial::Reject(reason) => Err(InterceptorError::Rejected {
                interceptor: self.name.clone(),
                reason: reason.clone(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for GuardInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardInterceptor")
            .field("name", &self.name)
            .field("denial", &self.denial)
            .finish()
    }
}
