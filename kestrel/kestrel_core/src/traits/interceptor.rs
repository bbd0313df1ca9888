//! Interceptor trait definition.

use crate::error::Result;
use crate::traits::Invocation;
use crate::types::Outcome;

/// A unit of cross-cutting behavior wrapping the remainder of a chain.
///
/// An interceptor may:
///
/// - call `invocation.invoke()` once and return its result, verbatim or
///   transformed (pass-through), or
/// - return an outcome of its own without calling `invoke()`
///   (short-circuit). No later interceptor and no terminal operation runs
///   for that invocation.
///
/// Interceptors are shared across concurrent invocations and must keep any
/// internal state thread-safe.
///
/// # Examples
///
/// ```
/// use kestrel_core::{Interceptor, Invocation, Outcome, Result};
///
/// struct RequireRequest;
///
/// impl Interceptor for RequireRequest {
///     fn name(&self) -> &str {
///         "require-request"
///     }
///
///     fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome> {
///         if invocation.request().is_none() {
///             return Ok(Outcome::new("bad_request"));
///         }
///         invocation.invoke()
///     }
/// }
/// ```
pub trait Interceptor: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Wrap the rest of the chain.
    fn intercept(&self, invocation: &mut dyn Invocation) -> Result<Outcome>;
}
