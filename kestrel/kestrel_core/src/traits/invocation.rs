//! Invocation trait definition.

use crate::error::Result;
use crate::id::InvocationId;
use crate::types::{ActionHandle, Handle, Outcome, Target};

/// One end-to-end execution of an interceptor chain.
///
/// Interceptors receive the invocation they are part of and call
/// [`Invocation::invoke`] to hand control to the remainder of the chain.
/// The accessors expose what the invocation carries; none of them are
/// consulted by the chain itself.
pub trait Invocation: Send {
    /// Identifier of this invocation.
    fn id(&self) -> InvocationId;

    /// Forward control to the next interceptor, or to the terminal
    /// operation once every interceptor has been entered.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` - whatever the next link returned.
    /// * `Err(Error::Dispatch)` if the terminal operation could not be
    ///   invoked or failed.
    /// * Any other error exactly as an interceptor further down returned it.
    fn invoke(&mut self) -> Result<Outcome>;

    /// Metadata of the terminal operation.
    fn target(&self) -> &Target;

    /// The action instance the terminal operation runs against.
    fn action(&self) -> Option<&ActionHandle>;

    /// Opaque transport-level request.
    fn request(&self) -> Option<&Handle>;

    /// Opaque transport-level response.
    fn response(&self) -> Option<&Handle>;
}
