//! Per-call invocation context.
//!
//! An [`ActionInvocation`] bundles everything one call through a chain
//! needs: the target, the action instance, the opaque request and response
//! handles, the shared interceptor stack, and a cursor that only this
//! invocation can see.

mod action;
mod cursor;

pub use action::ActionInvocation;
pub use cursor::InvocationState;
