//! Invocation lifecycle management.
//!
//! The [`Dispatcher`] creates one [`crate::invocation::ActionInvocation`]
//! per call, runs it inside an [`InvocationScope`] so that cleanup happens on
//! every exit path, and records the result in an [`AuditLog`].

mod audit;
mod dispatcher;
mod scope;

pub use audit::{AuditLog, DispatchRecord};
pub use dispatcher::Dispatcher;
pub use scope::InvocationScope;
