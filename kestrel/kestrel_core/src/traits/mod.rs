//! Core traits that define the Kestrel chain interfaces.
//!
//! - `Invocation`: one end-to-end execution of a chain, able to forward
//!   control to the next link
//! - `Interceptor`: a unit of cross-cutting behavior wrapping the rest of
//!   the chain

pub mod interceptor;
pub mod invocation;

pub use interceptor::Interceptor;
pub use invocation::Invocation;
