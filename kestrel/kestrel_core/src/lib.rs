//! # Kestrel Core
//!
//! `kestrel_core` provides the fundamental building blocks for the Kestrel
//! interceptor chain engine. This includes error types, ID definitions, the
//! capability traits implemented by interceptors and invocations, and the
//! data types that flow through a chain.
//!
//! ## Core Principles
//!
//! 1. **Ordered Interception**: Cross-cutting behaviors (authentication,
//!    logging, validation) wrap a terminal business operation. Each
//!    interceptor either forwards control to the rest of the chain or
//!    short-circuits it with an outcome of its own.
//!
//! 2. **Invocation-Private State**: The position reached in a chain belongs
//!    to a single invocation. Interceptor stacks and targets are immutable and
//!    shared read-only across concurrent invocations.
//!
//! 3. **One Error Kind at the Boundary**: Whatever goes wrong while reaching
//!    or running the terminal operation surfaces as a single `DispatchError`
//!    that keeps the original cause for diagnostics.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Kestrel components
//! - **id**: Strongly-typed identifier types
//! - **traits**: `Interceptor` and `Invocation` capabilities
//! - **types**: Targets, outcomes and opaque handles
//! - **utils**: Logging helpers
//! - **macros**: Convenience macros for logging and error wrapping

pub mod error;
pub mod id;
pub mod macros;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export key types and traits for convenience
pub use error::{
    BoxError, ConfigError, DispatchError, Error, InterceptorError, Result, TargetFault,
};
pub use id::{InvocationId, StackId, TargetId};
pub use traits::{Interceptor, Invocation};
pub use types::{ActionHandle, Handle, Outcome, Target};
pub use utils::LogLevel;

#[doc(hidden)]
pub use log as __log;
