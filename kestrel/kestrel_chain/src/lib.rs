//! # Kestrel Chain
//!
//! This crate implements the Kestrel interceptor chain engine. It runs an
//! ordered stack of interceptors around a terminal business operation,
//! letting each interceptor forward control to the next link or
//! short-circuit the chain with its own outcome.
//!
//! ## Core Components
//!
//! - **Stack**: Immutable, shareable ordered sequence of interceptors
//! - **Invocation**: Per-call context owning the cursor into the stack and
//!   dispatching the terminal operation once the stack is exhausted
//! - **Dispatch**: The lifecycle boundary that creates invocations and
//!   guarantees cleanup on every exit path, plus a bounded audit log
//! - **Interceptors**: Reusable logging, guard and closure interceptors
//! - **Config**: Dispatch settings loaded from TOML
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use kestrel_chain::config::DispatchConfig;
//! use kestrel_chain::dispatch::Dispatcher;
//! use kestrel_chain::interceptors::LoggingInterceptor;
//! use kestrel_chain::stack::InterceptorStack;
//! use kestrel_core::{ActionHandle, BoxError, Outcome, Target};
//!
//! struct Greeter { greeted: u32 }
//!
//! let target = Arc::new(Target::new("greet", |action: &mut Greeter| {
//!     action.greeted += 1;
//!     Ok::<_, BoxError>(Outcome::success())
//! }));
//! let stack = Arc::new(
//!     InterceptorStack::builder("default")
//!         .push(LoggingInterceptor::default())
//!         .build(),
//! );
//!
//! let dispatcher = Dispatcher::new(DispatchConfig::default()).unwrap();
//! let action: ActionHandle = Arc::new(Mutex::new(Greeter { greeted: 0 }));
//!
//! let outcome = dispatcher
//!     .dispatch(target, stack, Some(action), None, None)
//!     .unwrap();
//! assert_eq!(outcome, "success");
//! ```

pub mod config;
pub mod dispatch;
pub mod interceptors;
pub mod invocation;
pub mod stack;

// Re-export commonly used types
pub use config::DispatchConfig;
pub use dispatch::{AuditLog, DispatchRecord, Dispatcher, InvocationScope};
pub use interceptors::{Denial, FnInterceptor, GuardInterceptor, LoggingInterceptor};
pub use invocation::{ActionInvocation, InvocationState};
pub use stack::{InterceptorStack, InterceptorStackBuilder};
