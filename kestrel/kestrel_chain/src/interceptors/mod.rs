//! Reusable interceptors.

mod func;
mod guard;
mod logging;

pub use func::FnInterceptor;
pub use guard::{Denial, GuardInterceptor};
pub use logging::LoggingInterceptor;
