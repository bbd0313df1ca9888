//! Data types that flow through an interceptor chain.

pub mod handle;
pub mod outcome;
pub mod target;

pub use handle::{ActionHandle, Handle};
pub use outcome::Outcome;
pub use target::{Target, TerminalFn};
