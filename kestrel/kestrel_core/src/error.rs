//! Error types for the Kestrel interceptor chain engine.
//!
//! The root error type, `Error`, wraps the subsystem-specific errors so
//! callers of a chain can match on one type at the top level.
//!
//! Only failures that happen while reaching or running the terminal
//! operation are normalized (into `DispatchError`). Errors produced by an
//! interceptor's own logic travel up the chain exactly as the interceptor
//! returned them.

use thiserror::Error;

/// Boxed error used to carry arbitrary causes across the chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Root error type for the Kestrel system.
#[derive(Debug, Error)]
pub enum Error {
    /// The terminal operation could not be invoked or failed while running
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Failure raised by an interceptor's own logic
    #[error("Interceptor error: {0}")]
    Interceptor(#[from] InterceptorError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the dispatch error if this is a terminal dispatch failure.
    pub fn as_dispatch(&self) -> Option<&DispatchError> {
        match self {
            Self::Dispatch(e) => Some(e),
            _ => None,
        }
    }
}

/// The single error kind raised when the terminal operation fails.
///
/// Every underlying failure category ends up here, with the original
/// category and cause available through `cause()` and `source()`.
#[derive(Debug, Error)]
#[error("Invocation of target '{target}' failed: {cause}")]
pub struct DispatchError {
    /// Name of the target whose terminal operation failed
    pub target: String,

    /// The underlying failure
    #[source]
    pub cause: TargetFault,
}

impl DispatchError {
    /// Wrap a target fault for the named target.
    pub fn new(target: impl Into<String>, cause: TargetFault) -> Self {
        Self {
            target: target.into(),
            cause,
        }
    }

    /// The underlying failure category.
    pub fn cause(&self) -> &TargetFault {
        &self.cause
    }
}

/// Failure categories of the terminal dispatch.
#[derive(Debug, Error)]
pub enum TargetFault {
    /// The action instance was missing or of the wrong type
    #[error("Illegal argument to target: expected {expected}, {reason}")]
    InvalidArgument {
        /// Type the target was built for
        expected: String,

        /// What was wrong with the supplied argument
        reason: String,
    },

    /// The action instance could not be reached
    #[error("Illegal access to target: {0}")]
    AccessFailure(String),

    /// The terminal operation itself failed
    #[error("Target raised an error: {0}")]
    Raised(#[source] BoxError),
}

impl TargetFault {
    /// Wrap any error raised by the terminal operation.
    pub fn raised<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Raised(error.into())
    }
}

/// Errors raised by interceptors.
#[derive(Debug, Error)]
pub enum InterceptorError {
    /// The interceptor refused to let the invocation proceed
    #[error("Rejected by {interceptor}: {reason}")]
    Rejected {
        /// Interceptor name
        interceptor: String,

        /// Reason for the rejection
        reason: String,
    },

    /// The interceptor failed while doing its own work
    #[error("{interceptor} failed: {source}")]
    Failed {
        /// Interceptor name
        interceptor: String,

        /// Underlying error
        #[source]
        source: BoxError,
    },
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration could not be read
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    /// Configuration could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type used throughout the Kestrel system.
pub type Result<T> = std::result::Result<T, Error>;
