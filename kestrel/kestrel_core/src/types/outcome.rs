//! Outcomes of an invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The result label produced by a terminal operation, or by an interceptor
/// that short-circuits the chain.
///
/// Outcomes are compared verbatim; the engine attaches no meaning to any
/// particular label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(String);

impl Outcome {
    /// Label conventionally used for a successful operation.
    pub const SUCCESS: &'static str = "success";

    /// Label conventionally used when an operation reports a handled error.
    pub const ERROR: &'static str = "error";

    /// Create an outcome with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The conventional success outcome.
    pub fn success() -> Self {
        Self::new(Self::SUCCESS)
    }

    /// The conventional error outcome.
    pub fn error() -> Self {
        Self::new(Self::ERROR)
    }

    /// The outcome label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the outcome, returning its label.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Outcome {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Outcome {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl PartialEq<str> for Outcome {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Outcome {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
