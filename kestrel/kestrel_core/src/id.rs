//! Strongly-typed identifiers for Kestrel.
//!
//! Each identifier type is a thin wrapper around a UUID with a phantom type
//! parameter, so an `InvocationId` can never be passed where a `TargetId`
//! is expected.
//!
//! # Examples
//!
//! ```
//! use kestrel_core::id::{InvocationId, TargetId};
//! use std::str::FromStr;
//!
//! let invocation_id = InvocationId::new();
//! let target_id = TargetId::new();
//! assert_ne!(invocation_id.to_string(), target_id.to_string());
//!
//! let id_str = "550e8400-e29b-41d4-a716-446655440000";
//! let target_id = TargetId::from_str(id_str).unwrap();
//! assert_eq!(target_id.to_string(), id_str);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// The phantom parameter `T` tells identifiers of different entities apart
/// at compile time while they share one representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier from a v4 UUID.
    ///
    /// # Examples
    ///
    /// ```
    /// use kestrel_core::InvocationId;
    ///
    /// let first = InvocationId::new();
    /// let second = InvocationId::new();
    /// assert_ne!(first, second);
    /// ```
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an identifier from a specific UUID, for instance one read
    /// back from an audit export.
    ///
    /// # Examples
    ///
    /// ```
    /// use kestrel_core::TargetId;
    /// use uuid::Uuid;
    ///
    /// let uuid = Uuid::new_v4();
    /// let id = TargetId::from_uuid(uuid);
    /// assert_eq!(id.uuid(), uuid);
    /// ```
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Create a nil (all zeros) identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use kestrel_core::StackId;
    ///
    /// let nil = StackId::nil();
    /// assert!(nil.is_nil());
    /// assert_eq!(nil.to_string(), "00000000-0000-0000-0000-000000000000");
    /// ```
    pub fn nil() -> Self {
        Self::from_uuid(Uuid::nil())
    }

    /// Check if this is a nil identifier.
    pub fn is_nil(&self) -> bool {
        self.uuid.is_nil()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker type for invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationMarker;
/// Identifier for a single end-to-end execution of a chain.
pub type InvocationId = Id<InvocationMarker>;

/// Marker type for targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetMarker;
/// Identifier for a terminal operation.
pub type TargetId = Id<TargetMarker>;

/// Marker type for interceptor stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StackMarker;
/// Identifier for an interceptor stack.
pub type StackId = Id<StackMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_new() {
        let id1 = InvocationId::new();
        let id2 = InvocationId::new();
        assert_ne!(id1, id2, "Generated IDs should be unique");
    }

    #[test]
    fn test_id_from_str() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = TargetId::from_str(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
        assert!(TargetId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_nil() {
        let nil_id = StackId::nil();
        assert_eq!(nil_id.to_string(), "00000000-0000-0000-0000-000000000000");
        assert!(nil_id.is_nil());
        assert!(!StackId::new().is_nil());
    }

    #[test]
    fn test_id_serde() {
        let id = InvocationId::new();
        let serialized = serde_json::to_string(&id).unwrap();
        let deserialized: InvocationId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }
}
