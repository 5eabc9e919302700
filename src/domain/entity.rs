//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all list entities.
//! All entities have a unique, opaque string ID and are thread-safe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque unique identifier for inventory items and memos
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of ids minted by an `IdGenerator`
    pub(crate) fn as_number(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Core trait for all list entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &RecordId;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// Store intents never fail; these cover setup only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainError {
    InvalidInput(String),
    Internal(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_serializes_as_plain_string() {
        let id = RecordId::from("7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
        assert_eq!(id.as_number(), Some(7));
        assert_eq!(RecordId::from("abc").as_number(), None);
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidInput("bad seed".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad seed");
    }
}
