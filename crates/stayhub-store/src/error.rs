//! # Store Error Types
//!
//! Error types for storage-backed operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / quota check                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the storage key and categorization    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ErrorKind { Persistence, NotFound, Validation, Config }               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer decides what to show and whether to retry          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries or recovers silently. The single exception is
//! rehydration, where unreadable data becomes an empty collection.

use serde::Serialize;
use stayhub_core::{CoreError, ValidationError};
use thiserror::Error;

/// Storage-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The value would exceed the storage quota.
    ///
    /// ## When This Occurs
    /// - A bounded storage backend (browser-style quota) is full
    /// - The booking list has grown past `quota_bytes`
    #[error("Storage quota exceeded writing '{key}': {requested} bytes requested, limit {limit}")]
    QuotaExceeded {
        key: String,
        requested: usize,
        limit: usize,
    },

    /// The storage backend cannot be used at all (disabled, read-only).
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Reading or writing the backing file failed.
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A collection could not be encoded as JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity not found in the collection.
    ///
    /// ## When This Occurs
    /// - Cancelling or deleting a booking id that was never created
    /// - Deleting the same booking twice
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Input failed validation before anything was stored.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be written as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Machine-readable classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Durable storage rejected a write (quota, disabled storage, I/O).
    Persistence,
    NotFound,
    Validation,
    Config,
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an Io error tagged with the storage key.
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::QuotaExceeded { .. }
            | StoreError::StorageUnavailable(_)
            | StoreError::Io { .. }
            | StoreError::Serialization(_) => ErrorKind::Persistence,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Validation(_) => ErrorKind::Validation,
            StoreError::InvalidConfig(_)
            | StoreError::ConfigParse(_)
            | StoreError::ConfigSerialize(_) => ErrorKind::Config,
        }
    }

    pub fn is_persistence(&self) -> bool {
        self.kind() == ErrorKind::Persistence
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => StoreError::Validation(e),
            CoreError::InvalidPrice { reason } => StoreError::InvalidConfig(reason),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let quota = StoreError::QuotaExceeded {
            key: "myBookings".to_string(),
            requested: 6000,
            limit: 5000,
        };
        assert!(quota.is_persistence());
        assert_eq!(
            quota.to_string(),
            "Storage quota exceeded writing 'myBookings': 6000 bytes requested, limit 5000"
        );

        let missing = StoreError::not_found("Booking", "BK-404");
        assert!(missing.is_not_found());
        assert_eq!(missing.to_string(), "Booking not found: BK-404");

        let invalid: StoreError = ValidationError::required("checkIn").into();
        assert_eq!(invalid.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_core_error_conversion() {
        let err: StoreError = CoreError::InvalidPrice {
            reason: "negative".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
