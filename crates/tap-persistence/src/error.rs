//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use tap_model::{ContactId, StoreError};
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed but its contents are inconsistent.
    #[error("Invalid contact store: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Unsupported schema version.
    #[error("Contact store version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Serialization error.
    #[error("Failed to serialize contact store")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to parse contact store: {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Update for an identity the store does not hold.
    #[error("Contact {id} not found")]
    ContactNotFound { id: ContactId },

    /// No identity is left to hand out.
    #[error("Contact ids exhausted after {last}")]
    IdsExhausted { last: ContactId },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { path, reason } => {
                format!(
                    "The file at {} is not a valid contact store: {}",
                    path.display(),
                    reason
                )
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
                ..
            } => {
                format!(
                    "This contact store was written by a newer version of whatstap \
                    (file version {found}, this version supports up to {max_supported})."
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the contact list.".to_string()
            }
            Self::Deserialization { path, .. } => {
                format!(
                    "The contact store at {} could not be read. The file may be corrupted.",
                    path.display()
                )
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::ContactNotFound { id } => {
                format!("Contact {id} is not in the contact store.")
            }
            Self::IdsExhausted { last } => {
                format!("The contact store cannot assign an id after {last}.")
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => Some(
                "Move the file aside and run sync again to rebuild it from your favorites."
                    .into(),
            ),
            Self::UnsupportedVersion { .. } => Some("Update whatstap to the latest version.".into()),
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or point WHATSTAP_STORE at another location.".into())
            }
            Self::ContactNotFound { .. } => Some("Run sync again to refresh the store.".into()),
            Self::IdsExhausted { .. } => Some(
                "Move the file aside and run sync again to rebuild it from your favorites."
                    .into(),
            ),
        }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ContactNotFound { id } => StoreError::NotFound { id },
            other => StoreError::backend(other.to_string(), other),
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
