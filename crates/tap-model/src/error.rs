//! Errors reported by contact collaborators.
//!
//! Sources and stores live outside this crate (files, databases, platform
//! providers), so their failures are carried as a message plus an optional
//! boxed cause.

use thiserror::Error;

use crate::contact::ContactId;

/// Boxed cause from a collaborator backend.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Contact provider failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The provider refused access to contacts.
    #[error("Contact access was denied")]
    PermissionDenied,

    /// The provider query itself failed.
    #[error("Contact query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl SourceError {
    pub fn query(message: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Query {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => "Favorites can't be read without contact access.".to_string(),
            Self::Query { message, .. } => format!("Favorites could not be read: {message}"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::PermissionDenied => Some("Grant the contacts permission and sync again.".into()),
            Self::Query { .. } => None,
        }
    }
}

/// Contact store failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// An update named an identity the store does not hold.
    #[error("Contact {id} not found")]
    NotFound { id: ContactId },

    /// The backend failed to read or write.
    #[error("Contact store failed: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl StoreError {
    pub fn backend(message: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { id } => {
                format!("Contact {id} is no longer in your favorites list.")
            }
            Self::Backend { message, .. } => format!("Favorites could not be saved: {message}"),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => Some("Sync again to refresh the list.".into()),
            Self::Backend { .. } => {
                Some("Check that the contact store is writable and has free space.".into())
            }
        }
    }
}
