//! Sync run errors.

use tap_model::{ContactId, SourceError, StoreError};
use thiserror::Error;

/// Failure of a whole sync run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    /// Fetching starred contacts failed.
    #[error("Failed to fetch starred contacts")]
    Fetch(#[from] SourceError),

    /// Reading the stored contacts failed.
    #[error("Failed to load stored contacts")]
    Load(#[source] StoreError),

    /// A write failed and the run stopped. Earlier writes are kept.
    #[error("Failed to {action} a contact after {applied} successful writes")]
    Apply {
        applied: usize,
        action: &'static str,
        /// Stored identity, or `UNSAVED_ID` for a failed insert.
        id: ContactId,
        #[source]
        source: StoreError,
    },

    /// Another sync run is in progress.
    #[error("A sync is already running")]
    Busy,
}

impl SyncError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(source) => source.user_message(),
            Self::Load(source) => source.user_message(),
            Self::Apply {
                applied, source, ..
            } => format!(
                "Sync stopped after {applied} change(s): {}",
                source.user_message()
            ),
            Self::Busy => "A sync is already running.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Fetch(source) => source.suggestion(),
            Self::Load(source) | Self::Apply { source, .. } => source.suggestion(),
            Self::Busy => Some("Wait for the current sync to finish.".into()),
        }
    }
}
