//! Contact model shared by sync, ingest and persistence.

pub mod contact;
pub mod error;
pub mod repository;
pub mod sync;

pub use contact::{Contact, ContactId, ContactUpdate, RawContact, UNKNOWN_NAME, UNSAVED_ID};
pub use error::{BoxedError, SourceError, StoreError};
pub use repository::{ContactSource, ContactStore};
pub use sync::{ReconciliationAction, SyncOutcome};
