//! Favorites sync: reconcile starred contacts with the launcher's store.
//!
//! [`reconcile`] is the pure diff. [`SyncRunner`] drives a full pass against a
//! [`tap_model::ContactSource`] and [`tap_model::ContactStore`], and
//! [`SyncGate`] keeps passes from overlapping.

mod error;
mod gate;
mod reconcile;
mod runner;

pub use error::SyncError;
pub use gate::{SyncGate, SyncPermit};
pub use reconcile::{FieldChanges, Reconciliation, diff, reconcile};
pub use runner::{ApplyFailure, SyncOptions, SyncReport, SyncRunner, WritePolicy};
