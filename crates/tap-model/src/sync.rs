//! Reconciliation actions and run outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contact::{Contact, ContactUpdate};

/// What to do with one freshly fetched contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationAction {
    /// The subscriber is new; store the contact.
    Insert(Contact),
    /// The subscriber is stored but some fields changed.
    Update(ContactUpdate),
    /// Nothing to write.
    NoOp,
}

impl ReconciliationAction {
    pub fn is_insert(&self) -> bool {
        matches!(self, ReconciliationAction::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, ReconciliationAction::Update(_))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, ReconciliationAction::NoOp)
    }

    /// Short verb for logs and tables.
    pub fn kind(&self) -> &'static str {
        match self {
            ReconciliationAction::Insert(_) => "insert",
            ReconciliationAction::Update(_) => "update",
            ReconciliationAction::NoOp => "unchanged",
        }
    }
}

/// Counts from one sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub inserted: usize,
    pub updated: usize,
}

impl SyncOutcome {
    pub fn new(inserted: usize, updated: usize) -> Self {
        Self { inserted, updated }
    }

    /// Tally the inserts and updates in an action list.
    pub fn from_actions(actions: &[ReconciliationAction]) -> Self {
        actions.iter().fold(Self::default(), |mut outcome, action| {
            match action {
                ReconciliationAction::Insert(_) => outcome.inserted += 1,
                ReconciliationAction::Update(_) => outcome.updated += 1,
                ReconciliationAction::NoOp => {}
            }
            outcome
        })
    }

    /// True when anything was inserted or updated.
    pub fn has_changes(&self) -> bool {
        self.inserted > 0 || self.updated > 0
    }

    /// Human-readable summary, e.g. `"2 new, 1 updated"`.
    pub fn summary(&self) -> String {
        if self.has_changes() {
            format!("{} new, {} updated", self.inserted, self.updated)
        } else {
            "No changes needed".to_string()
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}
