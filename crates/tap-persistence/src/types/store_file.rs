//! Root store document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tap_model::ContactId;

use super::{CURRENT_SCHEMA_VERSION, ContactSnapshot, FIRST_CONTACT_ID};
use crate::error::{PersistenceError, Result};

/// Top-level JSON document of the contact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFile {
    /// Schema version (for future migrations).
    pub version: u32,

    /// Identity for the next inserted contact. Never decreases.
    pub next_id: ContactId,

    /// When the store was last written.
    pub saved_at: DateTime<Utc>,

    pub contacts: Vec<ContactSnapshot>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFile {
    /// Create an empty store document.
    pub fn new() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            next_id: FIRST_CONTACT_ID,
            saved_at: Utc::now(),
            contacts: Vec::new(),
        }
    }

    /// Update the saved timestamp.
    pub fn touch(&mut self) {
        self.saved_at = Utc::now();
    }

    /// Hand out the next identity.
    pub fn allocate_id(&mut self) -> Result<ContactId> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(PersistenceError::IdsExhausted { last: id })?;
        Ok(id)
    }

    pub fn find_mut(&mut self, id: ContactId) -> Option<&mut ContactSnapshot> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    /// Largest stored identity, if any.
    pub fn max_id(&self) -> Option<ContactId> {
        self.contacts.iter().map(|c| c.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut file = StoreFile::new();
        assert_eq!(file.allocate_id().unwrap(), 1);
        assert_eq!(file.allocate_id().unwrap(), 2);
        assert_eq!(file.next_id, 3);
        assert_eq!(file.max_id(), None);
    }

    #[test]
    fn allocation_stops_at_the_last_id() {
        let mut file = StoreFile::new();
        file.next_id = i64::MAX;
        assert!(matches!(
            file.allocate_id(),
            Err(PersistenceError::IdsExhausted { last: i64::MAX })
        ));
        assert_eq!(file.next_id, i64::MAX);
    }
}
