use tap_model::{Contact, ContactId, ContactStore, ContactUpdate, StoreError};

use crate::error::PersistenceError;
use crate::types::FIRST_CONTACT_ID;

/// Contact store held in memory only.
///
/// Assigns identities the same way as the JSON store. Useful for previews and
/// tests where nothing may touch the disk.
#[derive(Debug, Clone)]
pub struct MemoryContactStore {
    contacts: Vec<Contact>,
    /// `None` once the id space is used up.
    next_id: Option<ContactId>,
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: Some(FIRST_CONTACT_ID),
        }
    }

    /// Seed with already stored contacts; new identities continue after the
    /// largest one.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let next_id = match contacts.iter().map(|c| c.id).max() {
            Some(max_id) => max_id.checked_add(1).map(|id| id.max(FIRST_CONTACT_ID)),
            None => Some(FIRST_CONTACT_ID),
        };
        Self { contacts, next_id }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

impl ContactStore for MemoryContactStore {
    fn load_all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.contacts.clone())
    }

    fn insert(&mut self, contact: &Contact) -> Result<ContactId, StoreError> {
        let Some(id) = self.next_id else {
            return Err(PersistenceError::IdsExhausted { last: ContactId::MAX }.into());
        };
        self.next_id = id.checked_add(1);
        self.contacts.push(contact.clone().with_id(id));
        Ok(id)
    }

    fn update(&mut self, update: &ContactUpdate) -> Result<(), StoreError> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.id == update.id)
            .ok_or(StoreError::NotFound { id: update.id })?;
        contact.apply(update);
        Ok(())
    }
}
