//! File-backed contact store.

use std::path::{Path, PathBuf};

use tap_model::{Contact, ContactId, ContactStore, ContactUpdate, StoreError};

use crate::convert::{FromSnapshot, ToSnapshot};
use crate::error::{PersistenceError, Result};
use crate::io::{load_store_or_default, save_store};
use crate::types::StoreFile;

/// Contact store persisted as a JSON document.
///
/// The document is read once on open. Every insert or update is written
/// through to disk before it returns; if the write fails the in-memory state
/// is rolled back, so memory and disk never disagree.
///
/// The file is not locked. Each save rewrites the whole document from this
/// handle's copy, so two handles on the same path (in one process or in
/// several) overwrite each other's changes. Callers must keep to one writer
/// per path; `SyncGate` covers this within a process.
#[derive(Debug)]
pub struct JsonContactStore {
    path: PathBuf,
    file: StoreFile,
}

impl JsonContactStore {
    /// Open the store at `path`. A missing file is an empty store; nothing is
    /// written until the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = load_store_or_default(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded document.
    pub fn file(&self) -> &StoreFile {
        &self.file
    }

    pub fn len(&self) -> usize {
        self.file.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.contacts.is_empty()
    }

    /// Stored contacts in insertion order.
    pub fn contacts(&self) -> Vec<Contact> {
        self.file
            .contacts
            .iter()
            .cloned()
            .map(Contact::from_snapshot)
            .collect()
    }

    /// Add a contact and persist. Returns the assigned identity.
    pub fn insert_contact(&mut self, contact: &Contact) -> Result<ContactId> {
        let previous_next_id = self.file.next_id;
        let id = self.file.allocate_id()?;
        let mut snapshot = contact.to_snapshot();
        snapshot.id = id;
        self.file.contacts.push(snapshot);

        if let Err(e) = save_store(&mut self.file, &self.path) {
            self.file.contacts.pop();
            self.file.next_id = previous_next_id;
            return Err(e);
        }
        Ok(id)
    }

    /// Overwrite name, label and photo of a stored contact and persist.
    pub fn update_contact(&mut self, update: &ContactUpdate) -> Result<()> {
        let Some(stored) = self.file.find_mut(update.id) else {
            return Err(PersistenceError::ContactNotFound { id: update.id });
        };
        let previous = stored.clone();
        stored.name.clone_from(&update.name);
        stored.phone_label.clone_from(&update.phone_label);
        stored.photo_uri.clone_from(&update.photo_uri);

        if let Err(e) = save_store(&mut self.file, &self.path) {
            if let Some(stored) = self.file.find_mut(update.id) {
                *stored = previous;
            }
            return Err(e);
        }
        Ok(())
    }
}

impl ContactStore for JsonContactStore {
    fn load_all(&self) -> std::result::Result<Vec<Contact>, StoreError> {
        Ok(self.contacts())
    }

    fn insert(&mut self, contact: &Contact) -> std::result::Result<ContactId, StoreError> {
        self.insert_contact(contact).map_err(StoreError::from)
    }

    fn update(&mut self, update: &ContactUpdate) -> std::result::Result<(), StoreError> {
        self.update_contact(update).map_err(StoreError::from)
    }
}
