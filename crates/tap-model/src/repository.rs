//! Interfaces to the contact provider and the contact store.
//!
//! Sync only needs three capabilities from the outside world: read the
//! starred contacts, read everything stored, and write one insert or update at
//! a time. There is no batch or transaction contract.

use crate::contact::{Contact, ContactId, ContactUpdate, RawContact};
use crate::error::{SourceError, StoreError};

/// Supplies starred contacts from the device.
pub trait ContactSource {
    /// Fetch every starred phone entry. Filtering to favorites happens here,
    /// not in the caller.
    fn fetch_starred(&self) -> Result<Vec<RawContact>, SourceError>;
}

/// Persists the launcher's contact list.
pub trait ContactStore {
    /// Current snapshot of every stored contact.
    fn load_all(&self) -> Result<Vec<Contact>, StoreError>;

    /// Store a new contact and return its assigned identity.
    fn insert(&mut self, contact: &Contact) -> Result<ContactId, StoreError>;

    /// Overwrite name, label and photo of a stored contact.
    fn update(&mut self, update: &ContactUpdate) -> Result<(), StoreError>;
}

impl<S: ContactSource + ?Sized> ContactSource for &S {
    fn fetch_starred(&self) -> Result<Vec<RawContact>, SourceError> {
        (**self).fetch_starred()
    }
}

impl<S: ContactStore + ?Sized> ContactStore for &mut S {
    fn load_all(&self) -> Result<Vec<Contact>, StoreError> {
        (**self).load_all()
    }

    fn insert(&mut self, contact: &Contact) -> Result<ContactId, StoreError> {
        (**self).insert(contact)
    }

    fn update(&mut self, update: &ContactUpdate) -> Result<(), StoreError> {
        (**self).update(update)
    }
}
