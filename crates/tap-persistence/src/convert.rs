//! Conversion traits between runtime contacts and persistence types.

use tap_model::Contact;

use crate::types::ContactSnapshot;

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Trait for types that can be created from a persistence snapshot.
pub trait FromSnapshot: Sized {
    /// The snapshot type.
    type Snapshot;

    /// Create from a snapshot.
    fn from_snapshot(snapshot: Self::Snapshot) -> Self;
}

impl ToSnapshot for Contact {
    type Snapshot = ContactSnapshot;

    fn to_snapshot(&self) -> ContactSnapshot {
        ContactSnapshot {
            id: self.id,
            name: self.name.clone(),
            phone_number: self.phone_number().to_string(),
            phone_label: self.phone_label.clone(),
            photo_uri: self.photo_uri.clone(),
        }
    }
}

impl FromSnapshot for Contact {
    type Snapshot = ContactSnapshot;

    fn from_snapshot(snapshot: ContactSnapshot) -> Self {
        let contact = Contact::new(snapshot.name, snapshot.phone_number, snapshot.phone_label)
            .with_id(snapshot.id);
        match snapshot.photo_uri {
            Some(photo) => contact.with_photo(photo),
            None => contact,
        }
    }
}
