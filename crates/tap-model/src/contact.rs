//! Contact records and the raw provider tuples they are built from.

use serde::{Deserialize, Serialize};
use tap_phone::{classify, is_messaging_label, normalize};

/// Store-assigned contact identity.
pub type ContactId = i64;

/// Identity of a contact that has not been stored yet.
pub const UNSAVED_ID: ContactId = 0;

/// Name shown for provider entries without a display name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One phone entry as returned by the contact provider.
///
/// Every field is optional except the type code, mirroring what the provider
/// query can hand back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContact {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub photo_uri: Option<String>,
    pub type_code: i32,
    pub custom_label: Option<String>,
}

impl RawContact {
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            phone_number: Some(phone_number.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_code: i32) -> Self {
        self.type_code = type_code;
        self
    }

    pub fn with_custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_label = Some(label.into());
        self
    }

    pub fn with_photo(mut self, photo_uri: impl Into<String>) -> Self {
        self.photo_uri = Some(photo_uri.into());
        self
    }
}

/// A favorite contact as the launcher knows it.
///
/// The normalized key always matches the phone number: it is computed on
/// construction and whenever the number changes, and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Store identity, [`UNSAVED_ID`] until inserted.
    pub id: ContactId,
    pub name: String,
    phone_number: String,
    normalized_key: String,
    pub phone_label: String,
    pub photo_uri: Option<String>,
}

impl Contact {
    /// Create an unsaved contact.
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        phone_label: impl Into<String>,
    ) -> Self {
        let phone_number = phone_number.into();
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            normalized_key: normalize(&phone_number),
            phone_number,
            phone_label: phone_label.into(),
            photo_uri: None,
        }
    }

    /// Build a contact from a provider tuple, classifying its label.
    pub fn from_raw(raw: &RawContact) -> Self {
        let label = classify(raw.type_code, raw.custom_label.as_deref());
        let mut contact = Self::new(
            raw.name.as_deref().unwrap_or(UNKNOWN_NAME),
            raw.phone_number.as_deref().unwrap_or_default(),
            label.label,
        );
        contact.photo_uri = raw.photo_uri.clone();
        contact
    }

    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = id;
        self
    }

    pub fn with_photo(mut self, photo_uri: impl Into<String>) -> Self {
        self.photo_uri = Some(photo_uri.into());
        self
    }

    /// Phone number exactly as supplied.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Digit key used to decide whether two contacts are the same subscriber.
    pub fn normalized_key(&self) -> &str {
        &self.normalized_key
    }

    /// Replace the phone number and recompute the key.
    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) {
        self.phone_number = phone_number.into();
        self.normalized_key = normalize(&self.phone_number);
    }

    /// Whether taps on this contact should open the messaging app.
    pub fn is_messaging_contact(&self) -> bool {
        is_messaging_label(&self.phone_label)
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }

    /// Same subscriber as `other` (equal, non-empty keys).
    pub fn same_subscriber(&self, other: &Contact) -> bool {
        !self.normalized_key.is_empty() && self.normalized_key == other.normalized_key
    }

    /// Apply the field values of an update. The identity is left alone.
    pub fn apply(&mut self, update: &ContactUpdate) {
        self.name.clone_from(&update.name);
        self.phone_label.clone_from(&update.phone_label);
        self.photo_uri.clone_from(&update.photo_uri);
    }
}

/// New field values for a stored contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    pub id: ContactId,
    pub name: String,
    pub phone_label: String,
    /// Photo after the merge: the fresh photo if one was fetched, otherwise
    /// the stored one.
    pub photo_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_follows_phone_number() {
        let mut contact = Contact::new("Ada", "+1 (234) 567-8901", "Mobile");
        assert_eq!(contact.normalized_key(), "2345678901");

        contact.set_phone_number("020 1234 5678");
        assert_eq!(contact.phone_number(), "020 1234 5678");
        assert_eq!(contact.normalized_key(), "02012345678");
    }

    #[test]
    fn from_raw_fills_defaults() {
        let raw = RawContact {
            type_code: 2,
            ..RawContact::default()
        };
        let contact = Contact::from_raw(&raw);
        assert_eq!(contact.name, UNKNOWN_NAME);
        assert_eq!(contact.phone_number(), "");
        assert_eq!(contact.normalized_key(), "");
        assert_eq!(contact.phone_label, "Mobile");
        assert!(!contact.is_persisted());
    }

    #[test]
    fn from_raw_classifies_custom_labels() {
        let raw = RawContact::new("Grace", "2345678901")
            .with_type(0)
            .with_custom_label("WhatsApp")
            .with_photo("content://photos/7");
        let contact = Contact::from_raw(&raw);
        assert_eq!(contact.phone_label, "WhatsApp");
        assert!(contact.is_messaging_contact());
        assert_eq!(contact.photo_uri.as_deref(), Some("content://photos/7"));
    }

    #[test]
    fn apply_keeps_identity_and_number() {
        let mut contact = Contact::new("Old", "2345678901", "Home").with_id(4);
        contact.apply(&ContactUpdate {
            id: 99,
            name: "New".to_string(),
            phone_label: "WA".to_string(),
            photo_uri: Some("p".to_string()),
        });
        assert_eq!(contact.id, 4);
        assert_eq!(contact.name, "New");
        assert!(contact.is_messaging_contact());
        assert_eq!(contact.phone_number(), "2345678901");
    }

    #[test]
    fn empty_keys_never_match() {
        let a = Contact::new("A", "", "Home");
        let b = Contact::new("B", "n/a", "Home");
        assert!(!a.same_subscriber(&b));
    }
}
