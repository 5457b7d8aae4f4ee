//! Tests for tap-model types.

use tap_model::{
    Contact, ContactStore, ContactUpdate, RawContact, ReconciliationAction, SourceError,
    StoreError, SyncOutcome,
};

#[test]
fn outcome_summaries() {
    insta::assert_snapshot!(SyncOutcome::new(2, 1).summary(), @"2 new, 1 updated");
    insta::assert_snapshot!(SyncOutcome::new(0, 3).summary(), @"0 new, 3 updated");
    insta::assert_snapshot!(SyncOutcome::default().summary(), @"No changes needed");
}

#[test]
fn outcome_serializes() {
    let outcome = SyncOutcome::new(1, 0);
    insta::assert_json_snapshot!(outcome, @r#"
    {
      "inserted": 1,
      "updated": 0
    }
    "#);
    let round: SyncOutcome =
        serde_json::from_str(&serde_json::to_string(&outcome).expect("serialize outcome"))
            .expect("deserialize outcome");
    assert_eq!(round, outcome);
}

#[test]
fn raw_contact_deserializes_with_missing_fields() {
    let raw: RawContact =
        serde_json::from_str(r#"{"name":null,"phone_number":"555","photo_uri":null,"type_code":2,"custom_label":null}"#)
            .expect("deserialize raw contact");
    let contact = Contact::from_raw(&raw);
    assert_eq!(contact.name, "Unknown");
    assert_eq!(contact.phone_label, "Mobile");
}

#[test]
fn errors_carry_user_messages() {
    let denied = SourceError::PermissionDenied;
    assert!(denied.suggestion().is_some());
    assert!(denied.user_message().contains("contact access"));

    let missing = StoreError::NotFound { id: 7 };
    assert_eq!(missing.to_string(), "Contact 7 not found");

    let io = std::io::Error::other("disk full");
    let backend = StoreError::backend("write failed", io);
    assert_eq!(backend.to_string(), "Contact store failed: write failed");
    assert!(std::error::Error::source(&backend).is_some());
}

/// Minimal store used to check the `&mut` forwarding impl.
#[derive(Default)]
struct VecStore {
    contacts: Vec<Contact>,
}

impl ContactStore for VecStore {
    fn load_all(&self) -> Result<Vec<Contact>, StoreError> {
        Ok(self.contacts.clone())
    }

    fn insert(&mut self, contact: &Contact) -> Result<i64, StoreError> {
        let id = self.contacts.len() as i64 + 1;
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

fn insert_through<S: ContactStore>(mut store: S, contact: &Contact) -> i64 {
    store.insert(contact).expect("insert")
}

#[test]
fn store_is_usable_through_mutable_reference() {
    let mut store = VecStore::default();
    let id = insert_through(&mut store, &Contact::new("Ada", "2345678901", "Home"));
    assert_eq!(id, 1);
    assert_eq!(store.load_all().expect("load").len(), 1);

    let err = store
        .update(&ContactUpdate {
            id: 42,
            name: "X".to_string(),
            phone_label: "Home".to_string(),
            photo_uri: None,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42 }));
    assert!(!ReconciliationAction::NoOp.is_insert());
}
