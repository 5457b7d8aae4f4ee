//! Reconciliation of fetched contacts against stored ones.
//!
//! Given the starred contacts just fetched and the contacts already stored,
//! compute one action per fetched contact:
//!
//! 1. Index stored contacts by normalized key. On duplicate keys the later
//!    contact wins; the store is expected to be de-duplicated already.
//! 2. For each fetched contact, in order:
//!    - unknown key: `Insert`;
//!    - known key with a changed name, label or photo: `Update` carrying the
//!      stored identity, and the index entry becomes the merged contact;
//!    - known key, nothing changed: `NoOp`.
//! 3. Count inserts and updates.
//!
//! A photo only counts as changed when the fetched contact has one; a missing
//! photo never erases a stored one.
//!
//! Fetched contacts sharing a key with a contact queued for insertion earlier
//! in the same run never produce a second `Insert`. Their changes are folded
//! into the queued insert and they yield `NoOp`, so the stored result matches
//! what two consecutive updates would have produced.
//!
//! The computation is pure. Applying the actions is the caller's job, and
//! running it again against the updated store yields only `NoOp`s as long as
//! contacts sharing a key within one fetch agree on their fields.

use std::collections::HashMap;
use std::fmt;

use tap_model::{Contact, ContactUpdate, ReconciliationAction, SyncOutcome};
use tracing::debug;

/// Actions for one run plus their counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// One action per fetched contact, in fetch order.
    pub actions: Vec<ReconciliationAction>,
    pub outcome: SyncOutcome,
}

impl Reconciliation {
    pub fn inserts(&self) -> impl Iterator<Item = &Contact> {
        self.actions.iter().filter_map(|action| match action {
            ReconciliationAction::Insert(contact) => Some(contact),
            _ => None,
        })
    }

    pub fn updates(&self) -> impl Iterator<Item = &ContactUpdate> {
        self.actions.iter().filter_map(|action| match action {
            ReconciliationAction::Update(update) => Some(update),
            _ => None,
        })
    }
}

/// Which fields differ between a stored and a fetched contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldChanges {
    pub name: bool,
    pub label: bool,
    pub photo: bool,
}

impl FieldChanges {
    pub fn between(current: &Contact, fresh: &Contact) -> Self {
        Self {
            name: current.name != fresh.name,
            label: current.phone_label != fresh.phone_label,
            photo: fresh.photo_uri.is_some() && current.photo_uri != fresh.photo_uri,
        }
    }

    pub fn any(&self) -> bool {
        self.name || self.label || self.photo
    }
}

impl fmt::Display for FieldChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = [
            (self.name, "name"),
            (self.label, "label"),
            (self.photo, "photo"),
        ]
        .into_iter()
        .filter_map(|(changed, field)| changed.then_some(field))
        .collect();
        if fields.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&fields.join(","))
        }
    }
}

/// Build the update that brings `current` in line with `fresh`, if any field
/// changed.
pub fn diff(current: &Contact, fresh: &Contact) -> Option<ContactUpdate> {
    let changes = FieldChanges::between(current, fresh);
    if !changes.any() {
        return None;
    }
    debug!(id = current.id, changed = %changes, "contact fields changed");
    Some(ContactUpdate {
        id: current.id,
        name: fresh.name.clone(),
        phone_label: fresh.phone_label.clone(),
        photo_uri: fresh.photo_uri.clone().or_else(|| current.photo_uri.clone()),
    })
}

/// Compute the actions that bring `existing` in line with `source`.
pub fn reconcile(source: &[Contact], existing: &[Contact]) -> Reconciliation {
    let mut stored: HashMap<&str, Contact> = existing
        .iter()
        .map(|contact| (contact.normalized_key(), contact.clone()))
        .collect();
    // Key -> index of the queued insert in `actions`.
    let mut queued: HashMap<&str, usize> = HashMap::new();
    let mut actions = Vec::with_capacity(source.len());

    for fresh in source {
        let key = fresh.normalized_key();

        if let Some(current) = stored.get_mut(key) {
            match diff(current, fresh) {
                Some(update) => {
                    current.apply(&update);
                    actions.push(ReconciliationAction::Update(update));
                }
                None => actions.push(ReconciliationAction::NoOp),
            }
            continue;
        }

        if let Some(&index) = queued.get(key) {
            if let Some(ReconciliationAction::Insert(pending)) = actions.get_mut(index)
                && let Some(update) = diff(pending, fresh)
            {
                pending.apply(&update);
            }
            debug!(index, "merged duplicate into queued insert");
            actions.push(ReconciliationAction::NoOp);
            continue;
        }

        queued.insert(key, actions.len());
        actions.push(ReconciliationAction::Insert(fresh.clone()));
    }

    let outcome = SyncOutcome::from_actions(&actions);
    debug!(
        fetched = source.len(),
        stored = existing.len(),
        inserted = outcome.inserted,
        updated = outcome.updated,
        "reconciled contacts"
    );
    Reconciliation { actions, outcome }
}
