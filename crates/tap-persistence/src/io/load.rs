//! Store loading operations.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{PersistenceError, Result};
use crate::types::{CURRENT_SCHEMA_VERSION, FIRST_CONTACT_ID, StoreFile};

/// Minimal view used to check the version before parsing the rest.
#[derive(serde::Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Load the store document from a JSON file.
pub fn load_store(path: &Path) -> Result<StoreFile> {
    let bytes = fs::read(path).map_err(|e| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_store_bytes(&bytes, path)
}

/// Load the store document, or start an empty one if the file does not exist.
pub fn load_store_or_default(path: &Path) -> Result<StoreFile> {
    match fs::read(path) {
        Ok(bytes) => parse_store_bytes(&bytes, path),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no contact store at {}, starting empty", path.display());
            Ok(StoreFile::new())
        }
        Err(e) => Err(PersistenceError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Parse store bytes and validate the contents.
fn parse_store_bytes(bytes: &[u8], path: &Path) -> Result<StoreFile> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })?;

    if probe.version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: probe.version,
            max_supported: CURRENT_SCHEMA_VERSION,
            path: path.to_path_buf(),
        });
    }

    let mut store: StoreFile =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_ids(&mut store, path)?;

    tracing::debug!(contacts = store.contacts.len(), "loaded contact store from {}", path.display());
    Ok(store)
}

/// Reject unusable identities and repair a lagging or non-positive `next_id`.
fn validate_ids(store: &mut StoreFile, path: &Path) -> Result<()> {
    let mut seen = HashSet::with_capacity(store.contacts.len());
    for contact in &store.contacts {
        if contact.id <= 0 {
            return Err(PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("contact id {} is not positive", contact.id),
            });
        }
        if !seen.insert(contact.id) {
            return Err(PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("contact id {} appears twice", contact.id),
            });
        }
    }

    let floor = match store.max_id() {
        Some(max_id) => max_id
            .checked_add(1)
            .ok_or_else(|| PersistenceError::InvalidFormat {
                path: path.to_path_buf(),
                reason: format!("contact id {max_id} leaves no room for new contacts"),
            })?,
        None => FIRST_CONTACT_ID,
    };
    if store.next_id < floor {
        tracing::warn!(
            next_id = store.next_id,
            floor,
            "contact store next_id behind stored ids, repairing"
        );
        store.next_id = floor;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::save_store;
    use crate::types::ContactSnapshot;
    use tempfile::tempdir;

    fn snapshot(id: i64) -> ContactSnapshot {
        ContactSnapshot {
            id,
            name: format!("Contact {id}"),
            phone_number: format!("234567890{id}"),
            phone_label: "Mobile".to_string(),
            photo_uri: None,
        }
    }

    #[test]
    fn test_load_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut store = StoreFile::new();
        let id = store.allocate_id().unwrap();
        store.contacts.push(snapshot(id));
        save_store(&mut store, &path).unwrap();

        let loaded = load_store(&path).unwrap();
        assert_eq!(loaded.contacts, store.contacts);
        assert_eq!(loaded.next_id, 2);
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = load_store_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(store.contacts.is_empty());
        assert!(matches!(
            load_store(&dir.path().join("absent.json")),
            Err(PersistenceError::Io { operation: "read", .. })
        ));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, b"{ not json").unwrap();

        assert!(matches!(
            load_store(&path),
            Err(PersistenceError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.json");
        fs::write(&path, br#"{"version": 99, "something": "else"}"#).unwrap();

        assert!(matches!(
            load_store(&path),
            Err(PersistenceError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_load_duplicate_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dupes.json");
        let mut store = StoreFile::new();
        store.contacts = vec![snapshot(1), snapshot(1)];
        store.next_id = 2;
        fs::write(&path, serde_json::to_vec(&store).unwrap()).unwrap();

        assert!(matches!(
            load_store(&path),
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_load_repairs_next_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lagging.json");
        let mut store = StoreFile::new();
        store.contacts = vec![snapshot(3), snapshot(7)];
        store.next_id = 4;
        fs::write(&path, serde_json::to_vec(&store).unwrap()).unwrap();

        assert_eq!(load_store(&path).unwrap().next_id, 8);
    }

    #[test]
    fn test_load_repairs_non_positive_next_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.json");
        for next_id in [0, -5] {
            let mut store = StoreFile::new();
            store.next_id = next_id;
            fs::write(&path, serde_json::to_vec(&store).unwrap()).unwrap();

            assert_eq!(load_store(&path).unwrap().next_id, FIRST_CONTACT_ID);
        }
    }

    #[test]
    fn test_load_rejects_id_at_upper_bound() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("full.json");
        let mut store = StoreFile::new();
        store.contacts = vec![snapshot(i64::MAX)];
        store.next_id = i64::MAX;
        fs::write(&path, serde_json::to_vec(&store).unwrap()).unwrap();

        assert!(matches!(
            load_store(&path),
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }
}
