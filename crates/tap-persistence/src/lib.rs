//! Persistent storage for the favorites contact list.
//!
//! # File Format
//!
//! The store is a single pretty-printed JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "next_id": 3,
//!   "saved_at": "2026-01-01T12:00:00Z",
//!   "contacts": [
//!     { "id": 1, "name": "Ada", "phone_number": "+1 234 567 8901", "phone_label": "Mobile" },
//!     { "id": 2, "name": "Grace", "phone_number": "345 678 9012", "phone_label": "WhatsApp",
//!       "photo_uri": "content://photos/2" }
//!   ]
//! }
//! ```
//!
//! Writes go to a temp file that is renamed over the target. Identities come
//! from `next_id` and are never reused.
//!
//! # Architecture
//!
//! - `types/` - Serializable store document
//! - `io/` - Load and atomic save
//! - `store/` - `ContactStore` implementations (JSON file, in-memory)
//! - `convert.rs` - Snapshot conversion traits
//! - `error.rs` - Error types with user-friendly messages

mod convert;
mod error;
mod io;
mod store;
mod types;

pub use convert::{FromSnapshot, ToSnapshot};
pub use error::{PersistenceError, Result};
pub use io::{load_store, load_store_or_default, save_store};
pub use store::{JsonContactStore, MemoryContactStore};
pub use types::{CURRENT_SCHEMA_VERSION, ContactSnapshot, FIRST_CONTACT_ID, StoreFile};
