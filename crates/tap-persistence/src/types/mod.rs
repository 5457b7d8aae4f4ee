//! Serializable store types.

mod contact;
mod store_file;

pub use contact::ContactSnapshot;
pub use store_file::StoreFile;

/// Current schema version for store files.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// First identity handed out by an empty store.
pub const FIRST_CONTACT_ID: i64 = 1;
