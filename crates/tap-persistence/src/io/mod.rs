//! File I/O operations for the contact store.
//!
//! This module handles:
//! - Saving the store with atomic writes
//! - Loading the store with version and identity validation

mod load;
mod save;

pub use load::{load_store, load_store_or_default};
pub use save::save_store;
