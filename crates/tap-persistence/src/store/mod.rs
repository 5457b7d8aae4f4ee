//! [`tap_model::ContactStore`] implementations.

mod json;
mod memory;

pub use json::JsonContactStore;
pub use memory::MemoryContactStore;
