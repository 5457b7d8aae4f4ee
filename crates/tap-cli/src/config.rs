//! Store location resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the contact store file.
pub const STORE_ENV_VAR: &str = "WHATSTAP_STORE";

/// Store file used when neither a flag nor the environment names one.
pub const DEFAULT_STORE_FILE: &str = "contacts.json";

/// Resolve the store path: explicit flag, then `WHATSTAP_STORE`, then
/// `contacts.json` in the working directory.
pub fn resolve_store_path(explicit: Option<&Path>) -> PathBuf {
    resolve_store_path_with(explicit, std::env::var_os(STORE_ENV_VAR))
}

/// [`resolve_store_path`] with the environment value passed in.
pub fn resolve_store_path_with(explicit: Option<&Path>, env_value: Option<OsString>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env_value
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_STORE_FILE), PathBuf::from)
}
