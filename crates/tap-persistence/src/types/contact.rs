use serde::{Deserialize, Serialize};
use tap_model::ContactId;

/// One stored contact.
///
/// The normalized key is not stored; it is recomputed from the phone number
/// on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSnapshot {
    pub id: ContactId,
    pub name: String,
    pub phone_number: String,
    pub phone_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}
