//! Phone type vocabulary and label classification.
//!
//! Contact providers tag each number with a small integer type code (the
//! Android `ContactsContract.CommonDataKinds.Phone.TYPE_*` values) and, for
//! the custom type, a free-text label. Classification turns that pair into the
//! label shown to the user and decides whether the number belongs to a
//! messaging app.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PhoneError;

/// Label used for codes outside the known vocabulary.
pub const GENERIC_LABEL: &str = "Phone";

/// Substrings that mark a label as belonging to the messaging app.
const MESSAGING_MARKERS: [&str; 2] = ["whatsapp", "wa"];

/// Carrier phone type with its provider code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneType {
    Custom,
    Home,
    Mobile,
    Work,
    WorkFax,
    HomeFax,
    Pager,
    Other,
    Main,
    WorkMobile,
    WorkPager,
    Assistant,
    Mms,
}

impl PhoneType {
    pub const ALL: [PhoneType; 13] = [
        PhoneType::Custom,
        PhoneType::Home,
        PhoneType::Mobile,
        PhoneType::Work,
        PhoneType::WorkFax,
        PhoneType::HomeFax,
        PhoneType::Pager,
        PhoneType::Other,
        PhoneType::Main,
        PhoneType::WorkMobile,
        PhoneType::WorkPager,
        PhoneType::Assistant,
        PhoneType::Mms,
    ];

    /// Look up a provider type code. Unknown codes return `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(PhoneType::Custom),
            1 => Some(PhoneType::Home),
            2 => Some(PhoneType::Mobile),
            3 => Some(PhoneType::Work),
            4 => Some(PhoneType::WorkFax),
            5 => Some(PhoneType::HomeFax),
            6 => Some(PhoneType::Pager),
            7 => Some(PhoneType::Other),
            12 => Some(PhoneType::Main),
            17 => Some(PhoneType::WorkMobile),
            18 => Some(PhoneType::WorkPager),
            19 => Some(PhoneType::Assistant),
            20 => Some(PhoneType::Mms),
            _ => None,
        }
    }

    /// Provider type code.
    pub fn code(&self) -> i32 {
        match self {
            PhoneType::Custom => 0,
            PhoneType::Home => 1,
            PhoneType::Mobile => 2,
            PhoneType::Work => 3,
            PhoneType::WorkFax => 4,
            PhoneType::HomeFax => 5,
            PhoneType::Pager => 6,
            PhoneType::Other => 7,
            PhoneType::Main => 12,
            PhoneType::WorkMobile => 17,
            PhoneType::WorkPager => 18,
            PhoneType::Assistant => 19,
            PhoneType::Mms => 20,
        }
    }

    /// Display label for the type. `Custom` shows the user's own label instead.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneType::Custom => "Custom",
            PhoneType::Home => "Home",
            PhoneType::Mobile => "Mobile",
            PhoneType::Work => "Work",
            PhoneType::WorkFax => "Work Fax",
            PhoneType::HomeFax => "Home Fax",
            PhoneType::Pager => "Pager",
            PhoneType::Other => "Other",
            PhoneType::Main => "Main",
            PhoneType::WorkMobile => "Work Mobile",
            PhoneType::WorkPager => "Work Pager",
            PhoneType::Assistant => "Assistant",
            PhoneType::Mms => "MMS",
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PhoneType {
    type Err = PhoneError;

    /// Parse a numeric code or a type name (case-insensitive, spaces,
    /// dashes and underscores ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return PhoneType::from_code(code).ok_or(PhoneError::UnknownTypeCode(code));
        }

        let compact: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_uppercase();

        PhoneType::ALL
            .into_iter()
            .find(|ty| ty.as_str().replace(' ', "").to_uppercase() == compact)
            .ok_or_else(|| PhoneError::UnknownTypeName(s.to_string()))
    }
}

/// Display label and messaging affinity for one phone entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneLabel {
    pub label: String,
    pub is_messaging: bool,
}

/// Returns true if the label mentions the messaging app.
///
/// The test is a plain case-insensitive substring match, so any label
/// containing `wa` qualifies (`"WA Business"`, but also `"Hawaii"`).
pub fn is_messaging_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    MESSAGING_MARKERS.iter().any(|marker| lower.contains(*marker))
}

/// Classify a provider type code and optional custom label.
///
/// Unknown codes get [`GENERIC_LABEL`]. For the custom type the user's label
/// is shown as given; without one it falls back to `"WhatsApp"` or `"Custom"`.
///
/// # Example
/// ```
/// use tap_phone::{PhoneType, classify};
///
/// let label = classify(PhoneType::Custom.code(), Some("WhatsApp Mobile"));
/// assert_eq!(label.label, "WhatsApp Mobile");
/// assert!(label.is_messaging);
/// ```
pub fn classify(type_code: i32, custom_label: Option<&str>) -> PhoneLabel {
    let label = match PhoneType::from_code(type_code) {
        Some(PhoneType::Custom) => {
            let probe = custom_label.unwrap_or("custom");
            let fallback = if is_messaging_label(probe) {
                "WhatsApp"
            } else {
                PhoneType::Custom.as_str()
            };
            custom_label.unwrap_or(fallback).to_string()
        }
        Some(phone_type) => phone_type.as_str().to_string(),
        None => GENERIC_LABEL.to_string(),
    };
    let is_messaging = is_messaging_label(&label);
    PhoneLabel {
        label,
        is_messaging,
    }
}
