//! Launch planning for a tapped contact.
//!
//! Messaging contacts open a chat through one of several deep links, tried in
//! order until one resolves; everyone else gets a voice call. Resolving and
//! starting the links is the platform's job, this module only decides what to
//! try.

use serde::Serialize;

use crate::dial::dial_number;

/// Package id of the consumer messaging app.
pub const MESSAGING_PACKAGE: &str = "com.whatsapp";
/// Package id of the business messaging app.
pub const MESSAGING_BUSINESS_PACKAGE: &str = "com.whatsapp.w4b";

/// One deep link bound to the app package that should handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLink {
    pub uri: String,
    pub package: &'static str,
}

/// What the launcher should do when a contact is tapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LaunchPlan {
    /// Try each link in order, fall back to calling `fallback_tel`.
    Chat {
        links: Vec<ChatLink>,
        fallback_tel: String,
    },
    /// Place a regular voice call.
    Call { tel_uri: String },
}

impl LaunchPlan {
    /// The `tel:` URI this plan ends in when nothing else works.
    pub fn tel_uri(&self) -> &str {
        match self {
            LaunchPlan::Chat { fallback_tel, .. } => fallback_tel,
            LaunchPlan::Call { tel_uri } => tel_uri,
        }
    }
}

/// Candidate chat links for a number, in the order they should be tried.
pub fn chat_links(raw: &str) -> Vec<ChatLink> {
    let digits = dial_number(raw).digits;
    vec![
        ChatLink {
            uri: format!("https://wa.me/{digits}"),
            package: MESSAGING_PACKAGE,
        },
        ChatLink {
            uri: format!("whatsapp://send?phone={digits}"),
            package: MESSAGING_PACKAGE,
        },
        ChatLink {
            uri: format!("https://wa.me/{digits}"),
            package: MESSAGING_BUSINESS_PACKAGE,
        },
    ]
}

/// `tel:` URI for a voice call. The number is passed as stored; the dialer
/// handles its own formatting.
pub fn tel_uri(raw: &str) -> String {
    format!("tel:{}", raw.trim())
}

/// Decide how to launch a contact.
pub fn plan_launch(raw: &str, is_messaging: bool, messaging_installed: bool) -> LaunchPlan {
    if is_messaging && messaging_installed {
        LaunchPlan::Chat {
            links: chat_links(raw),
            fallback_tel: tel_uri(raw),
        }
    } else {
        LaunchPlan::Call {
            tel_uri: tel_uri(raw),
        }
    }
}
