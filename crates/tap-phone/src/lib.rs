//! Phone number handling for the favorites launcher.
//!
//! Pure, stateless functions shared by contact sync and by the launch path:
//!
//! - [`normalize`] turns a free-form number into the digit key used to match
//!   contacts.
//! - [`format_for_dialing`] / [`dial_number`] guess the country code and
//!   produce the digits a messaging deep link expects.
//! - [`classify`] maps a provider type code and custom label to a display
//!   label plus messaging affinity.
//! - [`plan_launch`] decides between opening a chat and placing a call.
//!
//! None of these fail. Inputs that are empty, too short or unrecognizable come
//! back best-effort, and the dial formatter marks them [`Clarity::Unclear`].

mod dial;
mod error;
mod label;
mod launch;
mod normalize;

pub use dial::{Clarity, DialNumber, DialRule, MIN_DIALABLE_DIGITS, dial_number, format_for_dialing};
pub use error::PhoneError;
pub use label::{GENERIC_LABEL, PhoneLabel, PhoneType, classify, is_messaging_label};
pub use launch::{
    ChatLink, LaunchPlan, MESSAGING_BUSINESS_PACKAGE, MESSAGING_PACKAGE, chat_links, plan_launch,
    tel_uri,
};
pub use normalize::{NANP_WITH_COUNTRY_CODE_LEN, digits_only, normalize, same_subscriber};
