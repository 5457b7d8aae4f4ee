//! International dialable form for messaging deep links.
//!
//! Messaging links want the full international number as bare digits
//! (`https://wa.me/442012345678`). Stored numbers are usually written the way
//! the user dialed them, so the country code has to be guessed from the shape
//! of the digits. The guess is a fixed precedence table, evaluated top to
//! bottom, first match wins:
//!
//! | Rule                  | Condition                                   | Output          |
//! |-----------------------|---------------------------------------------|-----------------|
//! | `TooShort`            | fewer than 7 digits                         | as-is (unclear) |
//! | `InternationalForm`   | written with `+`, or more than 11 digits    | as-is           |
//! | `NorthAmerica`        | `1` + 10 digits                             | as-is           |
//! | `India`               | `91` + 10 digits                            | as-is           |
//! | `UkOrGermany`         | `44`/`49`, at least 11 digits               | as-is           |
//! | `FranceItalyJapan`    | `33`/`39`/`81`, at least 10 digits          | as-is           |
//! | `China`               | `86`, at least 11 digits                    | as-is           |
//! | `BareNorthAmerica`    | 10 digits, first in `2..=9`                 | `1` prefix      |
//! | `BareIndia`           | 10 digits, first in `6..=9`                 | `91` prefix     |
//! | `UkTrunkPrefix`       | leading `0`, at least 10 digits             | `44` + rest     |
//! | `AssumedCountryCode`  | at least 10 digits                          | as-is           |
//! | `Unrecognized`        | anything else                               | as-is (unclear) |
//!
//! Two rows are shadowed by earlier ones and never match on their own:
//!
//! - `India` accepts exactly 12 digits, which `InternationalForm` already
//!   claims. The result is the same digits either way.
//! - `BareIndia` accepts 10 digits starting `6..=9`, all of which
//!   `BareNorthAmerica` takes first. A bare 10-digit number carries no country
//!   information, and the table resolves the overlap in favor of North
//!   America. Reordering the two rows is a product decision, not a fix.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Numbers with fewer digits than this are not formatted at all.
pub const MIN_DIALABLE_DIGITS: usize = 7;

/// Which row of the precedence table produced a dialable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialRule {
    TooShort,
    InternationalForm,
    NorthAmerica,
    India,
    UkOrGermany,
    FranceItalyJapan,
    China,
    BareNorthAmerica,
    BareIndia,
    UkTrunkPrefix,
    AssumedCountryCode,
    Unrecognized,
}

impl DialRule {
    /// Select the first matching rule for a digit string.
    fn select(digits: &str, had_plus: bool) -> Self {
        let len = digits.len();
        let first = digits.as_bytes().first().copied();

        if len < MIN_DIALABLE_DIGITS {
            return DialRule::TooShort;
        }
        if had_plus || len > 11 {
            return DialRule::InternationalForm;
        }
        if digits.starts_with('1') && len == 11 {
            return DialRule::NorthAmerica;
        }
        if digits.starts_with("91") && len == 12 {
            return DialRule::India;
        }
        if (digits.starts_with("44") || digits.starts_with("49")) && len >= 11 {
            return DialRule::UkOrGermany;
        }
        if ["33", "39", "81"].iter().any(|cc| digits.starts_with(*cc)) && len >= 10 {
            return DialRule::FranceItalyJapan;
        }
        if digits.starts_with("86") && len >= 11 {
            return DialRule::China;
        }
        if len == 10 && matches!(first, Some(b'2'..=b'9')) {
            return DialRule::BareNorthAmerica;
        }
        if len == 10 && matches!(first, Some(b'6'..=b'9')) {
            return DialRule::BareIndia;
        }
        if digits.starts_with('0') && len >= 10 {
            return DialRule::UkTrunkPrefix;
        }
        if len >= 10 {
            return DialRule::AssumedCountryCode;
        }
        DialRule::Unrecognized
    }

    /// Produce the dialable digits for a number this rule matched.
    fn apply(self, digits: String) -> String {
        match self {
            DialRule::BareNorthAmerica => format!("1{digits}"),
            DialRule::BareIndia => format!("91{digits}"),
            DialRule::UkTrunkPrefix => format!("44{}", &digits[1..]),
            _ => digits,
        }
    }

    /// Returns true when the number was rewritten rather than passed through.
    pub fn adds_country_code(&self) -> bool {
        matches!(
            self,
            DialRule::BareNorthAmerica | DialRule::BareIndia | DialRule::UkTrunkPrefix
        )
    }

    /// Confidence verdict for numbers matched by this rule.
    pub fn clarity(&self) -> Clarity {
        match self {
            DialRule::TooShort | DialRule::Unrecognized => Clarity::Unclear,
            _ => Clarity::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DialRule::TooShort => "too short",
            DialRule::InternationalForm => "international form",
            DialRule::NorthAmerica => "US/Canada",
            DialRule::India => "India",
            DialRule::UkOrGermany => "UK/Germany",
            DialRule::FranceItalyJapan => "France/Italy/Japan",
            DialRule::China => "China",
            DialRule::BareNorthAmerica => "bare US/Canada",
            DialRule::BareIndia => "bare India",
            DialRule::UkTrunkPrefix => "UK trunk prefix",
            DialRule::AssumedCountryCode => "assumed country code",
            DialRule::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for DialRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a dialable number can be trusted for a deep link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clarity {
    Clear,
    /// Too short or matched no country rule; the digits are passed through.
    Unclear,
}

impl Clarity {
    pub fn is_clear(&self) -> bool {
        matches!(self, Clarity::Clear)
    }
}

/// A formatted number together with how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialNumber {
    /// Digits only, no leading `+`.
    pub digits: String,
    /// Whether the source was written with a leading `+`.
    pub had_plus: bool,
    pub rule: DialRule,
}

impl DialNumber {
    pub fn clarity(&self) -> Clarity {
        self.rule.clarity()
    }
}

/// Split a raw number into (had leading `+`, digits).
fn clean(raw: &str) -> (bool, String) {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let had_plus = kept.starts_with('+');
    let digits = kept.chars().filter(char::is_ascii_digit).collect();
    (had_plus, digits)
}

/// Format a number and report which rule matched.
///
/// Never fails: numbers that are too short or unrecognizable come back
/// unchanged with [`Clarity::Unclear`], and a warning is logged.
pub fn dial_number(raw: &str) -> DialNumber {
    let (had_plus, digits) = clean(raw);
    let rule = DialRule::select(&digits, had_plus);
    let digits = rule.apply(digits);

    match rule.clarity() {
        Clarity::Clear => debug!(rule = %rule, had_plus, "formatted number for dialing"),
        Clarity::Unclear => warn!(
            rule = %rule,
            digit_count = digits.len(),
            "unclear phone number format"
        ),
    }

    DialNumber {
        digits,
        had_plus,
        rule,
    }
}

/// Convert a free-form number into international digits for a deep link.
///
/// # Example
/// ```
/// use tap_phone::format_for_dialing;
///
/// assert_eq!(format_for_dialing("2345678901"), "12345678901");
/// assert_eq!(format_for_dialing("020 1234 5678"), "442012345678");
/// ```
pub fn format_for_dialing(raw: &str) -> String {
    dial_number(raw).digits
}
