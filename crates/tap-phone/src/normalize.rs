//! Canonical matching keys for phone numbers.
//!
//! The key is the digit-only form of a number with the North American country
//! code collapsed, so `+1 (234) 567-8901` and `234-567-8901` match the same
//! subscriber.
//!
//! # Known approximation
//!
//! Any 11-digit number starting with `1` loses its leading digit, including
//! national numbers from other plans that happen to have that shape. Callers
//! rely on this exact behavior for matching stored contacts, so it is kept.

use tracing::trace;

/// Length of a North American number written with its country code.
pub const NANP_WITH_COUNTRY_CODE_LEN: usize = 11;

/// Keep only the ASCII decimal digits of `raw`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Convert a free-form phone number into its matching key.
///
/// Non-digit characters are dropped. An 11-digit result starting with `1`
/// loses the leading `1`. Empty or digit-free input yields an empty key;
/// whether that is usable is the caller's decision.
///
/// # Example
/// ```
/// use tap_phone::normalize;
///
/// assert_eq!(normalize("+1 (234) 567-8901"), "2345678901");
/// assert_eq!(normalize("+91 98765 43210"), "919876543210");
/// ```
pub fn normalize(raw: &str) -> String {
    let digits = digits_only(raw);
    let key = match digits.strip_prefix('1') {
        Some(national) if digits.len() == NANP_WITH_COUNTRY_CODE_LEN => national.to_string(),
        _ => digits,
    };
    trace!(key_len = key.len(), "normalized phone number");
    key
}

/// Returns true when two raw numbers normalize to the same non-empty key.
pub fn same_subscriber(a: &str, b: &str) -> bool {
    let key = normalize(a);
    !key.is_empty() && key == normalize(b)
}
