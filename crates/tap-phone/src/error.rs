//! Error types for phone vocabulary parsing.

use thiserror::Error;

/// Errors from parsing phone metadata supplied by users or files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PhoneError {
    /// Numeric type code outside the provider vocabulary.
    #[error("Unknown phone type code: {0}")]
    UnknownTypeCode(i32),

    /// Type name that matches no known phone type.
    #[error("Unknown phone type: {0}")]
    UnknownTypeName(String),
}
