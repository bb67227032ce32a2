//! Serializable ISBN summaries and string-in/string-out helpers.

use serde::{Deserialize, Serialize};

use crate::{Isbn, Version};

/// Snapshot of a parsed ISBN, suitable for JSON output and FFI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct IsbnReport {
    pub input: String,
    pub valid: bool,
    /// 10 or 13; absent for malformed input
    pub version: Option<u32>,
    /// Canonical hyphenated form
    pub isbn: String,
    pub barcode: String,
    pub error: Option<String>,
}

impl IsbnReport {
    pub fn new(input: &str, isbn: &Isbn) -> Self {
        Self {
            input: input.to_string(),
            valid: isbn.is_valid(),
            version: match isbn.version() {
                Version::Unknown => None,
                version => Some(version.digit_count() as u32),
            },
            isbn: isbn.to_string(),
            barcode: isbn.barcode(),
            error: isbn.error().map(|e| e.to_string()),
        }
    }
}

/// Parse an ISBN and summarize it
pub fn inspect_isbn(input: String) -> IsbnReport {
    IsbnReport::new(&input, &Isbn::parse(&input))
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn inspect_isbn_ffi(input: String) -> IsbnReport {
    inspect_isbn(input)
}

/// Validate an ISBN-10 or ISBN-13 string
pub fn is_valid_isbn(input: String) -> bool {
    Isbn::parse(&input).is_valid()
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn is_valid_isbn_ffi(input: String) -> bool {
    is_valid_isbn(input)
}

/// Canonical ISBN-13 form of the input, or `None` if it cannot be parsed
pub fn normalize_isbn(input: String) -> Option<String> {
    let isbn = Isbn::parse(&input);
    if isbn.error().is_some() {
        return None;
    }
    Some(isbn.normalized().to_string())
}

#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn normalize_isbn_ffi(input: String) -> Option<String> {
    normalize_isbn(input)
}
