//! Error types for impress-isbn

use thiserror::Error;

use crate::Version;

/// Reasons an input string could not be structured into an ISBN.
///
/// Every variant is a kind of malformed input; there is no other error
/// class. [`Isbn::parse`](crate::Isbn::parse) stores them on the record;
/// `FromStr` returns them as `Err`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum IsbnError {
    /// Separators split the input into an unsupported number of groups
    #[error("wrong input ISBN format: expected 1, 4 or 5 digit groups, found {tokens}")]
    WrongFormat { tokens: u32 },

    /// A character that is neither a digit, a check `X`, nor a separator
    #[error("invalid character {0:?} in ISBN")]
    InvalidCharacter(char),

    /// A 13-digit ISBN whose prefix is not a bookland prefix
    #[error("unknown ISBN prefix: {0}")]
    InvalidPrefix(String),

    /// The registration group falls in a reserved or exhausted range
    #[error("registration group out of range")]
    InvalidGroup,

    /// The registrant falls in a range with no allocated length
    #[error("registrant out of range")]
    InvalidRegistrant,

    /// The check character is missing, too long, or not allowed for the version
    #[error("invalid check digit: {0:?}")]
    InvalidCheckDigit(String),

    /// Input ended before a required field could be read
    #[error("ISBN is truncated")]
    Truncated,

    /// Fields do not add up to 10 or 13 characters
    #[error("ISBN-{version} must have {} characters, found {len}", .version.digit_count())]
    WrongLength { version: Version, len: u32 },

    /// `ISBN-10`/`ISBN-13` label disagrees with the parsed structure
    #[error("labelled as ISBN-{hint} but parsed as ISBN-{parsed}")]
    VersionMismatch { hint: Version, parsed: Version },
}

/// Errors that can occur when loading an [`IsbnConfig`](crate::IsbnConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
