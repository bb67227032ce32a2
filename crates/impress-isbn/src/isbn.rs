//! Core ISBN types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parse::{parse_isbn, DEFAULT_PREFIX};
use crate::{compute_check_digit_10, compute_check_digit_13, IsbnError};

/// ISBN version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Version {
    /// Not parsed, or the input was malformed
    #[default]
    Unknown,
    /// Legacy 10-digit ISBN
    Ten,
    /// 13-digit ISBN with a bookland prefix
    Thirteen,
}

impl Version {
    /// Number of characters in an ISBN of this version (0 when unknown).
    pub fn digit_count(&self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Ten => 10,
            Self::Thirteen => 13,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Ten => f.write_str("10"),
            Self::Thirteen => f.write_str("13"),
        }
    }
}

/// A parsed ISBN.
///
/// A record is either fully structured or carries an [`IsbnError`]; a
/// malformed record has [`Version::Unknown`] and empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Isbn {
    version: Version,
    prefix: String,
    registration_group: String,
    registrant: String,
    publication: String,
    check_digit: String,
    error: Option<IsbnError>,
}

impl Isbn {
    /// Parse free-form text. See [`parse_isbn`].
    pub fn parse(input: &str) -> Self {
        parse_isbn(input)
    }

    pub(crate) fn from_parts(
        version: Version,
        prefix: &str,
        registration_group: &str,
        registrant: &str,
        publication: &str,
        check_digit: char,
    ) -> Self {
        Self {
            version,
            prefix: prefix.to_string(),
            registration_group: registration_group.to_string(),
            registrant: registrant.to_string(),
            publication: publication.to_string(),
            check_digit: check_digit.to_string(),
            error: None,
        }
    }

    pub(crate) fn from_error(error: IsbnError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Why the input could not be parsed, if it could not.
    pub fn error(&self) -> Option<&IsbnError> {
        self.error.as_ref()
    }

    /// Bookland prefix; empty for ISBN-10.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registration_group(&self) -> &str {
        &self.registration_group
    }

    pub fn registrant(&self) -> &str {
        &self.registrant
    }

    pub fn publication(&self) -> &str {
        &self.publication
    }

    /// Check character as written in the input (`x` is not upper-cased).
    pub fn check_digit(&self) -> &str {
        &self.check_digit
    }

    /// Group, registrant and publication digits without separators.
    fn body(&self) -> String {
        [
            self.registration_group.as_str(),
            self.registrant.as_str(),
            self.publication.as_str(),
        ]
        .concat()
    }

    /// The check character this record should carry, or `None` for a
    /// malformed or unversioned record.
    pub fn expected_check_digit(&self) -> Option<char> {
        if self.error.is_some() {
            return None;
        }

        match self.version {
            Version::Ten => Some(compute_check_digit_10(&self.body())),
            Version::Thirteen => Some(compute_check_digit_13(&(self.prefix.clone() + &self.body()))),
            Version::Unknown => None,
        }
    }

    /// Whether the check digit matches the rest of the number.
    ///
    /// Always false for malformed records.
    pub fn is_valid(&self) -> bool {
        let mut chars = self.check_digit.chars();
        let check = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return false,
        };

        self.expected_check_digit()
            .is_some_and(|expected| expected.eq_ignore_ascii_case(&check))
    }

    /// Convert to ISBN-13 in place, recomputing the check digit.
    ///
    /// Malformed records and valid ISBN-13s are left untouched. The group,
    /// registrant and publication are never changed.
    pub fn normalize(&mut self) {
        if self.error.is_some() || (self.version == Version::Thirteen && self.is_valid()) {
            return;
        }

        self.prefix = DEFAULT_PREFIX.to_string();
        self.version = Version::Thirteen;
        self.check_digit = compute_check_digit_13(&(self.prefix.clone() + &self.body())).to_string();
    }

    /// By-value form of [`Isbn::normalize`].
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// All fields concatenated without separators or label.
    ///
    /// # Examples
    /// ```
    /// use impress_isbn::Isbn;
    /// assert_eq!(Isbn::parse("ISBN 0-393-04002-X").barcode(), "039304002X");
    /// ```
    pub fn barcode(&self) -> String {
        [
            self.prefix.as_str(),
            self.registration_group.as_str(),
            self.registrant.as_str(),
            self.publication.as_str(),
            self.check_digit.as_str(),
        ]
        .concat()
    }
}

/// Canonical hyphenated form, e.g. `ISBN 978-0-393-04002-9`.
/// Renders nothing for a malformed record.
impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Version::Ten => write!(
                f,
                "ISBN {}-{}-{}-{}",
                self.registration_group, self.registrant, self.publication, self.check_digit
            ),
            Version::Thirteen => write!(
                f,
                "ISBN {}-{}-{}-{}-{}",
                self.prefix,
                self.registration_group,
                self.registrant,
                self.publication,
                self.check_digit
            ),
            Version::Unknown => Ok(()),
        }
    }
}

/// Strict parse: fails on malformed input but does not check the check digit.
impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let isbn = parse_isbn(s);
        match isbn.error {
            Some(err) => Err(err),
            None => Ok(isbn),
        }
    }
}
