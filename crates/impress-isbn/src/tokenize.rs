//! Input tokenization.
//!
//! Strips an optional `ISBN` label (with its `-10`/`-13` version hint) and
//! splits the remaining text on runs of hyphens and whitespace.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{IsbnError, Version};

lazy_static! {
    // "ISBN", "isbn:", "ISBN-10", "ISBN13:" ...
    static ref LABEL_REGEX: Regex =
        Regex::new(r"^(?i:isbn)(?:-?(?P<version>10|13)\b)?:?").unwrap();

    static ref SEPARATOR_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
}

/// Tokenized ISBN input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// Version named by an `ISBN-10`/`ISBN-13` label, if any
    pub hint: Option<Version>,
    /// Digit groups in input order; the last one ends with the check character
    pub groups: Vec<&'a str>,
}

/// Split free-form ISBN text into digit groups.
///
/// Only digits, `X`/`x`, hyphens and whitespace may follow the label.
///
/// # Examples
/// ```
/// use impress_isbn::{tokenize, Version};
/// let tokens = tokenize("ISBN-10 0-393-04002-X").unwrap();
/// assert_eq!(tokens.hint, Some(Version::Ten));
/// assert_eq!(tokens.groups, vec!["0", "393", "04002", "X"]);
/// ```
pub fn tokenize(input: &str) -> Result<Tokens<'_>, IsbnError> {
    let mut rest = input.trim();
    let mut hint = None;

    if let Some(caps) = LABEL_REGEX.captures(rest) {
        hint = caps.name("version").map(|m| match m.as_str() {
            "10" => Version::Ten,
            _ => Version::Thirteen,
        });
        rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
    }

    if let Some(c) = rest
        .chars()
        .find(|&c| !(c.is_ascii_digit() || matches!(c, 'X' | 'x' | '-') || c.is_whitespace()))
    {
        return Err(IsbnError::InvalidCharacter(c));
    }

    let groups = SEPARATOR_REGEX
        .split(rest)
        .filter(|group| !group.is_empty())
        .collect();

    Ok(Tokens { hint, groups })
}
