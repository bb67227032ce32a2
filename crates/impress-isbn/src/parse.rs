//! Structural ISBN parsing.
//!
//! Turns tokenized input into an [`Isbn`] record. Grouped input (4 or 5
//! digit groups) is assigned field by field; a solid run of digits is split
//! using the registration group and registrant range tables.

use crate::{tokenize, Isbn, IsbnError, Version};

/// Prefix prepended when converting an ISBN-10 to an ISBN-13.
pub const DEFAULT_PREFIX: &str = "978";

/// EAN prefixes allocated to books.
pub const BOOKLAND_PREFIXES: &[&str] = &["978", "979"];

const PREFIX_LENGTH: usize = 3;
const LOOKAHEAD_LENGTH: usize = 5;
const MAX_GROUP_LENGTH: usize = 5;
// group + registrant + publication, for either version
const BODY_LENGTH: usize = 9;

/// Parse free-form text into an [`Isbn`] record.
///
/// Never fails: malformed input yields a record carrying an [`IsbnError`].
///
/// # Examples
/// ```
/// use impress_isbn::{parse_isbn, Version};
/// let isbn = parse_isbn("ISBN 978-0-7777-7777-0");
/// assert_eq!(isbn.version(), Version::Thirteen);
/// assert!(isbn.is_valid());
///
/// let broken = parse_isbn("12345");
/// assert!(broken.error().is_some());
/// assert!(!broken.is_valid());
/// ```
pub fn parse_isbn(input: &str) -> Isbn {
    match parse_fields(input) {
        Ok(isbn) => isbn,
        Err(err) => {
            tracing::debug!("Rejected ISBN input {:?}: {}", input, err);
            Isbn::from_error(err)
        }
    }
}

fn parse_fields(input: &str) -> Result<Isbn, IsbnError> {
    let tokens = tokenize(input)?;

    let isbn = match tokens.groups.as_slice() {
        [group, registrant, publication, check] => {
            split_fields(Version::Ten, "", group, registrant, publication, check)?
        }
        [prefix, group, registrant, publication, check] => {
            split_fields(Version::Thirteen, prefix, group, registrant, publication, check)?
        }
        [run] => infer_fields(run)?,
        groups => {
            return Err(IsbnError::WrongFormat {
                tokens: groups.len() as u32,
            })
        }
    };

    if let Some(hint) = tokens.hint {
        if hint != isbn.version() {
            return Err(IsbnError::VersionMismatch {
                hint,
                parsed: isbn.version(),
            });
        }
    }

    Ok(isbn)
}

/// Assign already separated groups to fields.
fn split_fields(
    version: Version,
    prefix: &str,
    group: &str,
    registrant: &str,
    publication: &str,
    check: &str,
) -> Result<Isbn, IsbnError> {
    for field in [prefix, group, registrant, publication] {
        if let Some(c) = field.chars().find(|c| !c.is_ascii_digit()) {
            return Err(IsbnError::InvalidCharacter(c));
        }
    }

    if version == Version::Thirteen && !BOOKLAND_PREFIXES.contains(&prefix) {
        return Err(IsbnError::InvalidPrefix(prefix.to_string()));
    }

    if group.len() > MAX_GROUP_LENGTH {
        return Err(IsbnError::InvalidGroup);
    }

    build(version, prefix, group, registrant, publication, check)
}

/// Split a solid run of characters using the range tables.
///
/// A run starting with `978` is only read as prefixed when it is not exactly
/// 10 characters long; a 10-character run is always an ISBN-10 (978 is also
/// a registration group). Group and registrant must leave at least one
/// publication digit before the check character.
fn infer_fields(run: &str) -> Result<Isbn, IsbnError> {
    let last_idx = run.len().saturating_sub(1);
    if let Some(c) = run[..last_idx].chars().find(|c| !c.is_ascii_digit()) {
        return Err(IsbnError::InvalidCharacter(c));
    }

    let prefix = slice(run, 0, PREFIX_LENGTH)?;

    // A 10-character run has no room for a prefix
    let (version, prefix) = if prefix == DEFAULT_PREFIX && run.len() != Version::Ten.digit_count() {
        (Version::Thirteen, prefix)
    } else {
        (Version::Ten, "")
    };
    let mut idx = prefix.len();

    let group_length = registration_group_length(lookahead(run, idx));
    if group_length == 0 {
        return Err(IsbnError::InvalidGroup);
    }
    let group = slice(run, idx, group_length)?;
    idx += group_length;

    let registrant_length = registrant_length(lookahead(run, idx));
    if registrant_length == 0 {
        return Err(IsbnError::InvalidRegistrant);
    }
    let registrant = slice(run, idx, registrant_length)?;
    idx += registrant_length;

    if idx >= last_idx {
        return Err(IsbnError::Truncated);
    }
    let publication = &run[idx..last_idx];
    let check = &run[last_idx..];

    build(version, prefix, group, registrant, publication, check)
}

/// Enforce the checks shared by both parsing paths and build the record.
fn build(
    version: Version,
    prefix: &str,
    group: &str,
    registrant: &str,
    publication: &str,
    check: &str,
) -> Result<Isbn, IsbnError> {
    let mut chars = check.chars();
    let check_digit = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => c,
        (Some(c @ ('X' | 'x')), None) if version == Version::Ten => c,
        _ => return Err(IsbnError::InvalidCheckDigit(check.to_string())),
    };

    let body = group.len() + registrant.len() + publication.len();
    if body != BODY_LENGTH {
        return Err(IsbnError::WrongLength {
            version,
            len: (prefix.len() + body + 1) as u32,
        });
    }

    Ok(Isbn::from_parts(
        version,
        prefix,
        group,
        registrant,
        publication,
        check_digit,
    ))
}

/// Read the next [`LOOKAHEAD_LENGTH`] characters as a number.
///
/// Yields 0 when fewer characters remain.
fn lookahead(input: &str, start: usize) -> u32 {
    input
        .get(start..start + LOOKAHEAD_LENGTH)
        .map(|window| {
            window
                .chars()
                .fold(0, |acc, c| acc * 10 + c.to_digit(10).unwrap_or(0))
        })
        .unwrap_or(0)
}

fn slice(input: &str, start: usize, length: usize) -> Result<&str, IsbnError> {
    input.get(start..start + length).ok_or(IsbnError::Truncated)
}

/// Length of the registration group element, keyed by the five digits that
/// start it. Returns 0 for reserved or exhausted ranges.
///
/// # Examples
/// ```
/// use impress_isbn::registration_group_length;
/// assert_eq!(registration_group_length(7777), 1);
/// assert_eq!(registration_group_length(65000), 0);
/// assert_eq!(registration_group_length(99950), 5);
/// ```
pub fn registration_group_length(value: u32) -> usize {
    match value {
        0..=59_999 => 1,
        60_000..=69_999 => 0,
        70_000..=79_999 => 1,
        80_000..=94_999 => 2,
        95_000..=98_999 => 3,
        99_000..=99_899 => 4,
        99_900..=99_998 => 5,
        _ => 0,
    }
}

/// Length of the registrant element, keyed by the five digits that start it.
/// Returns 0 when the value has no allocated range.
///
/// The bands are not monotonic (4 digits, then 2, then 4 again). Changing a
/// band changes which solid runs parse.
pub fn registrant_length(value: u32) -> usize {
    match value {
        0..=19_999 => 2,
        20_000..=49_999 => 3,
        50_000..=88_999 => 4,
        89_000..=94_999 => 2,
        95_000..=98_999 => 4,
        99_000..=99_999 => 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_solid_isbn13() {
        let isbn = parse_isbn("9780777777770");
        assert_eq!(isbn.error(), None);
        assert_eq!(isbn.version(), Version::Thirteen);
        assert_eq!(isbn.prefix(), "978");
        assert_eq!(isbn.registration_group(), "0");
        assert_eq!(isbn.registrant(), "7777");
        assert_eq!(isbn.publication(), "7777");
        assert_eq!(isbn.check_digit(), "0");
    }

    #[test]
    fn parse_solid_isbn10() {
        let isbn = parse_isbn("039304002X");
        assert_eq!(isbn.version(), Version::Ten);
        assert_eq!(isbn.prefix(), "");
        assert_eq!(isbn.registration_group(), "0");
        assert_eq!(isbn.registrant(), "393");
        assert_eq!(isbn.publication(), "04002");
        assert_eq!(isbn.check_digit(), "X");
    }

    #[test]
    fn parse_grouped_isbn10() {
        let isbn = parse_isbn("0-393-04002-X");
        assert_eq!(isbn, parse_isbn("039304002X"));
    }

    #[test]
    fn parse_grouped_isbn13() {
        let isbn = parse_isbn("978 0 7777 7777 0");
        assert_eq!(isbn, parse_isbn("9780777777770"));
    }

    #[test]
    fn grouped_fields_are_taken_as_written() {
        // Hyphenation is not re-derived from the range tables
        let isbn = parse_isbn("978-03-930-4002-9");
        assert_eq!(isbn.registration_group(), "03");
        assert_eq!(isbn.registrant(), "930");
        assert_eq!(isbn.publication(), "4002");
    }

    #[test]
    fn ten_character_run_starting_with_978_is_isbn10() {
        // 978 is also a registration group (Nigeria)
        let isbn = parse_isbn("9789781234");
        assert_eq!(isbn.version(), Version::Ten);
        assert_eq!(isbn.prefix(), "");
        assert_eq!(isbn.registration_group(), "978");
    }

    #[test]
    fn wrong_token_count() {
        assert_eq!(
            parse_isbn("978-0777777770").error(),
            Some(&IsbnError::WrongFormat { tokens: 2 })
        );
        assert_eq!(
            parse_isbn("").error(),
            Some(&IsbnError::WrongFormat { tokens: 0 })
        );
        assert_eq!(
            parse_isbn("978-0-7-7777-7777-0").error(),
            Some(&IsbnError::WrongFormat { tokens: 6 })
        );
    }

    #[test]
    fn short_run_is_rejected() {
        assert_eq!(parse_isbn("12").error(), Some(&IsbnError::Truncated));
        assert!(parse_isbn("12345").error().is_some());
    }

    #[test]
    fn empty_publication_is_truncated() {
        // group 4 + registrant 5 leaves nothing before the check digit
        assert_eq!(parse_isbn("9900999991").error(), Some(&IsbnError::Truncated));
        assert_eq!(parse_isbn("9789900999990").error(), Some(&IsbnError::Truncated));
        // group 5 + registrant 4
        assert_eq!(parse_isbn("9990050001").error(), Some(&IsbnError::Truncated));
    }

    #[test]
    fn reserved_group_is_rejected() {
        assert_eq!(parse_isbn("6123456789").error(), Some(&IsbnError::InvalidGroup));
        assert_eq!(parse_isbn("9999912345").error(), Some(&IsbnError::InvalidGroup));
    }

    #[test]
    fn run_of_wrong_length_is_rejected() {
        let isbn = parse_isbn("03930400212");
        assert_eq!(
            isbn.error(),
            Some(&IsbnError::WrongLength {
                version: Version::Ten,
                len: 11
            })
        );
        assert_eq!(isbn.version(), Version::Unknown);
    }

    #[test]
    fn x_only_allowed_as_isbn10_check() {
        assert_eq!(
            parse_isbn("03930X0021").error(),
            Some(&IsbnError::InvalidCharacter('X'))
        );
        assert_eq!(
            parse_isbn("978-0-7777-7777-X").error(),
            Some(&IsbnError::InvalidCheckDigit("X".to_string()))
        );
        assert_eq!(
            parse_isbn("0-393-0400X-2").error(),
            Some(&IsbnError::InvalidCharacter('X'))
        );
    }

    #[test]
    fn check_group_must_be_one_character() {
        assert_eq!(
            parse_isbn("0-393-0400-2X").error(),
            Some(&IsbnError::InvalidCheckDigit("2X".to_string()))
        );
    }

    #[test]
    fn grouped_isbn13_needs_bookland_prefix() {
        assert_eq!(
            parse_isbn("977-0-7777-7777-0").error(),
            Some(&IsbnError::InvalidPrefix("977".to_string()))
        );
        assert!(parse_isbn("979-10-90636-07-1").error().is_none());
    }

    #[test]
    fn grouped_body_must_total_nine_digits() {
        assert_eq!(
            parse_isbn("0-393-040021-X").error(),
            Some(&IsbnError::WrongLength {
                version: Version::Ten,
                len: 11
            })
        );
    }

    #[test]
    fn version_hint_must_agree() {
        assert!(parse_isbn("ISBN-10 0-393-04002-X").error().is_none());
        assert!(parse_isbn("ISBN-13 978-0-7777-7777-0").error().is_none());
        assert_eq!(
            parse_isbn("ISBN-13 0-393-04002-X").error(),
            Some(&IsbnError::VersionMismatch {
                hint: Version::Thirteen,
                parsed: Version::Ten
            })
        );
        assert_eq!(
            parse_isbn("ISBN-10 9780777777770").error(),
            Some(&IsbnError::VersionMismatch {
                hint: Version::Ten,
                parsed: Version::Thirteen
            })
        );
    }

    #[test]
    fn lookahead_reads_five_digits() {
        assert_eq!(lookahead("9780777777770", 3), 7777);
        assert_eq!(lookahead("9780777777770", 4), 77777);
        assert_eq!(lookahead("1234", 0), 0);
    }

    #[test]
    fn group_length_bands() {
        assert_eq!(registration_group_length(0), 1);
        assert_eq!(registration_group_length(59_999), 1);
        assert_eq!(registration_group_length(60_000), 0);
        assert_eq!(registration_group_length(69_999), 0);
        assert_eq!(registration_group_length(70_000), 1);
        assert_eq!(registration_group_length(80_000), 2);
        assert_eq!(registration_group_length(95_000), 3);
        assert_eq!(registration_group_length(99_000), 4);
        assert_eq!(registration_group_length(99_900), 5);
        assert_eq!(registration_group_length(99_998), 5);
        assert_eq!(registration_group_length(99_999), 0);
    }

    #[test]
    fn registrant_length_bands() {
        assert_eq!(registrant_length(0), 2);
        assert_eq!(registrant_length(19_999), 2);
        assert_eq!(registrant_length(20_000), 3);
        assert_eq!(registrant_length(50_000), 4);
        assert_eq!(registrant_length(88_999), 4);
        assert_eq!(registrant_length(89_000), 2);
        assert_eq!(registrant_length(95_000), 4);
        assert_eq!(registrant_length(99_000), 5);
        assert_eq!(registrant_length(99_999), 5);
        assert_eq!(registrant_length(100_000), 0);
    }
}
