//! Check digit arithmetic for ISBN-10 (mod 11) and ISBN-13 (mod 10).
//!
//! Both functions expect the digits *without* the check digit. Callers are
//! responsible for handing in ASCII digits only; the parser guarantees this
//! for every structured [`Isbn`](crate::Isbn).

const VERSION_10_MOD: u32 = 11;
const VERSION_13_MOD: u32 = 10;

/// Weight of the digit at `index` in an ISBN-13: 1, 3, 1, 3, ...
fn weight_13(index: usize) -> u32 {
    if index % 2 == 0 {
        1
    } else {
        3
    }
}

/// Weight of the digit at `index` in an ISBN-10: 10, 9, ..., 2
fn weight_10(index: usize) -> u32 {
    10 - index as u32
}

fn weighted_sum(digits: &str, weight: fn(usize) -> u32) -> u32 {
    digits
        .chars()
        .enumerate()
        .map(|(i, c)| c.to_digit(10).unwrap_or(0) * weight(i))
        .sum()
}

/// Compute the ISBN-13 check digit for the 12 leading digits.
///
/// # Examples
/// ```
/// use impress_isbn::compute_check_digit_13;
/// assert_eq!(compute_check_digit_13("978039304002"), '9');
/// assert_eq!(compute_check_digit_13("978077777777"), '0');
/// ```
pub fn compute_check_digit_13(digits: &str) -> char {
    let mut remainder = weighted_sum(digits, weight_13) % VERSION_13_MOD;
    if remainder == 0 {
        remainder = VERSION_13_MOD;
    }

    char::from_digit(VERSION_13_MOD - remainder, 10).unwrap_or('0')
}

/// Compute the ISBN-10 check character for the 9 leading digits.
///
/// A value of 10 is rendered as `'X'`. When the weighted sum is a multiple
/// of 11 the result is `'0'` (the ISO value), not `'X'` as some older
/// implementations return.
///
/// # Examples
/// ```
/// use impress_isbn::compute_check_digit_10;
/// assert_eq!(compute_check_digit_10("039304002"), 'X');
/// assert_eq!(compute_check_digit_10("030640615"), '2');
/// ```
pub fn compute_check_digit_10(digits: &str) -> char {
    let digit = VERSION_10_MOD - weighted_sum(digits, weight_10) % VERSION_10_MOD;
    match digit {
        10 => 'X',
        // sum is a multiple of 11
        11 => '0',
        d => char::from_digit(d, 10).unwrap_or('0'),
    }
}
