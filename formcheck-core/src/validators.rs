// File: formcheck-core/src/validators.rs
//! Programmatic validation functions for the fields of a reader account.
//!
//! Every function here is a pure predicate over a single string: no shared
//! mutable state, no I/O, no message formatting. Malformed input of any kind
//! (wrong length, non-digits, empty strings, emoji, control characters)
//! yields `false`, never a panic. Turning a `false` into a user-facing
//! message is the job of [`crate::form`].
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a PESEL number.
pub const NATIONAL_ID_LENGTH: usize = 11;

/// Weights applied to the first ten digits of a PESEL number.
pub const NATIONAL_ID_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

// `[0-9]` rather than `\d`: the regex crate's `\d` also matches non-ASCII digits.
static POSTAL_CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\+48)?[0-9]{9}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static POLISH_LETTERS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend("ąćęłńóśźżĄĆĘŁŃÓŚŹŻ".chars());
    set
});

/// Validates a Polish national identification number (PESEL).
///
/// The input must be exactly eleven ASCII digits. Each of the first ten digits
/// is multiplied by its weight from [`NATIONAL_ID_WEIGHTS`], the last decimal
/// digit of every product is summed, and the check digit is
/// `(10 - sum % 10) % 10`. The number is valid iff the check digit equals the
/// eleventh digit.
///
/// # Arguments
///
/// * `id` - The candidate PESEL string.
///
/// # Returns
///
/// `true` if the string has the right shape and a matching check digit.
pub fn is_valid_national_id(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != NATIONAL_ID_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let digits: Vec<u32> = bytes.iter().map(|b| u32::from(b - b'0')).collect();

    let sum: u32 = digits
        .iter()
        .zip(NATIONAL_ID_WEIGHTS.iter())
        .map(|(digit, weight)| (digit * weight) % 10)
        .sum();

    let checksum = (10 - (sum % 10)) % 10;
    checksum == digits[NATIONAL_ID_LENGTH - 1]
}

/// Validates a Polish postal code in the `DD-DDD` form (e.g. `20-123`).
pub fn is_valid_postal_code(code: &str) -> bool {
    POSTAL_CODE_REGEX.is_match(code)
}

/// Validates a Polish phone number.
///
/// Spaces and hyphens are removed first; the remainder must be nine digits,
/// optionally preceded by the `+48` country prefix.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    PHONE_REGEX.is_match(&compact)
}

/// Validates a personal or street name.
///
/// Accepts ASCII letters, Polish accented letters, spaces and hyphens. Digits
/// and any other punctuation are rejected, as is the empty string.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || POLISH_LETTERS.contains(&c) || c == ' ' || c == '-')
}

/// Coarse email syntax check: `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validates an ISBN-10 or ISBN-13, ignoring hyphens and spaces.
///
/// ISBN-10 uses descending weights 10..1 modulo 11 and allows `X` (value 10)
/// as the check digit. ISBN-13 uses alternating weights 1 and 3 modulo 10.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let compact: Vec<char> = isbn.chars().filter(|c| !matches!(c, ' ' | '-')).collect();

    match compact.len() {
        10 => is_valid_isbn10(&compact),
        13 => is_valid_isbn13(&compact),
        _ => false,
    }
}

fn is_valid_isbn10(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let value = match c {
            'X' | 'x' if i == 9 => 10,
            _ => {
                let Some(d) = c.to_digit(10) else { return false; };
                d
            }
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

fn is_valid_isbn13(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let Some(d) = c.to_digit(10) else { return false; };
        sum += if i % 2 == 0 { d } else { d * 3 };
    }
    sum % 10 == 0
}

/// Checks that a value is a strictly positive whole number written in ASCII digits.
///
/// Arbitrarily long inputs are handled without parsing, so there is no overflow.
pub fn is_positive_integer(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && value.bytes().any(|b| b != b'0')
}

/// `true` when the value holds at least `min` characters (Unicode scalar values).
pub fn has_min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// `true` when the value holds at most `max` characters (Unicode scalar values).
pub fn has_max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}
