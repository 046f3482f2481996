//! Brazilian phone numbers: `(DD) DDDDD-DDDD` for mobiles, `(DD) DDDD-DDDD` for landlines.
//!
//! Formatting is purely shape based. Area codes and carrier prefixes are not checked.

use super::digits_only;

pub const MOBILE_DIGITS: usize = 11;
pub const LANDLINE_DIGITS: usize = 10;

pub fn strip(input: &str) -> String {
    digits_only(input)
}

pub fn format(input: &str) -> String {
    let digits = strip(input);

    match digits.len() {
        MOBILE_DIGITS => format!("({}) {}-{}", &digits[0..2], &digits[2..7], &digits[7..]),
        LANDLINE_DIGITS => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..]),
        _ => input.to_string(),
    }
}

pub fn is_valid(input: &str) -> bool {
    matches!(strip(input).len(), LANDLINE_DIGITS | MOBILE_DIGITS)
}

pub fn is_mobile(input: &str) -> bool {
    strip(input).len() == MOBILE_DIGITS
}

pub fn is_landline(input: &str) -> bool {
    strip(input).len() == LANDLINE_DIGITS
}
