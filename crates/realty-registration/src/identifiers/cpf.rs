//! CPF (individual taxpayer registry): 11 digits, rendered `DDD.DDD.DDD-DD`.

use rand::Rng;

use super::checksum;
use super::{digits_only, only_digits_and};

pub const DIGITS: usize = 11;

const FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

pub fn strip(input: &str) -> String {
    digits_only(input)
}

/// Canonical `DDD.DDD.DDD-DD`, or the input unchanged when it does not hold 11 digits.
pub fn format(input: &str) -> String {
    let digits = strip(input);
    if digits.len() != DIGITS {
        return input.to_string();
    }

    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Exactly 11 digits once formatting is removed. Says nothing about the check digits.
pub fn is_valid_shape(input: &str) -> bool {
    strip(input).len() == DIGITS
}

/// Shape check that also refuses characters outside the canonical punctuation.
pub fn is_well_formed(input: &str) -> bool {
    only_digits_and(input, &['.', '-']) && is_valid_shape(input)
}

/// Full mod-11 verification of both check digits. Sequences of a single
/// repeated digit are rejected even though their check digits line up.
pub fn is_valid_checksum(input: &str) -> bool {
    let digits = checksum::parse_digits(input);
    checksum::verify(&digits, DIGITS, &FIRST_WEIGHTS, &SECOND_WEIGHTS)
}

/// Canonically formatted CPF with correct check digits, for test fixtures only.
pub fn generate_valid() -> String {
    generate_valid_with(&mut rand::thread_rng())
}

pub fn generate_valid_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits = checksum::generate(rng, &FIRST_WEIGHTS, &SECOND_WEIGHTS);
    format(&checksum::render(&digits))
}
