//! CNPJ (company taxpayer registry): 14 digits, rendered `DD.DDD.DDD/DDDD-DD`.

use rand::Rng;

use super::checksum;
use super::{digits_only, only_digits_and};

pub const DIGITS: usize = 14;

const FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

pub fn strip(input: &str) -> String {
    digits_only(input)
}

pub fn format(input: &str) -> String {
    let digits = strip(input);
    if digits.len() != DIGITS {
        return input.to_string();
    }

    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

pub fn is_valid_shape(input: &str) -> bool {
    strip(input).len() == DIGITS
}

pub fn is_well_formed(input: &str) -> bool {
    only_digits_and(input, &['.', '/', '-']) && is_valid_shape(input)
}

pub fn is_valid_checksum(input: &str) -> bool {
    let digits = checksum::parse_digits(input);
    checksum::verify(&digits, DIGITS, &FIRST_WEIGHTS, &SECOND_WEIGHTS)
}

/// Canonically formatted CNPJ with correct check digits, for test fixtures only.
pub fn generate_valid() -> String {
    generate_valid_with(&mut rand::thread_rng())
}

pub fn generate_valid_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let digits = checksum::generate(rng, &FIRST_WEIGHTS, &SECOND_WEIGHTS);
    format(&checksum::render(&digits))
}
