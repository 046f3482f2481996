//! Brazilian identifier formatters and validators.
//!
//! Every primitive works on both the canonical (punctuated) and raw-digit
//! representations. Formatting never truncates or pads: input that does not
//! carry the expected number of digits is handed back untouched.

mod checksum;
pub mod cnpj;
pub mod cpf;
pub mod creci;
pub mod phone;

/// Keep only ASCII digits.
pub(crate) fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when `input` holds nothing but digits, whitespace and the given separators.
pub(crate) fn only_digits_and(input: &str, separators: &[char]) -> bool {
    input
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || separators.contains(&c))
}
