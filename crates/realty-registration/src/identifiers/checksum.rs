//! Weighted modulo-11 check digits shared by CPF and CNPJ.

use rand::Rng;

pub(crate) fn parse_digits(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

pub(crate) fn is_repeated_sequence(digits: &[u32]) -> bool {
    match digits.split_first() {
        Some((first, rest)) => rest.iter().all(|digit| digit == first),
        None => true,
    }
}

pub(crate) fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(digit, weight)| digit * weight)
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        remainder => 11 - remainder,
    }
}

/// Verify both trailing check digits. `first` and `second` are the weight
/// tables; their lengths decide how many leading digits each pass covers.
pub(crate) fn verify(digits: &[u32], expected_len: usize, first: &[u32], second: &[u32]) -> bool {
    if digits.len() != expected_len || is_repeated_sequence(digits) {
        return false;
    }

    let first_len = first.len();
    let second_len = second.len();

    check_digit(&digits[..first_len], first) == digits[first_len]
        && check_digit(&digits[..second_len], second) == digits[second_len]
}

/// Draw a random base and append both check digits. Bases that would produce
/// an all-identical sequence are redrawn since the verifier rejects them.
pub(crate) fn generate<R: Rng + ?Sized>(rng: &mut R, first: &[u32], second: &[u32]) -> Vec<u32> {
    loop {
        let mut digits: Vec<u32> = (0..first.len()).map(|_| rng.gen_range(0..10)).collect();
        digits.push(check_digit(&digits, first));
        digits.push(check_digit(&digits, second));

        if !is_repeated_sequence(&digits) {
            return digits;
        }
    }
}

pub(crate) fn render(digits: &[u32]) -> String {
    digits
        .iter()
        .filter_map(|digit| char::from_digit(*digit, 10))
        .collect()
}
