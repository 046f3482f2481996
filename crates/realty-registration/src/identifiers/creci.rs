//! CRECI (real-estate broker license): region letters plus a digit run.
//!
//! There is no public check-digit algorithm, so validation is structural only.
//! The canonical rendering is `CRECI/<UF>-<digits>`.

use once_cell::sync::Lazy;
use regex::Regex;

static RAW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2})?(\d+)$").expect("raw CRECI pattern compiles"));
static CANONICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^CRECI/?([A-Z]{2})-?(\d+)$").expect("canonical CRECI pattern compiles")
});
static PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CRECI/?").expect("CRECI prefix pattern compiles"));
static STRIPPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}\d+$").expect("stripped CRECI pattern compiles"));

fn compact(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn canonical(region: &str, number: &str) -> String {
    format!("CRECI/{region}-{number}")
}

/// Uppercase and drop the `CRECI/` prefix, hyphens and whitespace, leaving `<UF><digits>`.
pub fn strip(input: &str) -> String {
    let upper = compact(input);
    PREFIX.replace_all(&upper, "").replace('-', "")
}

/// Render `CRECI/<UF>-<digits>`.
///
/// A bare digit run has no region to infer, so only the digits are returned.
/// Input that is neither raw (`SP123456`) nor canonical comes back unchanged.
pub fn format(input: &str) -> String {
    let text = compact(input);

    if let Some(captures) = RAW.captures(&text) {
        return match captures.get(1) {
            Some(region) => canonical(region.as_str(), &captures[2]),
            None => captures[2].to_string(),
        };
    }

    if let Some(captures) = CANONICAL.captures(&text) {
        return canonical(&captures[1], &captures[2]);
    }

    input.to_string()
}

pub fn is_valid_shape(input: &str) -> bool {
    STRIPPED.is_match(&strip(input))
}

pub fn extract_region(input: &str) -> Option<String> {
    let stripped = strip(input);
    let region: String = stripped.chars().take(2).collect();

    (region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase())).then_some(region)
}

pub fn extract_number(input: &str) -> Option<String> {
    let digits: String = strip(input).chars().filter(|c| c.is_ascii_digit()).collect();
    (!digits.is_empty()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_region_and_number() {
        assert_eq!(format("SP123456"), "CRECI/SP-123456");
        assert_eq!(format("mg 987654"), "CRECI/MG-987654");
    }

    #[test]
    fn digits_without_region_stay_unformatted() {
        assert_eq!(format("123456"), "123456");
    }

    #[test]
    fn canonical_input_is_normalized() {
        assert_eq!(format("CRECI/SP-123456"), "CRECI/SP-123456");
        assert_eq!(format("creci/rj-55"), "CRECI/RJ-55");
    }

    #[test]
    fn unrecognized_input_is_returned_unchanged() {
        assert_eq!(format("abc-12x"), "abc-12x");
    }

    #[test]
    fn strip_removes_prefix_and_separators() {
        assert_eq!(strip("CRECI/SP-123456"), "SP123456");
        assert_eq!(strip(" sp-12 34 "), "SP1234");
    }

    #[test]
    fn shape_requires_region_and_digits() {
        assert!(is_valid_shape("SP123456"));
        assert!(is_valid_shape("CRECI/SP-123456"));
        assert!(!is_valid_shape("123"));
        assert!(!is_valid_shape("SPX123"));
    }

    #[test]
    fn extracts_parts() {
        assert_eq!(extract_region("CRECI/SP-123456").as_deref(), Some("SP"));
        assert_eq!(extract_number("CRECI/SP-123456").as_deref(), Some("123456"));
        assert_eq!(extract_region("123456"), None);
        assert_eq!(extract_number("SP"), None);
    }
}
