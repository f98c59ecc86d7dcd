//! Card number extraction.

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::{CARD_NUMBER, CARD_NUMBER_SEPARATOR};
use crate::card::validator::is_valid_luhn;

/// Card number field extractor.
pub struct CardNumberExtractor {
    validate: bool,
}

impl CardNumberExtractor {
    /// Create a new card number extractor.
    pub fn new() -> Self {
        Self { validate: true }
    }

    /// Set whether to validate Luhn checksums.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn accept(&self, m: regex::Match<'_>) -> Option<ExtractionMatch<String>> {
        let digits = CARD_NUMBER_SEPARATOR.replace_all(m.as_str(), "").into_owned();

        if !self.validate || is_valid_luhn(&digits) {
            Some(ExtractionMatch::from_regex_match(digits, m))
        } else {
            None
        }
    }
}

impl Default for CardNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CardNumberExtractor {
    type Output = ExtractionMatch<String>;

    /// Only the leftmost candidate is considered. If it fails the checksum
    /// nothing is returned, even when a later candidate would pass.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        CARD_NUMBER.find(text).and_then(|m| self.accept(m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CARD_NUMBER
            .find_iter(text)
            .filter_map(|m| self.accept(m))
            .collect()
    }
}

/// Extract a checksum-valid card number from text, digits only.
pub fn find_card_number(text: &str) -> Option<String> {
    CardNumberExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_card_number_plain() {
        assert_eq!(find_card_number("4532015112830366"), Some("4532015112830366".to_string()));
    }

    #[test]
    fn test_find_card_number_with_separators() {
        assert_eq!(
            find_card_number("CARD 4532 0151 1283 0366 VALID"),
            Some("4532015112830366".to_string())
        );
        assert_eq!(
            find_card_number("4532-0151-1283-0366"),
            Some("4532015112830366".to_string())
        );
        assert_eq!(
            find_card_number("4532 0151-1283 0366"),
            Some("4532015112830366".to_string())
        );
    }

    #[test]
    fn test_invalid_checksum_is_dropped() {
        assert_eq!(find_card_number("4532 0151 1283 0367"), None);
    }

    #[test]
    fn test_requires_word_boundary() {
        assert_eq!(find_card_number("94532015112830366"), None);
        assert_eq!(find_card_number("45320151128303661"), None);
        assert_eq!(find_card_number("A4532015112830366"), None);
    }

    #[test]
    fn test_only_first_candidate_is_considered() {
        let text = "4532 0151 1283 0367 / 4111 1111 1111 1111";
        assert_eq!(find_card_number(text), None);

        let extractor = CardNumberExtractor::new();
        let all: Vec<String> = extractor.extract_all(text).into_iter().map(|m| m.value).collect();
        assert_eq!(all, vec!["4111111111111111".to_string()]);
    }

    #[test]
    fn test_without_validation() {
        let extractor = CardNumberExtractor::new().with_validation(false);
        let found = extractor.extract("No 1234 5678 9012 3456").unwrap();

        assert_eq!(found.value, "1234567890123456");
        assert_eq!(found.source, "1234 5678 9012 3456");
        assert_eq!(found.position, Some((3, 22)));
    }

    #[test]
    fn test_short_groups_do_not_match() {
        assert_eq!(find_card_number("3400 000000 00009"), None);
        assert_eq!(find_card_number("12/26 123"), None);
    }
}
