//! CVV extraction.
//!
//! The pattern accepts any standalone run of three or four digits, so it
//! regularly picks up fragments of other numbers on the line.

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::CVV;

/// CVV field extractor.
pub struct CvvExtractor;

impl CvvExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CvvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CvvExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CVV.find(text)
            .map(|m| ExtractionMatch::from_regex_match(m.as_str().to_string(), m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CVV.find_iter(text)
            .map(|m| ExtractionMatch::from_regex_match(m.as_str().to_string(), m))
            .collect()
    }
}

/// Extract a CVV candidate from text.
pub fn find_cvv(text: &str) -> Option<String> {
    CvvExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_cvv() {
        assert_eq!(find_cvv("CVV 123"), Some("123".to_string()));
        assert_eq!(find_cvv("CID 1234"), Some("1234".to_string()));
    }

    #[test]
    fn test_longer_runs_do_not_match() {
        assert_eq!(find_cvv("12345"), None);
        assert_eq!(find_cvv("12"), None);
    }

    #[test]
    fn test_matches_other_number_fragments() {
        assert_eq!(find_cvv("4532 0151 1283 0366"), Some("4532".to_string()));
        assert_eq!(find_cvv("EXP 12/2026"), Some("2026".to_string()));
    }

    #[test]
    fn test_extract_all() {
        let all: Vec<String> = CvvExtractor::new()
            .extract_all("A 123 B 4567 C 89")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(all, vec!["123".to_string(), "4567".to_string()]);
    }
}
