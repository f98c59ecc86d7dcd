//! Cardholder name extraction.
//!
//! Any two consecutive capitalized words qualify. There is no dictionary,
//! so bank or merchant names printed on the same line match as well.

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::CARDHOLDER_NAME;

/// Cardholder name field extractor.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CARDHOLDER_NAME
            .find(text)
            .map(|m| ExtractionMatch::from_regex_match(m.as_str().to_string(), m))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        CARDHOLDER_NAME
            .find_iter(text)
            .map(|m| ExtractionMatch::from_regex_match(m.as_str().to_string(), m))
            .collect()
    }
}

/// Extract a cardholder name from text.
pub fn find_cardholder_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}
