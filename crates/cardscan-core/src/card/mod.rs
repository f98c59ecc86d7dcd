//! Payment card field extraction.

mod scanner;
pub mod rules;
pub mod validator;

pub use scanner::{CardScanner, ScanResult, extract_cards};

use crate::models::card::ExtractedCard;
use crate::ocr::{RecognizedLine, RecognizedText};

/// Trait for card extractors.
pub trait CardExtractor {
    /// Extract card records from a full OCR result, in scan order.
    fn extract(&self, text: &RecognizedText) -> ScanResult;

    /// Extract a card record from a single line.
    fn extract_line(&self, line: &RecognizedLine) -> Option<ExtractedCard>;
}
