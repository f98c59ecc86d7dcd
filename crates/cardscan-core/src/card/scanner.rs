//! Confidence-gated card scanner over recognized text.

use tracing::{debug, info};

use crate::models::card::ExtractedCard;
use crate::models::config::ExtractionConfig;
use crate::ocr::{RecognizedLine, RecognizedText, TextBlock};

use super::rules::{
    CardNumberExtractor, CvvExtractor, ExpiryExtractor, FieldExtractor, NameExtractor,
};
use super::validator::{is_valid_luhn, mask_number};
use super::CardExtractor;

/// Result of scanning recognized text.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Extracted cards in block order, then line order.
    pub cards: Vec<ExtractedCard>,
    /// Lines that passed the confidence gate.
    pub lines_scanned: usize,
    /// Lines skipped for low confidence.
    pub lines_skipped: usize,
    /// Processing time in milliseconds. Always 0 on wasm32, which has no
    /// monotonic clock.
    pub processing_time_ms: u64,
}

/// Wall-clock timer for scan statistics.
struct ScanTimer {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl ScanTimer {
    #[cfg(not(target_arch = "wasm32"))]
    fn start() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn start() -> Self {
        Self {}
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    #[cfg(target_arch = "wasm32")]
    fn elapsed_ms(&self) -> u64 {
        0
    }
}

/// Card scanner applying the confidence gate and field extractors line by line.
#[derive(Debug, Clone)]
pub struct CardScanner {
    /// Minimum line confidence.
    confidence_threshold: f64,
    /// Whether to look for CVV candidates.
    extract_cvv: bool,
    /// Whether to drop card numbers failing the Luhn checksum.
    validate_luhn: bool,
}

impl CardScanner {
    /// Create a new scanner with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a scanner from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            extract_cvv: config.extract_cvv,
            validate_luhn: config.validate_luhn,
        }
    }

    /// Set the minimum line confidence.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set CVV extraction.
    pub fn with_cvv_extraction(mut self, extract: bool) -> Self {
        self.extract_cvv = extract;
        self
    }

    /// Set Luhn validation of card numbers.
    pub fn with_luhn_validation(mut self, validate: bool) -> Self {
        self.validate_luhn = validate;
        self
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Whether a line passes the confidence gate.
    pub fn accepts(&self, line: &RecognizedLine) -> bool {
        line.confidence >= self.confidence_threshold
    }

    /// Scan a single line.
    ///
    /// Returns `None` for lines below the confidence threshold and for lines
    /// without a card number, expiry date or cardholder name.
    pub fn scan_line(&self, line: &RecognizedLine) -> Option<ExtractedCard> {
        if !self.accepts(line) {
            debug!(
                "Skipping line with confidence {:.2} < {:.2}",
                line.confidence, self.confidence_threshold
            );
            return None;
        }

        let text = line.text.as_str();

        let card_number = CardNumberExtractor::new()
            .with_validation(false)
            .extract(text)
            .map(|m| m.value)
            .filter(|number| {
                let valid = !self.validate_luhn || is_valid_luhn(number);
                if !valid {
                    debug!("Dropping card number {} failing checksum", mask_number(number));
                }
                valid
            });

        let expiry_date = ExpiryExtractor::new().extract(text).map(|m| m.value);
        let cardholder_name = NameExtractor::new().extract(text).map(|m| m.value);
        let cvv = if self.extract_cvv {
            CvvExtractor::new().extract(text).map(|m| m.value)
        } else {
            None
        };

        ExtractedCard::from_fields(line, card_number, expiry_date, cardholder_name, cvv)
    }

    /// Scan blocks of lines in block order, then line order.
    pub fn scan_blocks(&self, blocks: &[TextBlock]) -> ScanResult {
        let timer = ScanTimer::start();

        let mut cards = Vec::new();
        let mut lines_scanned = 0;
        let mut lines_skipped = 0;

        for line in blocks.iter().flat_map(|b| b.lines.iter()) {
            if !self.accepts(line) {
                lines_skipped += 1;
                continue;
            }

            lines_scanned += 1;
            if let Some(card) = self.scan_line(line) {
                cards.push(card);
            }
        }

        let processing_time_ms = timer.elapsed_ms();

        info!(
            "Scanned {} lines ({} below threshold {:.2}), found {} card records",
            lines_scanned,
            lines_skipped,
            self.confidence_threshold,
            cards.len()
        );

        ScanResult {
            cards,
            lines_scanned,
            lines_skipped,
            processing_time_ms,
        }
    }

    /// Scan a complete OCR result.
    pub fn scan(&self, text: &RecognizedText) -> ScanResult {
        self.scan_blocks(&text.blocks)
    }
}

impl Default for CardScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for CardScanner {
    fn extract(&self, text: &RecognizedText) -> ScanResult {
        self.scan(text)
    }

    fn extract_line(&self, line: &RecognizedLine) -> Option<ExtractedCard> {
        self.scan_line(line)
    }
}

/// Extract card records from text blocks using `threshold` as the
/// confidence gate.
pub fn extract_cards(blocks: &[TextBlock], threshold: f64) -> Vec<ExtractedCard> {
    CardScanner::new()
        .with_confidence_threshold(threshold)
        .scan_blocks(blocks)
        .cards
}
