//! WASM bindings for payment card OCR field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Results cross the boundary as plain JS objects with camelCase keys.

use wasm_bindgen::prelude::*;

use cardscan_core::card::validator::{format_card_number, mask_number_with};
use cardscan_core::models::config::validate_threshold;
use cardscan_core::{CardScanner, ExtractedCard, RecognizedLine, RecognizedText};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Validate a card number using the Luhn checksum.
#[wasm_bindgen(js_name = isValidLuhn)]
pub fn is_valid_luhn(number: &str) -> bool {
    cardscan_core::is_valid_luhn(number)
}

/// Card network name ("Visa", "Mastercard", "American Express", "Discover").
#[wasm_bindgen(js_name = classifyNetwork)]
pub fn classify_network(number: &str) -> Option<String> {
    cardscan_core::classify_network(number).map(|n| n.name().to_string())
}

/// Mask all but the last four characters.
#[wasm_bindgen(js_name = maskNumber)]
pub fn mask_number(number: &str) -> String {
    cardscan_core::mask_number(number)
}

/// Format a card number in groups of four.
#[wasm_bindgen(js_name = formatCardNumber)]
pub fn format_number(number: &str) -> String {
    format_card_number(number)
}

/// Scan an OCR result given as a JSON string.
///
/// Returns an array of card records.
#[wasm_bindgen(js_name = scanJson)]
pub fn scan_json(json: &str, confidence_threshold: f64) -> Result<js_sys::Array, JsValue> {
    validate_threshold(confidence_threshold).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = RecognizedText::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let scanner = CardScanner::new().with_confidence_threshold(confidence_threshold);
    cards_to_array(&scanner.scan(&text).cards, None)
}

fn cards_to_array(cards: &[ExtractedCard], mask_char: Option<char>) -> Result<js_sys::Array, JsValue> {
    let array = js_sys::Array::new();
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();

    for card in cards {
        let card = match mask_char {
            Some(c) => card.redacted(c),
            None => card.clone(),
        };

        let value = serde::Serialize::serialize(&card, &serializer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        array.push(&value);
    }

    Ok(array)
}

/// Card scanner class for browser use.
#[wasm_bindgen]
pub struct CardScannerJs {
    scanner: CardScanner,
    mask_char: Option<char>,
}

#[wasm_bindgen]
impl CardScannerJs {
    /// Create a new card scanner with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            scanner: CardScanner::new(),
            mask_char: None,
        }
    }

    /// Set the minimum line confidence.
    #[wasm_bindgen(js_name = setConfidenceThreshold)]
    pub fn set_confidence_threshold(&mut self, threshold: f64) -> Result<(), JsValue> {
        validate_threshold(threshold).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scanner = self.scanner.clone().with_confidence_threshold(threshold);
        Ok(())
    }

    /// Enable or disable CVV extraction.
    #[wasm_bindgen(js_name = setCvvExtraction)]
    pub fn set_cvv_extraction(&mut self, extract: bool) {
        self.scanner = self.scanner.clone().with_cvv_extraction(extract);
    }

    /// Mask card numbers (and drop CVVs) in returned records.
    #[wasm_bindgen(js_name = setMasking)]
    pub fn set_masking(&mut self, enabled: bool) {
        self.mask_char = enabled.then_some('*');
    }

    /// Scan an OCR result object shaped like `{ blocks: [{ lines: [...] }] }`.
    #[wasm_bindgen]
    pub fn scan(&self, value: JsValue) -> Result<js_sys::Array, JsValue> {
        let text: RecognizedText = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let result = self.scanner.scan(&text);
        web_sys::console::debug_1(&JsValue::from_str(&format!(
            "cardscan: {} lines scanned, {} skipped, {} records",
            result.lines_scanned,
            result.lines_skipped,
            result.cards.len()
        )));

        cards_to_array(&result.cards, self.mask_char)
    }

    /// Scan a single line of text with the given confidence.
    #[wasm_bindgen(js_name = scanLine)]
    pub fn scan_line(&self, text: &str, confidence: f64) -> Result<JsValue, JsValue> {
        let line = RecognizedLine::new(text, confidence);

        match self.scanner.scan_line(&line) {
            Some(card) => {
                let array = cards_to_array(std::slice::from_ref(&card), self.mask_char)?;
                Ok(array.get(0))
            }
            None => Ok(JsValue::NULL),
        }
    }
}

impl Default for CardScannerJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Utilities for displaying card data.
#[wasm_bindgen]
pub struct CardUtils;

#[wasm_bindgen]
impl CardUtils {
    /// Mask a card number with a custom character.
    #[wasm_bindgen(js_name = maskWith)]
    pub fn mask_with(number: &str, mask_char: char) -> String {
        mask_number_with(number, mask_char)
    }

    /// Parse an expiry string and report whether it is in the past
    /// relative to the given year and month.
    #[wasm_bindgen(js_name = isExpired)]
    pub fn is_expired(expiry: &str, year: i32, month: u32) -> Option<bool> {
        cardscan_core::card::rules::parse_expiry(expiry).map(|e| e.is_expired_at(year, month))
    }
}
