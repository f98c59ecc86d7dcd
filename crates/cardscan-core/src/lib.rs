//! Core library for payment card OCR processing.
//!
//! This crate provides:
//! - Input model for OCR output (text blocks, lines, geometry, confidence)
//! - Card field extraction (number, expiry, cardholder name, CVV)
//! - Luhn validation, card network classification and masking
//! - A confidence-gated scanner producing `ExtractedCard` records

pub mod error;
pub mod models;
pub mod ocr;
pub mod card;

pub use error::{CardScanError, InputError, Result};
pub use models::card::{CardNetwork, ExtractedCard};
pub use models::config::CardScanConfig;
pub use ocr::{BoundingBox, Point, RecognizedLine, RecognizedText, TextBlock};
pub use card::{CardExtractor, CardScanner, ScanResult, extract_cards};
pub use card::validator::{classify_network, is_valid_luhn, mask_number};
