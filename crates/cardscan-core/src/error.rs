//! Error types for the cardscan-core library.
//!
//! Field extraction and card validation never fail: a missing field is an
//! ordinary outcome and is reported as `None`. Errors only arise while
//! loading configuration or OCR input documents.

use thiserror::Error;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardScanError {
    /// Input document error.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR input documents.
#[derive(Error, Debug)]
pub enum InputError {
    /// The document could not be parsed as recognized text.
    #[error("failed to parse recognized text: {0}")]
    Parse(String),
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardScanError>;
