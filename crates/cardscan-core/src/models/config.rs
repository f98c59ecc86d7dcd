//! Configuration structures for the card scanning pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardScanError, Result};

/// Main configuration for cardscan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardScanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines with OCR confidence below this value are skipped (0.0 - 1.0).
    pub confidence_threshold: f64,

    /// Look for CVV candidates. The CVV pattern matches any 3-4 digit run,
    /// so disabling it removes a common source of false positives.
    pub extract_cvv: bool,

    /// Drop card numbers failing the Luhn checksum.
    pub validate_luhn: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            extract_cvv: true,
            validate_luhn: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Mask card numbers in written output.
    pub mask_numbers: bool,

    /// Character used for masking.
    pub mask_char: char,

    /// Include CVV candidates in written output.
    pub include_cvv: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mask_numbers: false,
            mask_char: '*',
            include_cvv: true,
        }
    }
}

impl CardScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.extraction.confidence_threshold)
    }
}

/// Check that a confidence threshold is finite and within 0.0..=1.0.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(CardScanError::Config(format!(
            "confidence_threshold must be within 0.0..=1.0, got {}",
            threshold
        )));
    }

    Ok(())
}
