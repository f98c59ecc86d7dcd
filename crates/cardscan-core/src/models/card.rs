//! Extracted card records.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::rules::patterns::{CARD_NUMBER, CVV};
use crate::card::validator::{classify_network, mask_number_with};
use crate::ocr::{BoundingBox, Point, RecognizedLine};

/// Payment card network, as determined from the leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    Discover,
}

impl CardNetwork {
    /// Human-readable network name.
    pub fn name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::AmericanExpress => "American Express",
            CardNetwork::Discover => "Discover",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card fields found on a single recognized line.
///
/// At least one of card number, expiry date or cardholder name is always
/// present; a CVV on its own never produces a record. Outside this crate
/// records can only be obtained through [`ExtractedCard::from_fields`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ExtractedCard {
    /// Checksum-valid card number, digits only.
    pub card_number: Option<String>,

    /// Expiry date as `MM/YY`.
    pub expiry_date: Option<String>,

    /// Cardholder name (two capitalized words).
    pub cardholder_name: Option<String>,

    /// Three or four digit security code candidate.
    pub cvv: Option<String>,

    /// Line outline, carried over from the OCR line.
    pub corners: Vec<Point>,

    /// Line bounding box dimensions, carried over from the OCR line.
    pub size: BoundingBox,

    /// Original line text.
    pub raw_text: String,

    /// OCR confidence of the line.
    pub confidence: f64,
}

impl ExtractedCard {
    /// Build a record from the fields found on `line`.
    ///
    /// Returns `None` when neither a card number, an expiry date nor a
    /// cardholder name was found.
    pub fn from_fields(
        line: &RecognizedLine,
        card_number: Option<String>,
        expiry_date: Option<String>,
        cardholder_name: Option<String>,
        cvv: Option<String>,
    ) -> Option<Self> {
        if card_number.is_none() && expiry_date.is_none() && cardholder_name.is_none() {
            return None;
        }

        Some(Self {
            card_number,
            expiry_date,
            cardholder_name,
            cvv,
            corners: line.corner_points.clone(),
            size: line.size(),
            raw_text: line.text.clone(),
            confidence: line.confidence,
        })
    }

    /// Whether the record carries a number, expiry or name.
    pub fn has_identifying_field(&self) -> bool {
        self.card_number.is_some() || self.expiry_date.is_some() || self.cardholder_name.is_some()
    }

    /// Network of the extracted card number, if any.
    pub fn network(&self) -> Option<CardNetwork> {
        self.card_number.as_deref().and_then(classify_network)
    }

    /// Display-safe card number.
    pub fn masked_number(&self) -> Option<String> {
        self.card_number.as_deref().map(|n| mask_number_with(n, '*'))
    }

    /// Copy suitable for display or logging: the card number is masked,
    /// the CVV dropped, and every card-number or CVV candidate in the raw
    /// text masked.
    pub fn redacted(&self, mask_char: char) -> Self {
        let card_number = self
            .card_number
            .as_deref()
            .map(|n| mask_number_with(n, mask_char));

        Self {
            card_number,
            cvv: None,
            raw_text: redact_text(&self.raw_text, mask_char),
            ..self.clone()
        }
    }
}

/// Mask digit runs that could be card data.
///
/// Card-number candidates keep their last four digits. Standalone 3-4 digit
/// runs outside those candidates are masked completely.
fn redact_text(text: &str, mask_char: char) -> String {
    let mut hidden: HashSet<usize> = HashSet::new();

    let numbers: Vec<(usize, usize)> = CARD_NUMBER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    for &(start, end) in &numbers {
        let digits: Vec<usize> = text[start..end]
            .char_indices()
            .filter(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| start + i)
            .collect();
        let visible_from = digits.len().saturating_sub(4);
        hidden.extend(&digits[..visible_from]);
    }

    for m in CVV.find_iter(text) {
        let inside_number = numbers
            .iter()
            .any(|&(start, end)| m.start() < end && start < m.end());
        if !inside_number {
            hidden.extend(m.range());
        }
    }

    text.char_indices()
        .map(|(i, c)| if hidden.contains(&i) { mask_char } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line() -> RecognizedLine {
        RecognizedLine::new("4532 0151 1283 0366", 0.9)
            .with_corners(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)])
            .with_bounding_box(120.0, 18.0)
    }

    #[test]
    fn test_cvv_only_is_rejected() {
        let card = ExtractedCard::from_fields(&line(), None, None, None, Some("123".into()));
        assert!(card.is_none());
    }

    #[test]
    fn test_geometry_carried_over() {
        let card = ExtractedCard::from_fields(&line(), Some("4532015112830366".into()), None, None, None)
            .unwrap();

        assert_eq!(card.corners, vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(card.size, BoundingBox::new(120.0, 18.0));
        assert_eq!(card.raw_text, "4532 0151 1283 0366");
        assert_eq!(card.confidence, 0.9);
        assert!(card.has_identifying_field());
    }

    #[test]
    fn test_network_and_mask() {
        let card = ExtractedCard::from_fields(&line(), Some("4532015112830366".into()), None, None, None)
            .unwrap();

        assert_eq!(card.network(), Some(CardNetwork::Visa));
        assert_eq!(card.masked_number().as_deref(), Some("************0366"));
    }

    #[test]
    fn test_redacted() {
        let card = ExtractedCard::from_fields(
            &line(),
            Some("4532015112830366".into()),
            None,
            None,
            Some("0151".into()),
        )
        .unwrap();

        let redacted = card.redacted('#');
        assert_eq!(redacted.card_number.as_deref(), Some("############0366"));
        assert_eq!(redacted.raw_text, "#### #### #### 0366");
        assert_eq!(redacted.cvv, None);
        assert_eq!(redacted.corners, card.corners);
    }

    #[test]
    fn test_redacted_masks_numbers_not_extracted() {
        let line = RecognizedLine::new("4532 0151 1283 0367 / 4111 1111 1111 1111 EXP 01/27", 0.9);
        let card = ExtractedCard::from_fields(&line, None, Some("01/27".into()), None, None).unwrap();

        let redacted = card.redacted('*');
        assert_eq!(
            redacted.raw_text,
            "**** **** **** 0367 / **** **** **** 1111 EXP 01/27"
        );
        assert!(!redacted.raw_text.contains("4111 1111"));
    }

    #[test]
    fn test_redacted_masks_cvv_in_raw_text() {
        let line = RecognizedLine::new("EXP 12/26 CVV 987", 0.9);
        let card = ExtractedCard::from_fields(
            &line,
            None,
            Some("12/26".into()),
            None,
            Some("987".into()),
        )
        .unwrap();

        let redacted = card.redacted('*');
        assert_eq!(redacted.cvv, None);
        assert_eq!(redacted.raw_text, "EXP 12/26 CVV ***");
        assert_eq!(redacted.expiry_date.as_deref(), Some("12/26"));
    }

    #[test]
    fn test_redacted_keeps_text_without_digits() {
        let line = RecognizedLine::new("John Smith", 0.9);
        let card = ExtractedCard::from_fields(&line, None, None, Some("John Smith".into()), None).unwrap();
        assert_eq!(card.redacted('*').raw_text, "John Smith");
    }

    #[test]
    fn test_serialized_keys() {
        let card = ExtractedCard::from_fields(&line(), None, Some("12/26".into()), None, None).unwrap();
        let json = serde_json::to_value(&card).unwrap();

        for key in [
            "cardNumber",
            "expiryDate",
            "cardholderName",
            "cvv",
            "corners",
            "size",
            "rawText",
            "confidence",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["size"]["width"], 120.0);
        assert_eq!(json["cardNumber"], serde_json::Value::Null);
    }

    #[test]
    fn test_network_display() {
        assert_eq!(CardNetwork::AmericanExpress.to_string(), "American Express");
        assert_eq!(
            serde_json::to_string(&CardNetwork::AmericanExpress).unwrap(),
            "\"American Express\""
        );
    }
}
