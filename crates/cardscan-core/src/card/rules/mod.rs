//! Rule-based field extractors for payment cards.
//!
//! Each extractor scans one line of text independently of the others, so
//! the same digits may be claimed by more than one field.

pub mod number;
pub mod expiry;
pub mod name;
pub mod cvv;
pub mod patterns;

pub use number::{find_card_number, CardNumberExtractor};
pub use expiry::{find_expiry_date, parse_expiry, ExpiryDate, ExpiryExtractor};
pub use name::{find_cardholder_name, NameExtractor};
pub use cvv::{find_cvv, CvvExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A field value together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted (normalized) value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    pub(crate) fn from_regex_match(value: T, m: regex::Match<'_>) -> Self {
        Self::new(value, m.as_str()).with_position(m.start(), m.end())
    }
}
