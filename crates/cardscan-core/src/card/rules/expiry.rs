//! Expiry date extraction.

use chrono::{Datelike, NaiveDate};

use super::{ExtractionMatch, FieldExtractor};
use super::patterns::EXPIRY;

/// Expiry date field extractor.
///
/// Produces `MM/YY` regardless of whether the source used `/` or `-` and a
/// two- or four-digit year.
pub struct ExpiryExtractor;

impl ExpiryExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExpiryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ExpiryExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        EXPIRY.captures(text).map(|caps| normalize(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EXPIRY.captures_iter(text).map(|caps| normalize(&caps)).collect()
    }
}

fn normalize(caps: &regex::Captures<'_>) -> ExtractionMatch<String> {
    let month = &caps[1];
    let year = &caps[2];
    let short_year = &year[year.len() - 2..];

    // Group 0 always participates in a match
    let full_match = caps.get(0).unwrap();
    ExtractionMatch::from_regex_match(format!("{}/{}", month, short_year), full_match)
}

/// Extract an expiry date from text as `MM/YY`.
pub fn find_expiry_date(text: &str) -> Option<String> {
    ExpiryExtractor::new().extract(text).map(|m| m.value)
}

/// A parsed card expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExpiryDate {
    /// Four-digit year.
    pub year: i32,
    /// Month, 1 - 12.
    pub month: u32,
}

impl ExpiryDate {
    /// Last calendar day on which the card is still valid.
    pub fn last_valid_day(&self) -> Option<NaiveDate> {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
    }

    /// Whether the card has expired as of `today`.
    ///
    /// Cards are valid through the end of their expiry month.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.is_expired_at(today.year(), today.month())
    }

    /// Whether the card has expired in the given calendar month.
    pub fn is_expired_at(&self, year: i32, month: u32) -> bool {
        (year, month) > (self.year, self.month)
    }
}

/// Parse an `MM/YY` (or `MM-YY`, `MM/YYYY`) string into an [`ExpiryDate`].
///
/// Two-digit years are read as 20YY.
pub fn parse_expiry(value: &str) -> Option<ExpiryDate> {
    let caps = EXPIRY.captures(value.trim())?;
    if caps.get(0)?.as_str().len() != value.trim().len() {
        return None;
    }

    let month: u32 = caps[1].parse().ok()?;
    let year: i32 = match &caps[2] {
        y if y.len() == 2 => 2000 + y.parse::<i32>().ok()?,
        y => y.parse().ok()?,
    };

    Some(ExpiryDate { year, month })
}
