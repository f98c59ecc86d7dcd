//! Compiled regex patterns for card field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 16 digits in groups of four, optionally separated by a space or hyphen
    pub static ref CARD_NUMBER: Regex = Regex::new(
        r"\b[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}[\s-]?[0-9]{4}\b"
    ).unwrap();

    pub static ref CARD_NUMBER_SEPARATOR: Regex = Regex::new(r"[\s-]").unwrap();

    // MM/YY, MM-YY, MM/YYYY, MM-YYYY
    pub static ref EXPIRY: Regex = Regex::new(
        r"\b(0[1-9]|1[0-2])[/-]([0-9]{2}|[0-9]{4})\b"
    ).unwrap();

    // Two capitalized words
    pub static ref CARDHOLDER_NAME: Regex = Regex::new(
        r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b"
    ).unwrap();

    pub static ref CVV: Regex = Regex::new(r"\b[0-9]{3,4}\b").unwrap();

    // Issuer identification ranges
    pub static ref MASTERCARD_2_SERIES: Regex = Regex::new(r"^2[2-7][2-9][0-9]").unwrap();

    pub static ref MASTERCARD_5_SERIES: Regex = Regex::new(r"^5[1-5]").unwrap();

    pub static ref AMEX: Regex = Regex::new(r"^3[47]").unwrap();

    pub static ref DISCOVER_622: Regex = Regex::new(
        r"^622(12[6-9]|1[3-9][0-9]|[2-8][0-9][0-9]|9[0-1][0-9]|92[0-5])"
    ).unwrap();

    pub static ref DISCOVER_64: Regex = Regex::new(r"^64[4-9]").unwrap();
}
