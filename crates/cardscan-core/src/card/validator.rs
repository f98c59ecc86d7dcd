//! Card number validation, network classification and masking.
//!
//! All functions are total: malformed input yields `false`, `None` or the
//! input unchanged.

use crate::models::card::CardNetwork;

use super::rules::patterns::{AMEX, DISCOVER_622, DISCOVER_64, MASTERCARD_2_SERIES, MASTERCARD_5_SERIES};

/// Shortest and longest card numbers accepted by the checksum.
const MIN_CARD_LENGTH: usize = 13;
const MAX_CARD_LENGTH: usize = 19;

/// Validate a card number using the Luhn (mod 10) checksum.
///
/// Non-digit characters are ignored. Numbers with fewer than 13 or more
/// than 19 digits are rejected.
pub fn is_valid_luhn(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    if !(MIN_CARD_LENGTH..=MAX_CARD_LENGTH).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Determine the card network from the leading digits.
///
/// Rules are checked in order and the first hit wins. Unknown prefixes are
/// not an error and yield `None`.
pub fn classify_network(number: &str) -> Option<CardNetwork> {
    if number.is_empty() {
        return None;
    }

    if number.starts_with('4') {
        Some(CardNetwork::Visa)
    } else if MASTERCARD_5_SERIES.is_match(number) || MASTERCARD_2_SERIES.is_match(number) {
        Some(CardNetwork::Mastercard)
    } else if AMEX.is_match(number) {
        Some(CardNetwork::AmericanExpress)
    } else if number.starts_with("6011")
        || DISCOVER_622.is_match(number)
        || DISCOVER_64.is_match(number)
        || number.starts_with("65")
    {
        Some(CardNetwork::Discover)
    } else {
        None
    }
}

/// Mask all but the last four characters with `*`.
pub fn mask_number(number: &str) -> String {
    mask_number_with(number, '*')
}

/// Mask all but the last four characters with `mask_char`.
///
/// Values shorter than four characters are returned unchanged.
pub fn mask_number_with(number: &str, mask_char: char) -> String {
    let len = number.chars().count();
    if len < 4 {
        return number.to_string();
    }

    let visible = len - 4;
    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { mask_char } else { c })
        .collect()
}

/// Format a card number in groups of 4 characters.
///
/// Existing spaces and hyphens are dropped first, so masked numbers group
/// the same way as plain ones.
pub fn format_card_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<Vec<char>>()
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}
