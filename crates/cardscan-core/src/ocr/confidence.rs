//! Fail-closed reading of OCR confidence values.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConfidence {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Normalize a confidence value, mapping non-finite values to 0.0.
pub fn parse_confidence(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Deserialize a confidence score.
///
/// Numbers are taken as-is, numeric strings are parsed, anything else
/// (null, booleans, objects, garbage strings) reads as 0.0.
pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawConfidence::deserialize(deserializer)? {
        RawConfidence::Number(n) => n,
        RawConfidence::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        RawConfidence::Other(_) => 0.0,
    };

    Ok(parse_confidence(value))
}

#[cfg(test)]
mod tests {
    use super::super::RecognizedLine;

    fn confidence_of(raw: &str) -> f64 {
        let json = format!(r#"{{"text": "x", "confidence": {}}}"#, raw);
        serde_json::from_str::<RecognizedLine>(&json).unwrap().confidence
    }

    #[test]
    fn test_numeric_confidence() {
        assert_eq!(confidence_of("0.75"), 0.75);
        assert_eq!(confidence_of("1"), 1.0);
    }

    #[test]
    fn test_string_confidence_is_parsed() {
        assert_eq!(confidence_of(r#""0.6""#), 0.6);
        assert_eq!(confidence_of(r#"" 0.6 ""#), 0.6);
    }

    #[test]
    fn test_unreadable_confidence_fails_closed() {
        assert_eq!(confidence_of("null"), 0.0);
        assert_eq!(confidence_of(r#""high""#), 0.0);
        assert_eq!(confidence_of(r#""NaN""#), 0.0);
        assert_eq!(confidence_of("true"), 0.0);
        assert_eq!(confidence_of(r#"{"value": 0.9}"#), 0.0);
    }

    #[test]
    fn test_non_finite_confidence() {
        assert_eq!(super::parse_confidence(f64::NAN), 0.0);
        assert_eq!(super::parse_confidence(f64::INFINITY), 0.0);
        assert_eq!(super::parse_confidence(0.4), 0.4);
    }
}
