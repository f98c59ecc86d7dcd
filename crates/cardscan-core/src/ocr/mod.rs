//! Input model for recognized text supplied by an external OCR engine.
//!
//! The engine groups recognized lines into blocks. Each line carries its
//! text, a confidence score and its geometry on the source image.

mod confidence;

pub use confidence::parse_confidence;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// A point on the source image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One line of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    ///
    /// Unreadable values deserialize to 0.0 so that such lines are
    /// excluded by any positive threshold.
    #[serde(default, deserialize_with = "confidence::deserialize")]
    pub confidence: f64,

    /// Polygon outline of the line, in engine order.
    #[serde(default)]
    pub corner_points: Vec<Point>,

    /// Bounding rectangle, if the engine reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl RecognizedLine {
    /// Create a line with no geometry.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            text: text.into(),
            confidence: parse_confidence(confidence),
            corner_points: Vec::new(),
            bounding_box: None,
        }
    }

    /// Attach the polygon outline.
    pub fn with_corners(mut self, corners: Vec<Point>) -> Self {
        self.corner_points = corners;
        self
    }

    /// Attach the bounding rectangle.
    pub fn with_bounding_box(mut self, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox::new(width, height));
        self
    }

    /// Bounding rectangle dimensions, zero-sized when absent.
    pub fn size(&self) -> BoundingBox {
        self.bounding_box.unwrap_or_default()
    }
}

/// A group of lines the OCR engine considers one text region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub lines: Vec<RecognizedLine>,
}

impl TextBlock {
    pub fn new(lines: Vec<RecognizedLine>) -> Self {
        Self { lines }
    }
}

/// Complete recognition output for one image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognizedText {
    #[serde(default)]
    pub blocks: Vec<TextBlock>,
}

impl RecognizedText {
    pub fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }

    /// Parse a JSON dump produced by the OCR collaborator.
    ///
    /// Accepts either `{"blocks": [...]}` or a bare array of blocks.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| InputError::Parse(e.to_string()))?;

        let text = if value.is_array() {
            let blocks: Vec<TextBlock> =
                serde_json::from_value(value).map_err(|e| InputError::Parse(e.to_string()))?;
            Self::new(blocks)
        } else {
            serde_json::from_value(value).map_err(|e| InputError::Parse(e.to_string()))?
        };

        Ok(text)
    }

    /// Load a JSON dump from disk.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Total number of lines across all blocks.
    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|b| b.lines.len()).sum()
    }

    /// Iterate lines in block order, then line order.
    pub fn lines(&self) -> impl Iterator<Item = &RecognizedLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_recognized_text() {
        let json = r#"{
            "blocks": [
                {
                    "lines": [
                        {
                            "text": "4532 0151 1283 0366",
                            "confidence": 0.92,
                            "cornerPoints": [{"x": 10, "y": 20}, {"x": 200, "y": 20}],
                            "boundingBox": {"width": 190.0, "height": 24.0}
                        }
                    ]
                }
            ]
        }"#;

        let text = RecognizedText::from_json(json).unwrap();
        assert_eq!(text.line_count(), 1);

        let line = &text.blocks[0].lines[0];
        assert_eq!(line.text, "4532 0151 1283 0366");
        assert_eq!(line.confidence, 0.92);
        assert_eq!(line.corner_points.len(), 2);
        assert_eq!(line.size(), BoundingBox::new(190.0, 24.0));
    }

    #[test]
    fn test_parse_bare_block_array() {
        let json = r#"[{"lines": [{"text": "John Smith", "confidence": 0.8}]}, {"lines": []}]"#;
        let text = RecognizedText::from_json(json).unwrap();
        assert_eq!(text.blocks.len(), 2);
        assert_eq!(text.line_count(), 1);
    }

    #[test]
    fn test_missing_geometry_defaults() {
        let json = r#"{"blocks": [{"lines": [{"text": "EXP 12/26"}]}]}"#;
        let text = RecognizedText::from_json(json).unwrap();
        let line = &text.blocks[0].lines[0];

        assert_eq!(line.confidence, 0.0);
        assert!(line.corner_points.is_empty());
        assert_eq!(line.size(), BoundingBox::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(RecognizedText::from_json("not json").is_err());
        assert!(RecognizedText::from_json(r#"{"blocks": 3}"#).is_err());
    }

    #[test]
    fn test_lines_iterate_in_scan_order() {
        let text = RecognizedText::new(vec![
            TextBlock::new(vec![RecognizedLine::new("a", 1.0), RecognizedLine::new("b", 1.0)]),
            TextBlock::new(vec![RecognizedLine::new("c", 1.0)]),
        ]);

        let order: Vec<&str> = text.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
