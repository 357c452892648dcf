//! Committed text annotations.

use super::color::Color;
use crate::util::Point;

/// Text placed on the bitmap with the text tool.
///
/// Once committed it is baked into the raster; the surface keeps the
/// annotation only so it can be redrawn after a resize.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    /// Random identifier (v4 UUID)
    pub id: String,
    /// Baseline X coordinate in CSS pixels
    pub x: f64,
    /// Baseline Y coordinate in CSS pixels
    pub y: f64,
    /// Text exactly as typed (not trimmed)
    pub value: String,
    /// Color that was active when the text was committed
    pub color: Color,
}

impl TextAnnotation {
    pub fn new(at: Point, value: impl Into<String>, color: Color) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            x: at.x,
            y: at.y,
            value: value.into(),
            color,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
