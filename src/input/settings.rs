//! Tool, color and stroke width chosen by the user.

use super::tool::DrawingTool;
use crate::draw::{BLACK, Color};

pub const MIN_SIZE: f64 = 1.0;
pub const MAX_SIZE: f64 = 20.0;
pub const DEFAULT_SIZE: f64 = 3.0;

/// Current drawing selection owned by the host page.
///
/// The toolbar only emits changes to it; the drawing surface reads a copy on
/// every pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    pub tool: DrawingTool,
    pub color: Color,
    /// Stroke width in CSS pixels
    pub size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: DrawingTool::Pen,
            color: BLACK,
            size: DEFAULT_SIZE,
        }
    }
}

impl ToolSettings {
    pub fn new(tool: DrawingTool, color: Color, size: f64) -> Self {
        Self { tool, color, size }
    }
}
