//! Drawing tool selection and cursor affordance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines how pointer events on the surface are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingTool {
    /// Freehand drawing - polyline following the pointer (default)
    #[default]
    Pen,
    /// Clears pixels along the pointer path
    Eraser,
    /// Places a text annotation where the pointer goes down
    Text,
    /// Rectangle outline from corner to corner (hidden from the toolbar by default)
    Rectangle,
    /// Arrow with a filled head at the release point (hidden from the toolbar by default)
    Arrow,
    /// No drawing
    Select,
}

/// Pointer cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Crosshair,
    /// Custom eraser glyph, see [`Cursor::css`]
    Eraser,
    Text,
}

const ERASER_CURSOR: &str = "url(\"data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='24' height='24' viewBox='0 0 24 24' fill='none' stroke='%23000000' stroke-width='2' stroke-linecap='round' stroke-linejoin='round'%3E%3Cpath d='M20 20H7L3 16c-1.5-1.5-1.5-3.9 0-5.4L16 3c1.5-1.5 3.9-1.5 5.4 0s1.5 3.9 0 5.4L10 20'/%3E%3C/svg%3E\") 0 20, auto";

impl Cursor {
    /// CSS `cursor` value for hosts that render into a web view.
    pub fn css(&self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Eraser => ERASER_CURSOR,
            Cursor::Text => "text",
        }
    }
}

impl DrawingTool {
    pub const ALL: [DrawingTool; 6] = [
        DrawingTool::Pen,
        DrawingTool::Eraser,
        DrawingTool::Text,
        DrawingTool::Rectangle,
        DrawingTool::Arrow,
        DrawingTool::Select,
    ];

    /// Cursor shown while this tool is active.
    pub fn cursor(&self) -> Cursor {
        match self {
            DrawingTool::Eraser => Cursor::Eraser,
            DrawingTool::Text => Cursor::Text,
            DrawingTool::Pen | DrawingTool::Rectangle | DrawingTool::Arrow | DrawingTool::Select => {
                Cursor::Crosshair
            }
        }
    }

    /// Whether the tool previews a shape from the gesture start point.
    pub fn is_shape(&self) -> bool {
        matches!(self, DrawingTool::Rectangle | DrawingTool::Arrow)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawingTool::Pen => "Pen",
            DrawingTool::Eraser => "Eraser",
            DrawingTool::Text => "Text",
            DrawingTool::Rectangle => "Rectangle",
            DrawingTool::Arrow => "Arrow",
            DrawingTool::Select => "Select",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DrawingTool::Pen => "pen",
            DrawingTool::Eraser => "eraser",
            DrawingTool::Text => "text",
            DrawingTool::Rectangle => "rectangle",
            DrawingTool::Arrow => "arrow",
            DrawingTool::Select => "select",
        }
    }
}

impl fmt::Display for DrawingTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawingTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawingTool::ALL
            .into_iter()
            .find(|tool| tool.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}
