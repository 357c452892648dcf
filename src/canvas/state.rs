//! Gesture state machine of the drawing surface.

use crate::draw::Color;
use crate::input::{DrawingTool, ToolSettings};
use crate::util::Point;
use cairo::ImageSurface;
use std::fmt;

/// Current interaction mode of the surface.
///
/// Tracks whether the user is idle, dragging with a tool, or typing text.
/// A gesture and a text entry never coexist.
#[derive(Debug, Default)]
pub enum DrawingState {
    /// Not interacting - waiting for a pointer-down
    #[default]
    Idle,
    /// Pointer is down and a tool gesture is in progress
    Gesturing(Stroke),
    /// Text caret is open, waiting for Return or Escape
    TextEntry {
        /// Baseline position where the text will be placed
        at: Point,
        /// Text typed so far
        buffer: String,
    },
}

/// A gesture in progress, with the tool settings captured at pointer-down.
pub struct Stroke {
    pub tool: DrawingTool,
    pub color: Color,
    pub width: f64,
    /// Where the pointer went down
    pub start: Point,
    /// Most recent pointer position
    pub last: Point,
    /// Bitmap before the gesture, restored under every shape preview frame
    pub(crate) snapshot: Option<ImageSurface>,
}

impl Stroke {
    pub(crate) fn begin(settings: &ToolSettings, at: Point) -> Self {
        Self {
            tool: settings.tool,
            color: settings.color,
            width: settings.size,
            start: at,
            last: at,
            snapshot: None,
        }
    }
}

impl fmt::Debug for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stroke")
            .field("tool", &self.tool)
            .field("color", &self.color)
            .field("width", &self.width)
            .field("start", &self.start)
            .field("last", &self.last)
            .field("snapshot", &self.snapshot.is_some())
            .finish()
    }
}
