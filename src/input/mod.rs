//! Input types consumed by the drawing surface.
//!
//! Pointer samples and keys come from the host; the active tool, color and
//! stroke width live in [`ToolSettings`], owned by the host page.

pub mod events;
pub mod settings;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, PointerSample};
pub use settings::ToolSettings;
pub use tool::{Cursor, DrawingTool};
