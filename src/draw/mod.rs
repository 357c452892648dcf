//! Rendering primitives for the sketch bitmap (Cairo-based).
//!
//! This module defines the core drawing types used by the drawing surface:
//! - [`Color`]: RGBA color with hex parsing and the toolbar palette
//! - [`FontDescriptor`]: font used for text annotations
//! - [`TextAnnotation`]: committed text kept for redraw after resize
//! - Rendering functions for dots, segments, rectangles, arrows and text

pub mod annotation;
pub mod color;
pub mod font;
pub mod render;

// Re-export commonly used types at module level
pub use annotation::TextAnnotation;
pub use color::{Color, PALETTE, ParseColorError};
pub use font::FontDescriptor;
pub use render::{
    Compositing, apply_stroke_style, clear_all, render_arrow, render_dot, render_rectangle,
    render_segment, render_text,
};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PURPLE, RED, WHITE};
