//! Displayed size and pixel ratio of the drawing surface.

use crate::util::{self, ElementRect};

/// Where the surface is displayed and at which device pixel ratio.
///
/// Hosts pass this in on mount and on every resize; the surface never
/// reads window geometry on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Element offset in client coordinates
    pub left: f64,
    pub top: f64,
    /// Displayed (CSS) size
    pub width: f64,
    pub height: f64,
    /// Device pixel ratio (non-positive values are treated as 1)
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
            pixel_ratio,
        }
    }

    /// Moves the element to the given client offset.
    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn bounds(&self) -> ElementRect {
        ElementRect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }

    pub fn ratio(&self) -> f64 {
        util::effective_pixel_ratio(self.pixel_ratio)
    }

    /// Backing pixel dimensions: displayed size × pixel ratio, rounded.
    pub fn backing_size(&self) -> (u32, u32) {
        util::backing_size(self.width, self.height, self.pixel_ratio)
    }
}
