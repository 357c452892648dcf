//! Geometry helpers for pointer mapping, shapes and backing sizes.
//!
//! This module provides:
//! - Pointer-to-canvas coordinate mapping
//! - Backing bitmap size computation from a viewport
//! - Rectangle normalisation and arrowhead geometry

use serde::{Deserialize, Serialize};

// ============================================================================
// Points and Rectangles
// ============================================================================

/// Position on the canvas in CSS pixels (element offset already removed).
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

/// Displayed rectangle of an element in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Axis-aligned rectangle with non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rectangle spanning two opposite corners, dragged in any direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}

// ============================================================================
// Pointer Mapping
// ============================================================================

/// Maps a client-space pointer position to canvas coordinates in CSS pixels.
///
/// The rendering context is scaled by the device pixel ratio, so only the
/// element offset has to be removed here.
pub fn canvas_point(client_x: f64, client_y: f64, bounds: &ElementRect) -> Point {
    Point {
        x: client_x - bounds.left,
        y: client_y - bounds.top,
    }
}

/// Sanitises a device pixel ratio; anything non-finite or non-positive becomes 1.
pub fn effective_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Computes backing pixel dimensions for a displayed size and pixel ratio.
pub fn backing_size(width: f64, height: f64, pixel_ratio: f64) -> (u32, u32) {
    let ratio = effective_pixel_ratio(pixel_ratio);
    let scale = |value: f64| {
        if value.is_finite() && value > 0.0 {
            (value * ratio).round().min(i32::MAX as f64) as u32
        } else {
            0
        }
    };
    (scale(width), scale(height))
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two base corners of a filled arrowhead at `end`.
///
/// The head points along the direction from `start` to `end`; each side
/// leaves the tip at `angle_degrees` off the shaft with length `head_length`.
///
/// # Returns
/// `[left, right]` base corners. If the shaft is shorter than one pixel both
/// corners equal `end`.
pub fn arrowhead_points(start: Point, end: Point, head_length: f64, angle_degrees: f64) -> [Point; 2] {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if (dx * dx + dy * dy).sqrt() < 1.0 {
        return [end, end];
    }

    let angle = dy.atan2(dx);
    let spread = angle_degrees.to_radians();

    let left = Point {
        x: end.x - head_length * (angle - spread).cos(),
        y: end.y - head_length * (angle - spread).sin(),
    };
    let right = Point {
        x: end.x - head_length * (angle + spread).cos(),
        y: end.y - head_length * (angle + spread).sin(),
    };

    [left, right]
}
