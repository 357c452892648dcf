//! Cairo-based rendering functions for sketch strokes, shapes and text.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util::{self, Point, Rect};
use std::f64::consts::PI;

/// How new paint combines with the pixels already on the bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositing {
    /// Normal painting over existing content
    #[default]
    SourceOver,
    /// Clears destination pixels where the source is drawn (eraser)
    DestinationOut,
}

impl Compositing {
    pub fn operator(self) -> cairo::Operator {
        match self {
            Compositing::SourceOver => cairo::Operator::Over,
            Compositing::DestinationOut => cairo::Operator::DestOut,
        }
    }
}

/// Applies round caps/joins, stroke color and line width to a context.
///
/// Cairo contexts start with butt caps and a 2px line, so every fresh
/// context gets this before the first stroke.
pub fn apply_stroke_style(ctx: &cairo::Context, color: Color, width: f64) {
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
}

/// Erases every pixel of the target surface to transparent.
pub fn clear_all(ctx: &cairo::Context) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Clear);
    let _ = ctx.paint();
    ctx.restore().ok();
}

/// Stamps a filled circle, used for taps of the pen and eraser.
pub fn render_dot(
    ctx: &cairo::Context,
    center: Point,
    radius: f64,
    color: Color,
    compositing: Compositing,
) {
    if radius <= 0.0 {
        return;
    }

    ctx.set_operator(compositing.operator());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.new_path();
    ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0);
    let _ = ctx.fill();
}

/// Strokes one straight segment of a freehand polyline.
pub fn render_segment(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    color: Color,
    width: f64,
    compositing: Compositing,
) {
    ctx.set_operator(compositing.operator());
    apply_stroke_style(ctx, color, width);
    ctx.new_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
}

/// Renders a rectangle spanning two corners, either outlined or filled.
pub fn render_rectangle(
    ctx: &cairo::Context,
    start: Point,
    end: Point,
    color: Color,
    width: f64,
    fill: bool,
) {
    let rect = Rect::from_corners(start, end);

    ctx.set_operator(cairo::Operator::Over);
    apply_stroke_style(ctx, color, width);
    ctx.new_path();
    ctx.rectangle(rect.x, rect.y, rect.width, rect.height);

    if fill {
        let _ = ctx.fill();
    } else {
        let _ = ctx.stroke();
    }
}

/// Renders an arrow: the shaft from `start` to `end` and a filled head at `end`.
pub fn render_arrow(
    ctx: &cairo::Context,
    start: Point,
    end: Point,
    color: Color,
    width: f64,
    head_length: f64,
    head_angle_degrees: f64,
) {
    ctx.set_operator(cairo::Operator::Over);
    apply_stroke_style(ctx, color, width);

    ctx.new_path();
    ctx.move_to(start.x, start.y);
    ctx.line_to(end.x, end.y);
    let _ = ctx.stroke();

    let [left, right] = util::arrowhead_points(start, end, head_length, head_angle_degrees);
    if left == end && right == end {
        return;
    }

    ctx.new_path();
    ctx.move_to(end.x, end.y);
    ctx.line_to(left.x, left.y);
    ctx.line_to(right.x, right.y);
    ctx.close_path();
    let _ = ctx.fill();
}

/// Renders a single line of text with its alphabetic baseline at `y`.
///
/// Uses Pango so the configured family/weight/style resolve against the
/// installed system fonts.
pub fn render_text(
    ctx: &cairo::Context,
    position: Point,
    text: &str,
    color: Color,
    font: &FontDescriptor,
) {
    if text.is_empty() {
        return;
    }

    // Save context state to prevent settings from leaking to other drawing operations
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Over);

    let layout = pangocairo::functions::create_layout(ctx);
    let mut font_desc = pango::FontDescription::from_string(&font.to_pango_string());
    font_desc.set_absolute_size(font.size * pango::SCALE as f64);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    // Pango positions layouts by their top-left corner; shift up to the baseline
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    ctx.move_to(position.x, position.y - baseline);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}
