use super::state::{DrawingState, Stroke};
use super::surface::DrawingSurface;
use crate::draw::{self, BLACK, Compositing};
use crate::input::{DrawingTool, PointerSample};
use crate::util::{self, Point};
use log::debug;

impl DrawingSurface {
    /// Maps a client-coordinate sample into canvas coordinates.
    fn map_sample(&self, sample: PointerSample) -> Option<Point> {
        let viewport = self.viewport?;
        Some(util::canvas_point(
            sample.client_x,
            sample.client_y,
            &viewport.bounds(),
        ))
    }

    /// Processes a pointer press (mouse button or first touch).
    ///
    /// # Behavior
    /// - Pending text entry: committed if it has visible text, otherwise dropped
    /// - Text tool: opens a new text entry at the pointer
    /// - Pen/Eraser: starts a gesture and stamps a dot
    /// - Rectangle/Arrow: starts a gesture and remembers the bitmap for previews
    /// - Select: starts a gesture that paints nothing
    pub fn pointer_down(&mut self, sample: PointerSample) {
        let Some(at) = self.map_sample(sample) else {
            return;
        };

        if matches!(self.state, DrawingState::TextEntry { .. }) {
            self.commit_or_discard_pending_text();
        }

        let settings = self.settings;
        if settings.tool == DrawingTool::Text {
            debug!("Text entry opened at ({:.1}, {:.1})", at.x, at.y);
            self.state = DrawingState::TextEntry {
                at,
                buffer: String::new(),
            };
            return;
        }

        let mut stroke = Stroke::begin(&settings, at);
        self.compositing = Compositing::SourceOver;

        if let Some(bitmap) = &self.bitmap {
            match settings.tool {
                DrawingTool::Pen => {
                    if let Some(ctx) = bitmap.context(settings.color, settings.size) {
                        draw::render_dot(
                            &ctx,
                            at,
                            settings.size / 2.0,
                            settings.color,
                            Compositing::SourceOver,
                        );
                    }
                }
                DrawingTool::Eraser => {
                    self.compositing = Compositing::DestinationOut;
                    // Destination-out erases by source alpha; keep it opaque
                    if let Some(ctx) = bitmap.context(BLACK, settings.size) {
                        draw::render_dot(&ctx, at, settings.size, BLACK, Compositing::DestinationOut);
                    }
                }
                DrawingTool::Rectangle | DrawingTool::Arrow => {
                    stroke.snapshot = bitmap.snapshot();
                }
                DrawingTool::Select | DrawingTool::Text => {}
            }
        }

        debug!("Gesture started with {} at ({:.1}, {:.1})", settings.tool, at.x, at.y);
        self.state = DrawingState::Gesturing(stroke);
    }

    /// Processes pointer motion; ignored unless a gesture is in progress.
    pub fn pointer_move(&mut self, sample: PointerSample) {
        let Some(current) = self.map_sample(sample) else {
            return;
        };
        let DrawingState::Gesturing(stroke) = &mut self.state else {
            return;
        };
        let Some(bitmap) = &self.bitmap else {
            return;
        };

        match stroke.tool {
            DrawingTool::Pen => {
                if let Some(ctx) = bitmap.context(stroke.color, stroke.width) {
                    draw::render_segment(
                        &ctx,
                        stroke.last,
                        current,
                        stroke.color,
                        stroke.width,
                        Compositing::SourceOver,
                    );
                }
            }
            DrawingTool::Eraser => {
                if let Some(ctx) = bitmap.context(BLACK, stroke.width) {
                    draw::render_segment(
                        &ctx,
                        stroke.last,
                        current,
                        BLACK,
                        stroke.width * 2.0,
                        Compositing::DestinationOut,
                    );
                }
            }
            DrawingTool::Rectangle | DrawingTool::Arrow => {
                // Each preview frame starts from the pre-gesture pixels
                if let Some(snapshot) = &stroke.snapshot {
                    bitmap.restore(snapshot);
                }
                if current != stroke.start
                    && let Some(ctx) = bitmap.context(stroke.color, stroke.width)
                {
                    if stroke.tool == DrawingTool::Rectangle {
                        draw::render_rectangle(
                            &ctx,
                            stroke.start,
                            current,
                            stroke.color,
                            stroke.width,
                            false,
                        );
                    } else {
                        draw::render_arrow(
                            &ctx,
                            stroke.start,
                            current,
                            stroke.color,
                            stroke.width,
                            self.style.arrow_head_base + stroke.width,
                            self.style.arrow_angle_degrees,
                        );
                    }
                }
            }
            DrawingTool::Select | DrawingTool::Text => {}
        }

        stroke.last = current;
    }

    /// Ends the current gesture. Safe to call without a matching press.
    pub fn pointer_up(&mut self) {
        self.stop_gesture();
    }

    /// Pointer left the surface; ends the gesture like a release.
    pub fn pointer_leave(&mut self) {
        self.stop_gesture();
    }

    fn stop_gesture(&mut self) {
        if let DrawingState::Gesturing(stroke) = &self.state {
            debug!("Gesture with {} ended", stroke.tool);
            self.state = DrawingState::Idle;
        }
        self.compositing = Compositing::SourceOver;
    }
}
