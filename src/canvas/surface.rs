//! The drawing surface: bitmap ownership, mounting, resize and snapshots.

use super::bitmap::{self, Bitmap, Pixel};
use super::state::DrawingState;
use super::viewport::Viewport;
use crate::data_url::{self, DataUrlError};
use crate::draw::{self, Compositing, FontDescriptor, TextAnnotation};
use crate::input::{Cursor, ToolSettings};
use crate::util::Point;
use cairo::ImageSurface;
use log::{debug, info, warn};
use thiserror::Error;

/// Errors reported by the surface's load operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing surface is not mounted")]
    Unmounted,

    #[error("invalid snapshot: {0}")]
    DataUrl(#[from] DataUrlError),

    #[error("failed to decode snapshot image: {0}")]
    Decode(#[from] cairo::IoError),
}

/// Appearance parameters that do not change per gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    /// Font for text annotations
    pub font: FontDescriptor,
    /// Arrowhead length before the stroke width is added
    pub arrow_head_base: f64,
    /// Angle between each side of the arrowhead and the shaft
    pub arrow_angle_degrees: f64,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            font: FontDescriptor::default(),
            arrow_head_base: 10.0,
            arrow_angle_degrees: 30.0,
        }
    }
}

/// Capability handed to the host page: clear the bitmap or borrow it for export.
pub trait CanvasHandle {
    /// Erases the bitmap and forgets all text annotations.
    fn clear(&mut self);

    /// Current raster, or `None` before the surface is mounted.
    fn bitmap(&self) -> Option<&ImageSurface>;
}

/// Raster drawing surface driven by pointer and key input.
///
/// Owns a single bitmap whose backing size tracks the viewport times the
/// device pixel ratio. Every operation is a no-op until [`mount`] is called.
///
/// [`mount`]: DrawingSurface::mount
pub struct DrawingSurface {
    pub(super) bitmap: Option<Bitmap>,
    pub(super) viewport: Option<Viewport>,
    pub(super) settings: ToolSettings,
    pub(super) style: SurfaceStyle,
    pub(super) state: DrawingState,
    pub(super) annotations: Vec<TextAnnotation>,
    pub(super) compositing: Compositing,
}

impl DrawingSurface {
    /// Creates an unmounted surface with the given initial tool settings.
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_style(settings, SurfaceStyle::default())
    }

    pub fn with_style(settings: ToolSettings, style: SurfaceStyle) -> Self {
        Self {
            bitmap: None,
            viewport: None,
            settings,
            style,
            state: DrawingState::Idle,
            annotations: Vec::new(),
            compositing: Compositing::SourceOver,
        }
    }

    /// Allocates the bitmap for the given viewport.
    pub fn mount(&mut self, viewport: Viewport) {
        self.resize(viewport);
    }

    /// Drops the bitmap; the surface degrades to no-ops until mounted again.
    pub fn unmount(&mut self) {
        self.bitmap = None;
        self.viewport = None;
        self.state = DrawingState::Idle;
        self.compositing = Compositing::SourceOver;
    }

    pub fn is_mounted(&self) -> bool {
        self.bitmap.is_some()
    }

    /// Updates tool, color and stroke width used by subsequent pointer events.
    pub fn apply_settings(&mut self, settings: &ToolSettings) {
        self.settings = *settings;
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    /// Reallocates the bitmap for a new viewport, keeping what was drawn.
    ///
    /// Captures the current pixels, recreates the backing store at the new
    /// size, redraws all text annotations in order, then draws the captured
    /// pixels stretched over the new backing size. The whole sequence runs
    /// before this returns, so no blank frame is ever observable.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == Some(viewport) && self.bitmap.is_some() {
            return;
        }

        let previous = self.bitmap.as_ref().and_then(Bitmap::snapshot);
        let (width, height) = viewport.backing_size();
        let bitmap = match Bitmap::create(width, height, viewport.ratio()) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                warn!(
                    "Failed to allocate {}x{} bitmap, keeping previous surface: {}",
                    width, height, err
                );
                return;
            }
        };

        if let Some(ctx) = bitmap.context(self.settings.color, self.settings.size) {
            for annotation in &self.annotations {
                draw::render_text(
                    &ctx,
                    annotation.position(),
                    &annotation.value,
                    annotation.color,
                    &self.style.font,
                );
            }
        }

        if let Some(previous) = previous {
            bitmap.draw_stretched(&previous);
        }

        // A shape preview snapshot no longer matches the new backing size
        self.interrupt_gesture("resize");

        debug!(
            "Surface backing size {}x{} (ratio {:.2})",
            width,
            height,
            viewport.ratio()
        );
        self.bitmap = Some(bitmap);
        self.viewport = Some(viewport);
    }

    /// Erases the entire bitmap, discards all text annotations and ends any
    /// active gesture.
    pub fn clear(&mut self) {
        self.interrupt_gesture("clear");
        if let Some(bitmap) = &self.bitmap {
            bitmap.clear();
        }
        self.annotations.clear();
    }

    /// Drops an in-progress gesture without drawing anything further.
    fn interrupt_gesture(&mut self, cause: &str) {
        if matches!(self.state, DrawingState::Gesturing(_)) {
            debug!("{} interrupted an active gesture", cause);
            self.state = DrawingState::Idle;
            self.compositing = Compositing::SourceOver;
        }
    }

    /// Current raster, or `None` before the surface is mounted.
    pub fn bitmap(&self) -> Option<&ImageSurface> {
        self.bitmap.as_ref().map(Bitmap::surface)
    }

    /// Backing pixel dimensions, if mounted.
    pub fn backing_size(&self) -> Option<(u32, u32)> {
        self.bitmap.as_ref().map(|b| (b.width(), b.height()))
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Reads one backing pixel (premultiplied).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.bitmap.as_ref()?.pixel(x, y)
    }

    /// True when mounted and no pixel has been painted.
    pub fn is_blank(&self) -> bool {
        self.bitmap.as_ref().is_some_and(Bitmap::is_blank)
    }

    /// Committed text annotations in insertion order.
    pub fn annotations(&self) -> &[TextAnnotation] {
        &self.annotations
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Whether a pointer gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Gesturing(_))
    }

    /// Position and buffer of the open text entry, if any.
    pub fn pending_text(&self) -> Option<(Point, &str)> {
        match &self.state {
            DrawingState::TextEntry { at, buffer } => Some((*at, buffer.as_str())),
            _ => None,
        }
    }

    /// Compositing mode currently in effect.
    pub fn compositing(&self) -> Compositing {
        self.compositing
    }

    /// Pointer cursor for the active tool.
    pub fn cursor(&self) -> Cursor {
        self.settings.tool.cursor()
    }

    /// Encodes the bitmap as PNG. `None` when unmounted or encoding fails.
    pub fn encode_png(&self) -> Option<Vec<u8>> {
        let bitmap = self.bitmap.as_ref()?;
        match bitmap.encode_png() {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!("Failed to encode bitmap as PNG: {}", err);
                None
            }
        }
    }

    /// Encodes the bitmap as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> Option<String> {
        self.encode_png().map(|bytes| data_url::encode_png(&bytes))
    }

    /// Replaces the bitmap with a PNG image stretched to the backing size.
    ///
    /// The image is decoded first; if decoding fails the current bitmap and
    /// annotations are left untouched.
    pub fn load_png(&mut self, bytes: &[u8]) -> Result<(), SurfaceError> {
        if self.bitmap.is_none() {
            return Err(SurfaceError::Unmounted);
        }

        let image = bitmap::decode_png(bytes)?;
        self.clear();
        if let Some(bitmap) = &self.bitmap {
            bitmap.draw_stretched(&image);
        }
        info!(
            "Loaded {}x{} snapshot into surface",
            image.width(),
            image.height()
        );
        Ok(())
    }

    /// Decodes a PNG data URL and loads it like [`load_png`](Self::load_png).
    pub fn load_data_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        if self.bitmap.is_none() {
            return Err(SurfaceError::Unmounted);
        }
        let bytes = data_url::decode_png(url)?;
        self.load_png(&bytes)
    }
}

impl CanvasHandle for DrawingSurface {
    fn clear(&mut self) {
        DrawingSurface::clear(self);
    }

    fn bitmap(&self) -> Option<&ImageSurface> {
        DrawingSurface::bitmap(self)
    }
}
