//! Drawer listing saved sketches.

use super::types::SavedSketch;
use crate::canvas::{self, SurfaceError};
use crate::data_url;
use cairo::{Context, Format, ImageSurface};
use chrono::{DateTime, Local};
use log::debug;

pub const EMPTY_MESSAGE: &str = "No saved sketches yet.";

/// What the drawer shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserView {
    Closed,
    /// Open with nothing saved; carries [`EMPTY_MESSAGE`]
    Empty(&'static str),
    Entries(Vec<BrowserEntry>),
}

/// One row of the drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub id: String,
    pub name: String,
    /// Snapshot data URL, shown scaled down as the thumbnail
    pub thumbnail: String,
    /// Local-time rendering of the sketch date
    pub timestamp: String,
}

/// Request the drawer hands back to the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    /// Decode this data URL into the drawing surface
    Load(String),
    /// Remove the sketch with this id
    Delete(String),
}

#[derive(Debug, Default)]
pub struct SketchBrowser {
    open: bool,
}

impl SketchBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn view(&self, sketches: &[SavedSketch]) -> BrowserView {
        if !self.open {
            return BrowserView::Closed;
        }
        if sketches.is_empty() {
            return BrowserView::Empty(EMPTY_MESSAGE);
        }

        BrowserView::Entries(
            sketches
                .iter()
                .map(|sketch| BrowserEntry {
                    id: sketch.id.clone(),
                    name: sketch.name.clone(),
                    thumbnail: sketch.data_url.clone(),
                    timestamp: format_timestamp(&sketch.date),
                })
                .collect(),
        )
    }

    /// Selects a sketch for loading and closes the drawer.
    pub fn load(&mut self, sketch: &SavedSketch) -> BrowserAction {
        debug!("Loading sketch {} from browser", sketch.id);
        self.open = false;
        BrowserAction::Load(sketch.data_url.clone())
    }

    /// Requests removal of a sketch; the drawer stays open.
    pub fn delete(&self, id: &str) -> BrowserAction {
        BrowserAction::Delete(id.to_string())
    }
}

/// Formats an ISO-8601 date in local time; unparseable input is returned verbatim.
pub fn format_timestamp(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        Err(_) => date.to_string(),
    }
}

/// Decodes a snapshot and fits it inside a `width × height` thumbnail.
///
/// The image keeps its aspect ratio and is centered; the rest stays transparent.
pub fn render_thumbnail(
    url: &str,
    width: u32,
    height: u32,
) -> Result<ImageSurface, SurfaceError> {
    let bytes = data_url::decode_png(url)?;
    let image = canvas::decode_png(&bytes)?;

    let thumb_w = i32::try_from(width).unwrap_or(i32::MAX);
    let thumb_h = i32::try_from(height).unwrap_or(i32::MAX);
    let thumbnail = ImageSurface::create(Format::ARgb32, thumb_w, thumb_h)
        .map_err(|err| SurfaceError::Decode(cairo::IoError::Cairo(err)))?;

    if image.width() > 0 && image.height() > 0 && width > 0 && height > 0 {
        let scale = (width as f64 / image.width() as f64).min(height as f64 / image.height() as f64);
        let offset_x = (width as f64 - image.width() as f64 * scale) / 2.0;
        let offset_y = (height as f64 - image.height() as f64 * scale) / 2.0;

        let ctx = Context::new(&thumbnail)
            .map_err(|err| SurfaceError::Decode(cairo::IoError::Cairo(err)))?;
        ctx.translate(offset_x, offset_y);
        ctx.scale(scale, scale);
        if ctx.set_source_surface(&image, 0.0, 0.0).is_ok() {
            let _ = ctx.paint();
        }
    }

    Ok(thumbnail)
}
