//! Backing raster of the drawing surface.

use crate::draw::{self, Color};
use cairo::{Context, Format, ImageSurface};
use log::warn;
use std::io::Cursor;

/// ARGB32 pixel buffer plus the pixel ratio its contexts are scaled by.
pub struct Bitmap {
    surface: ImageSurface,
    pixel_ratio: f64,
}

/// One pixel as stored by Cairo: premultiplied red, green, blue, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Bitmap {
    /// Allocates a transparent bitmap of `width × height` backing pixels.
    pub fn create(width: u32, height: u32, pixel_ratio: f64) -> Result<Self, cairo::Error> {
        let width = i32::try_from(width).map_err(|_| cairo::Error::InvalidSize)?;
        let height = i32::try_from(height).map_err(|_| cairo::Error::InvalidSize)?;
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self {
            surface,
            pixel_ratio,
        })
    }

    pub fn width(&self) -> u32 {
        self.surface.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height().max(0) as u32
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Context in CSS pixels with round caps/joins, color and width applied.
    ///
    /// Returns `None` (and logs) if Cairo cannot create a context.
    pub fn context(&self, color: Color, width: f64) -> Option<Context> {
        let ctx = self.pixel_context()?;
        ctx.scale(self.pixel_ratio, self.pixel_ratio);
        draw::apply_stroke_style(&ctx, color, width);
        Some(ctx)
    }

    /// Unscaled context addressing backing pixels directly.
    pub fn pixel_context(&self) -> Option<Context> {
        match Context::new(&self.surface) {
            Ok(ctx) => Some(ctx),
            Err(err) => {
                warn!("Failed to create drawing context: {}", err);
                None
            }
        }
    }

    /// Erases the whole bitmap to transparent.
    pub fn clear(&self) {
        if let Some(ctx) = self.pixel_context() {
            draw::clear_all(&ctx);
        }
    }

    /// Copies the current pixels into a detached surface.
    pub fn snapshot(&self) -> Option<ImageSurface> {
        let copy = match ImageSurface::create(Format::ARgb32, self.surface.width(), self.surface.height()) {
            Ok(copy) => copy,
            Err(err) => {
                warn!("Failed to allocate bitmap snapshot: {}", err);
                return None;
            }
        };

        let ctx = Context::new(&copy).ok()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&self.surface, 0.0, 0.0).ok()?;
        if let Err(err) = ctx.paint() {
            warn!("Failed to copy bitmap snapshot: {}", err);
            return None;
        }
        drop(ctx);
        Some(copy)
    }

    /// Replaces every pixel with the contents of a same-sized snapshot.
    pub fn restore(&self, snapshot: &ImageSurface) {
        let Some(ctx) = self.pixel_context() else {
            return;
        };
        ctx.set_operator(cairo::Operator::Source);
        if ctx.set_source_surface(snapshot, 0.0, 0.0).is_ok() {
            let _ = ctx.paint();
        }
    }

    /// Draws `image` over the bitmap, stretched to the full backing size.
    pub fn draw_stretched(&self, image: &ImageSurface) {
        let (src_w, src_h) = (image.width(), image.height());
        if src_w <= 0 || src_h <= 0 || self.surface.width() <= 0 || self.surface.height() <= 0 {
            return;
        }

        let Some(ctx) = self.pixel_context() else {
            return;
        };
        ctx.scale(
            self.surface.width() as f64 / src_w as f64,
            self.surface.height() as f64 / src_h as f64,
        );
        if ctx.set_source_surface(image, 0.0, 0.0).is_ok() {
            let _ = ctx.paint();
        }
    }

    /// Encodes the bitmap as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, cairo::IoError> {
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }

    /// Reads one backing pixel; `None` when out of bounds or unreadable.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        let stride = self.surface.stride().max(0) as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut pixel = None;
        self.surface
            .with_data(|data| {
                if let Some(bytes) = data.get(offset..offset + 4) {
                    let value = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                    pixel = Some(Pixel {
                        a: (value >> 24) as u8,
                        r: (value >> 16) as u8,
                        g: (value >> 8) as u8,
                        b: value as u8,
                    });
                }
            })
            .ok()?;
        pixel
    }

    /// Returns true when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        let mut blank = true;
        let readable = self
            .surface
            .with_data(|data| blank = data.iter().all(|byte| *byte == 0))
            .is_ok();
        // Zero-sized surfaces have no data to read
        blank || !readable
    }
}

/// Decodes PNG bytes into a standalone image surface.
pub fn decode_png(bytes: &[u8]) -> Result<ImageSurface, cairo::IoError> {
    ImageSurface::create_from_png(&mut Cursor::new(bytes))
}
