//! Single-page PDF assembly with Cairo.

use super::types::ExportError;
use crate::canvas;
use cairo::{Context, PdfSurface};

/// Wraps a PNG snapshot in a one-page PDF sized `width × height` points.
///
/// The image is drawn full-bleed at the origin, one point per pixel.
pub fn encode_pdf(png: &[u8]) -> Result<Vec<u8>, ExportError> {
    let image = canvas::decode_png(png)
        .map_err(|err| ExportError::Document(format!("Invalid snapshot: {}", err)))?;
    let (width, height) = (image.width() as f64, image.height() as f64);
    if width <= 0.0 || height <= 0.0 {
        return Err(ExportError::Document("Snapshot is empty".to_string()));
    }

    let surface = PdfSurface::for_stream(width, height, Vec::<u8>::new())
        .map_err(|err| ExportError::Document(err.to_string()))?;
    {
        let ctx = Context::new(&surface).map_err(|err| ExportError::Document(err.to_string()))?;
        ctx.set_source_surface(&image, 0.0, 0.0)
            .map_err(|err| ExportError::Document(err.to_string()))?;
        ctx.paint()
            .map_err(|err| ExportError::Document(err.to_string()))?;
    }

    let stream = surface
        .finish_output_stream()
        .map_err(|err| ExportError::Document(err.error.to_string()))?;
    stream
        .downcast::<Vec<u8>>()
        .map(|bytes| *bytes)
        .map_err(|_| ExportError::Document("Unexpected PDF output stream".to_string()))
}
