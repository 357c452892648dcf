//! Raster drawing surface.
//!
//! The surface owns one bitmap and turns pointer and key input into pixel
//! changes according to the host's current [`ToolSettings`]. Hosts hold it
//! through [`CanvasHandle`] to clear it or read the bitmap for saving.
//!
//! [`ToolSettings`]: crate::input::ToolSettings

mod bitmap;
mod pointer;
mod state;
mod surface;
mod text;
mod viewport;

pub use bitmap::{Bitmap, Pixel, decode_png};
pub use state::{DrawingState, Stroke};
pub use surface::{CanvasHandle, DrawingSurface, SurfaceError, SurfaceStyle};
pub use viewport::Viewport;
