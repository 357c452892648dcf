//! Sketchpad: a raster drawing surface with pen, eraser, text and shape tools,
//! a toolbar view model, named snapshots in durable storage, and PNG/PDF export.
//!
//! The `sketchpad` binary drives the same modules headlessly for listing,
//! importing, exporting and deleting saved sketches.

pub mod app;
pub mod canvas;
pub mod config;
pub mod data_url;
pub mod draw;
pub mod export;
pub mod input;
pub mod sketch;
pub mod toolbar;
pub mod util;

pub use app::{HostRequest, Sketchpad};
pub use config::Config;
