//! Exporting sketches to disk.
//!
//! This module writes the current bitmap as:
//! - A PNG image
//! - A single-page PDF sized to the bitmap
//!
//! Work runs on a tokio runtime through [`ExportManager`]; file and PDF
//! steps run on the blocking pool.

pub mod file;
pub mod pdf;
pub mod types;

mod dependencies;
mod manager;
mod pipeline;
#[cfg(test)]
mod tests;

pub use dependencies::{CairoPdfEncoder, DocumentEncoder, ExportDependencies, ExportFileSaver};
pub use file::{ExportConfig, expand_tilde};
pub use manager::ExportManager;
pub use pipeline::ExportRequest;
pub use types::{ExportError, ExportOutcome, ExportResult, ExportStatus};
