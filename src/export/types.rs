//! Data types for sketch export.

use std::path::PathBuf;
use thiserror::Error;

/// Files written by a successful export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportResult {
    pub png_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

impl ExportResult {
    /// Written paths, PNG first.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.png_path.iter().chain(self.pdf_path.iter())
    }
}

/// Outcome of an export request (success or failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Success(ExportResult),
    Failed(String),
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to export as PDF. {0}")]
    Document(String),

    #[error("Export task failed: {0}")]
    Task(String),

    #[error("Export manager not running")]
    NotRunning,

    #[error("Drawing surface has no bitmap to export")]
    NoBitmap,
}

/// Status of the most recent export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Idle,
    InProgress,
    Success,
    Failed(String),
}
