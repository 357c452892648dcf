use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::export::{file, pdf, types::ExportError};

/// Turns a PNG snapshot into a portable document.
pub trait DocumentEncoder: Send + Sync {
    fn encode(&self, png: &[u8]) -> Result<Vec<u8>, ExportError>;
}

/// Abstraction over writing export files.
pub trait ExportFileSaver: Send + Sync {
    fn save(&self, data: &[u8], path: &Path) -> Result<PathBuf, ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub encoder: Arc<dyn DocumentEncoder>,
    pub saver: Arc<dyn ExportFileSaver>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            encoder: Arc::new(CairoPdfEncoder),
            saver: Arc::new(DefaultFileSaver),
        }
    }
}

/// Single-page PDF via Cairo's PDF backend.
pub struct CairoPdfEncoder;
struct DefaultFileSaver;

impl DocumentEncoder for CairoPdfEncoder {
    fn encode(&self, png: &[u8]) -> Result<Vec<u8>, ExportError> {
        pdf::encode_pdf(png)
    }
}

impl ExportFileSaver for DefaultFileSaver {
    fn save(&self, data: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
        file::write_export_file(data, path)
    }
}
