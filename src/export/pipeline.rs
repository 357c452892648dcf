use std::{fmt, path::PathBuf, sync::Arc};

use crate::export::{
    dependencies::{DocumentEncoder, ExportDependencies, ExportFileSaver},
    file::{self, ExportConfig},
    types::{ExportError, ExportResult},
};
use tokio::task;

/// A snapshot to export, as encoded PNG bytes.
///
/// Cairo surfaces never cross threads; the worker decodes its own copy.
#[derive(Clone)]
pub struct ExportRequest {
    pub png: Vec<u8>,
    pub config: ExportConfig,
}

impl ExportRequest {
    pub fn new(png: Vec<u8>, config: ExportConfig) -> Self {
        Self { png, config }
    }
}

impl fmt::Debug for ExportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportRequest")
            .field("png_bytes", &self.png.len())
            .field("directory", &self.config.directory)
            .field("format", &self.config.format)
            .finish()
    }
}

pub(crate) async fn perform_export(
    request: ExportRequest,
    dependencies: Arc<ExportDependencies>,
) -> Result<ExportResult, ExportError> {
    log::info!("Starting export: {:?}", request);

    let ExportRequest { png, config } = request;
    let stem = file::generate_stem(&config.filename_template);
    let directory = config.directory.clone();
    let png = Arc::new(png);

    let png_path = if config.format.includes_png() {
        let target = directory.join(format!("{stem}.png"));
        Some(save_bytes(Arc::clone(&dependencies.saver), Arc::clone(&png), target).await?)
    } else {
        None
    };

    let pdf_path = if config.format.includes_pdf() {
        let document = encode_document(Arc::clone(&dependencies.encoder), Arc::clone(&png)).await?;
        log::debug!("Assembled PDF ({} bytes)", document.len());
        let target = directory.join(format!("{stem}.pdf"));
        Some(save_bytes(Arc::clone(&dependencies.saver), Arc::new(document), target).await?)
    } else {
        None
    };

    Ok(ExportResult { png_path, pdf_path })
}

async fn encode_document(
    encoder: Arc<dyn DocumentEncoder>,
    png: Arc<Vec<u8>>,
) -> Result<Vec<u8>, ExportError> {
    task::spawn_blocking(move || encoder.encode(&png))
        .await
        .map_err(|e| ExportError::Document(format!("PDF task failed: {}", e)))?
        .map_err(|e| match e {
            ExportError::Document(_) => e,
            other => ExportError::Document(other.to_string()),
        })
}

async fn save_bytes(
    saver: Arc<dyn ExportFileSaver>,
    data: Arc<Vec<u8>>,
    path: PathBuf,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || saver.save(&data, &path))
        .await
        .map_err(|e| ExportError::Task(format!("Save task failed: {}", e)))?
}
