use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use super::{
    dependencies::{DocumentEncoder, ExportDependencies, ExportFileSaver},
    file::ExportConfig,
    manager::ExportManager,
    pipeline::{ExportRequest, perform_export},
    types::{ExportError, ExportOutcome, ExportStatus},
};
use crate::config::ExportFormat;

#[derive(Clone, Default)]
struct MockEncoder {
    should_fail: bool,
    calls: Arc<Mutex<usize>>,
}

impl DocumentEncoder for MockEncoder {
    fn encode(&self, png: &[u8]) -> Result<Vec<u8>, ExportError> {
        *self.calls.lock().unwrap() += 1;
        if self.should_fail {
            Err(ExportError::Document("no PDF support".to_string()))
        } else {
            let mut doc = b"%PDF-mock ".to_vec();
            doc.extend_from_slice(png);
            Ok(doc)
        }
    }
}

#[derive(Clone, Default)]
struct MockSaver {
    should_fail: bool,
    written: Arc<Mutex<Vec<(PathBuf, Vec<u8>)>>>,
}

impl ExportFileSaver for MockSaver {
    fn save(&self, data: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
        if self.should_fail {
            return Err(ExportError::Io(std::io::Error::other("disk full")));
        }
        self.written
            .lock()
            .unwrap()
            .push((path.to_path_buf(), data.to_vec()));
        Ok(path.to_path_buf())
    }
}

fn create_placeholder_png(width: i32, height: i32) -> Vec<u8> {
    use cairo::{Context, Format, ImageSurface};

    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    ctx.set_source_rgb(0.88, 0.19, 0.19);
    ctx.rectangle(4.0, 4.0, 20.0, 10.0);
    ctx.fill().unwrap();
    drop(ctx);

    let mut buffer = Vec::new();
    surface.write_to_png(&mut buffer).unwrap();
    buffer
}

fn config_for(dir: &Path, format: ExportFormat) -> ExportConfig {
    ExportConfig {
        directory: dir.to_path_buf(),
        filename_template: "sketch_test".to_string(),
        format,
    }
}

#[test]
fn cairo_pdf_produces_complete_document() {
    let pdf = super::pdf::encode_pdf(&create_placeholder_png(64, 48)).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    let tail = String::from_utf8_lossy(&pdf[pdf.len().saturating_sub(16)..]).to_string();
    assert!(tail.contains("%%EOF"), "truncated document: {tail:?}");
}

#[test]
fn cairo_pdf_rejects_non_png_input() {
    let err = super::pdf::encode_pdf(b"nope").unwrap_err();
    assert!(err.to_string().starts_with("Failed to export as PDF."));
}

#[tokio::test]
async fn export_both_writes_png_and_pdf_with_shared_stem() {
    let saver = MockSaver::default();
    let encoder = MockEncoder::default();
    let deps = ExportDependencies {
        encoder: Arc::new(encoder.clone()),
        saver: Arc::new(saver.clone()),
    };
    let png = create_placeholder_png(32, 32);
    let request = ExportRequest::new(png.clone(), config_for(Path::new("/exports"), ExportFormat::Both));

    let result = perform_export(request, Arc::new(deps)).await.unwrap();

    assert_eq!(result.png_path, Some(PathBuf::from("/exports/sketch_test.png")));
    assert_eq!(result.pdf_path, Some(PathBuf::from("/exports/sketch_test.pdf")));
    let written = saver.written.lock().unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].1, png);
    assert!(written[1].1.starts_with(b"%PDF-mock"));
    assert_eq!(*encoder.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn export_png_only_skips_encoder() {
    let encoder = MockEncoder::default();
    let deps = ExportDependencies {
        encoder: Arc::new(encoder.clone()),
        saver: Arc::new(MockSaver::default()),
    };
    let request = ExportRequest::new(vec![1, 2, 3], config_for(Path::new("/x"), ExportFormat::Png));

    let result = perform_export(request, Arc::new(deps)).await.unwrap();
    assert!(result.pdf_path.is_none());
    assert_eq!(*encoder.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn encoder_failure_is_reported_as_pdf_failure() {
    let deps = ExportDependencies {
        encoder: Arc::new(MockEncoder {
            should_fail: true,
            ..MockEncoder::default()
        }),
        saver: Arc::new(MockSaver::default()),
    };
    let request = ExportRequest::new(vec![1], config_for(Path::new("/x"), ExportFormat::Pdf));

    let err = perform_export(request, Arc::new(deps)).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to export as PDF. no PDF support");
}

#[tokio::test]
async fn manager_writes_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let manager = ExportManager::new(&tokio::runtime::Handle::current());
    assert_eq!(manager.get_status().await, ExportStatus::Idle);

    let request = ExportRequest::new(
        create_placeholder_png(40, 30),
        config_for(&dir.path().join("out"), ExportFormat::Both),
    );
    let outcome = manager.request_export(request).unwrap().await.unwrap();

    let ExportOutcome::Success(result) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    let png_path = result.png_path.unwrap();
    let pdf_path = result.pdf_path.unwrap();
    assert!(std::fs::read(&png_path).unwrap().starts_with(&[137, 80, 78, 71]));
    assert!(std::fs::read(&pdf_path).unwrap().starts_with(b"%PDF-"));
    assert_eq!(manager.get_status().await, ExportStatus::Success);
}

#[tokio::test]
async fn manager_records_failure_status() {
    let deps = ExportDependencies {
        encoder: Arc::new(MockEncoder::default()),
        saver: Arc::new(MockSaver {
            should_fail: true,
            ..MockSaver::default()
        }),
    };
    let manager = ExportManager::with_dependencies(&tokio::runtime::Handle::current(), deps);

    let request = ExportRequest::new(vec![9], config_for(Path::new("/x"), ExportFormat::Png));
    let outcome = manager.request_export(request).unwrap().await.unwrap();

    match outcome {
        ExportOutcome::Failed(msg) => {
            assert!(msg.contains("disk full"), "unexpected failure message: {msg}");
        }
        other => panic!("Expected failure outcome, got {other:?}"),
    }
    assert!(matches!(manager.get_status().await, ExportStatus::Failed(_)));
    assert!(matches!(manager.try_take_result(), Some(ExportOutcome::Failed(_))));
    assert!(manager.try_take_result().is_none());
}

#[test]
fn request_export_returns_error_when_channel_closed() {
    let manager = ExportManager::with_closed_channel_for_test();
    let err = manager
        .request_export(ExportRequest::new(vec![], ExportConfig::default()))
        .expect_err("should fail when channel closed");
    assert!(matches!(err, ExportError::NotRunning), "unexpected error variant: {err:?}");
}
