use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, oneshot};

use crate::export::{
    dependencies::ExportDependencies,
    pipeline::{ExportRequest, perform_export},
    types::{ExportError, ExportOutcome, ExportStatus},
};

type Job = (ExportRequest, oneshot::Sender<ExportOutcome>);

/// Runs exports on a background task so the drawing surface never waits on them.
#[derive(Clone)]
pub struct ExportManager {
    /// Channel for sending export requests.
    request_tx: mpsc::UnboundedSender<Job>,
    /// Shared status of the current export.
    status: Arc<Mutex<ExportStatus>>,
    /// Outcome of the last export (if any).
    last_result: Arc<Mutex<Option<ExportOutcome>>>,
}

impl ExportManager {
    /// Create a new export manager.
    ///
    /// This spawns a background task on `runtime_handle` that processes
    /// requests one at a time.
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        Self::with_dependencies(runtime_handle, ExportDependencies::default())
    }

    /// Create an export manager with custom dependencies (useful for testing).
    pub fn with_dependencies(
        runtime_handle: &tokio::runtime::Handle,
        dependencies: ExportDependencies,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<Job>();
        let status = Arc::new(Mutex::new(ExportStatus::Idle));
        let last_result = Arc::new(Mutex::new(None));
        let dependencies = Arc::new(dependencies);

        let status_clone = status.clone();
        let result_clone = last_result.clone();

        runtime_handle.spawn(async move {
            while let Some((request, reply)) = request_rx.recv().await {
                log::debug!("Processing export request: {:?}", request);
                *status_clone.lock().await = ExportStatus::InProgress;

                let outcome = match perform_export(request, dependencies.clone()).await {
                    Ok(result) => {
                        for path in result.paths() {
                            log::info!("Exported sketch to {}", path.display());
                        }
                        *status_clone.lock().await = ExportStatus::Success;
                        ExportOutcome::Success(result)
                    }
                    Err(e) => {
                        let error_message = e.to_string();
                        log::error!("Export failed: {}", error_message);
                        *status_clone.lock().await = ExportStatus::Failed(error_message.clone());
                        ExportOutcome::Failed(error_message)
                    }
                };

                *result_clone.lock().await = Some(outcome.clone());
                if reply.send(outcome).is_err() {
                    log::debug!("Export requester went away before completion");
                }
            }
        });

        Self {
            request_tx,
            status,
            last_result,
        }
    }

    /// Queue an export.
    ///
    /// Non-blocking; the returned receiver resolves when the export finishes.
    pub fn request_export(
        &self,
        request: ExportRequest,
    ) -> Result<oneshot::Receiver<ExportOutcome>, ExportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request_tx
            .send((request, reply_tx))
            .map_err(|_| ExportError::NotRunning)?;
        Ok(reply_rx)
    }

    /// Get the current export status.
    pub async fn get_status(&self) -> ExportStatus {
        self.status.lock().await.clone()
    }

    /// Try to take the last outcome without waiting (non-blocking).
    pub fn try_take_result(&self) -> Option<ExportOutcome> {
        self.last_result.try_lock().ok().and_then(|mut r| r.take())
    }
}

#[cfg(test)]
impl ExportManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        drop(rx);
        Self {
            request_tx: tx,
            status: Arc::new(Mutex::new(ExportStatus::Idle)),
            last_result: Arc::new(Mutex::new(None)),
        }
    }
}
