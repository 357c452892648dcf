//! Persistence adapter for the saved sketch list.

use super::storage::KeyValueStore;
use super::types::SavedSketch;
use log::{debug, error, info, warn};
use std::sync::Arc;

pub const DEFAULT_SKETCHES_KEY: &str = "sketches";

/// Reads and writes the whole [`SavedSketch`] list under one storage key.
///
/// Never returns errors: a missing, unreadable or corrupt value loads as an
/// empty list, and a failed write is reported as `false`.
#[derive(Clone)]
pub struct SketchStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl SketchStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, DEFAULT_SKETCHES_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Vec<SavedSketch> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved sketches under '{}'", self.key);
                return Vec::new();
            }
            Err(err) => {
                error!("Failed to read saved sketches: {}", err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SavedSketch>>(&raw) {
            Ok(sketches) => {
                debug!("Loaded {} saved sketches", sketches.len());
                sketches
            }
            Err(err) => {
                warn!(
                    "Saved sketches under '{}' are corrupt, treating as empty: {}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    pub fn save(&self, sketches: &[SavedSketch]) -> bool {
        let json = match serde_json::to_string(sketches) {
            Ok(json) => json,
            Err(err) => {
                error!("Failed to serialise sketches: {}", err);
                return false;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => {
                info!("Saved {} sketches", sketches.len());
                true
            }
            Err(err) => {
                error!("Failed to write saved sketches: {}", err);
                false
            }
        }
    }
}
