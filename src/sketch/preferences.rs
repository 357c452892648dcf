//! Persisted toolbar selection.

use super::storage::KeyValueStore;
use crate::draw::Color;
use crate::input::settings::{MAX_SIZE, MIN_SIZE};
use crate::input::{DrawingTool, ToolSettings};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const PREFERENCES_KEY: &str = "sketchpad-preferences";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredPreferences {
    tool: DrawingTool,
    color: String,
    size: f64,
}

/// Loads and saves [`ToolSettings`] under [`PREFERENCES_KEY`].
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Stored settings, or `defaults` when missing or corrupt.
    pub fn load(&self, defaults: ToolSettings) -> ToolSettings {
        let raw = match self.backend.get(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return defaults,
            Err(err) => {
                error!("Failed to read preferences: {}", err);
                return defaults;
            }
        };

        let stored: StoredPreferences = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!("Ignoring corrupt preferences: {}", err);
                return defaults;
            }
        };

        let color = match Color::from_hex(&stored.color) {
            Ok(color) => color,
            Err(err) => {
                warn!("Ignoring stored color: {}", err);
                defaults.color
            }
        };
        let size = if stored.size.is_finite() {
            stored.size.clamp(MIN_SIZE, MAX_SIZE)
        } else {
            defaults.size
        };

        debug!("Restored preferences: {} {} {}", stored.tool, stored.color, size);
        ToolSettings::new(stored.tool, color, size)
    }

    pub fn save(&self, settings: &ToolSettings) -> bool {
        let stored = StoredPreferences {
            tool: settings.tool,
            color: settings.color.to_hex(),
            size: settings.size,
        };
        let result = serde_json::to_string(&stored)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.backend
                    .set(PREFERENCES_KEY, &json)
                    .map_err(|err| err.to_string())
            });

        match result {
            Ok(()) => true,
            Err(err) => {
                error!("Failed to save preferences: {}", err);
                false
            }
        }
    }
}
