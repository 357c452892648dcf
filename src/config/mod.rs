//! Configuration file support for sketchpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpad/config.toml`. Settings include drawing defaults,
//! arrow appearance, toolbar contents, storage location and export naming.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, ExportFormat};
pub use types::{ArrowConfig, DrawingConfig, ExportSettings, StorageConfig, ToolbarConfig};

use crate::canvas::SurfaceStyle;
use crate::draw::FontDescriptor;
use crate::export::{ExportConfig, expand_tilde};
use crate::input::ToolSettings;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#e03131"
/// default_size = 5.0
///
/// [arrow]
/// head_base = 10.0
/// angle_degrees = 30.0
///
/// [toolbar]
/// enable_shape_tools = true
///
/// [export]
/// directory = "~/Documents/sketches"
/// format = "pdf"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial tool settings and text annotation font
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Palette and size range offered by the toolbar
    #[serde(default)]
    pub toolbar: ToolbarConfig,

    /// Saved sketch storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Export destination and naming
    #[serde(default)]
    pub export: ExportSettings,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `toolbar.min_size` / `toolbar.max_size`: 1.0 - 20.0, min never above max
    /// - `default_size`: the toolbar size range
    /// - `font_size`: 8.0 - 72.0
    /// - `arrow.head_base`: 0.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    pub fn validate_and_clamp(&mut self) {
        for (label, value) in [
            ("min_size", &mut self.toolbar.min_size),
            ("max_size", &mut self.toolbar.max_size),
        ] {
            if !(1.0..=20.0).contains(&*value) {
                log::warn!(
                    "Invalid toolbar {} {:.1}, clamping to 1.0-20.0 range",
                    label,
                    value
                );
                *value = value.clamp(1.0, 20.0);
            }
        }

        if self.toolbar.min_size > self.toolbar.max_size {
            log::warn!(
                "Toolbar min_size {:.1} exceeds max_size {:.1}, swapping",
                self.toolbar.min_size,
                self.toolbar.max_size
            );
            std::mem::swap(&mut self.toolbar.min_size, &mut self.toolbar.max_size);
        }

        let (min, max) = (self.toolbar.min_size, self.toolbar.max_size);
        if !(min..=max).contains(&self.drawing.default_size) {
            log::warn!(
                "Invalid default_size {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_size,
                min,
                max
            );
            self.drawing.default_size = self.drawing.default_size.clamp(min, max);
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.drawing.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.font_size
            );
            self.drawing.font_size = self.drawing.font_size.clamp(8.0, 72.0);
        }

        // Arrow head base: 0.0 - 50.0
        if !(0.0..=50.0).contains(&self.arrow.head_base) {
            log::warn!(
                "Invalid arrow head_base {:.1}, clamping to 0.0-50.0 range",
                self.arrow.head_base
            );
            self.arrow.head_base = self.arrow.head_base.clamp(0.0, 50.0);
        }

        // Arrow angle: 15.0 - 60.0 degrees
        if !(15.0..=60.0).contains(&self.arrow.angle_degrees) {
            log::warn!(
                "Invalid arrow angle {:.1}°, clamping to 15.0-60.0° range",
                self.arrow.angle_degrees
            );
            self.arrow.angle_degrees = self.arrow.angle_degrees.clamp(15.0, 60.0);
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        // Validate font style
        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.toolbar.palette_colors().is_empty() {
            log::warn!("Toolbar palette has no valid colors, restoring the default palette");
            self.toolbar.palette = ToolbarConfig::default().palette;
        }

        if self.storage.sketches_key.trim().is_empty() {
            log::warn!("Empty storage sketches_key, falling back to 'sketches'");
            self.storage.sketches_key = StorageConfig::default().sketches_key;
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty export filename_template, falling back to the default");
            self.export.filename_template = types::default_filename_template();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Tool settings a fresh sketchpad starts with.
    pub fn default_tool_settings(&self) -> ToolSettings {
        ToolSettings {
            color: self.drawing.default_color.to_color(),
            size: self.drawing.default_size,
            ..ToolSettings::default()
        }
    }

    /// Font used for text annotations.
    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
            self.drawing.font_size,
        )
    }

    /// Surface appearance derived from the drawing and arrow sections.
    pub fn surface_style(&self) -> SurfaceStyle {
        SurfaceStyle {
            font: self.font(),
            arrow_head_base: self.arrow.head_base,
            arrow_angle_degrees: self.arrow.angle_degrees,
        }
    }

    /// Directory holding the sketch store and preferences.
    ///
    /// # Errors
    /// Returns an error if no directory is configured and the platform data
    /// directory cannot be determined.
    pub fn storage_directory(&self) -> Result<PathBuf> {
        match &self.storage.directory {
            Some(dir) => Ok(expand_tilde(dir)),
            None => Ok(dirs::data_dir()
                .context("Could not find data directory")?
                .join("sketchpad")),
        }
    }

    /// Export destination built from the `[export]` section.
    pub fn export_config(&self) -> ExportConfig {
        let mut export = ExportConfig {
            filename_template: self.export.filename_template.clone(),
            format: self.export.format,
            ..ExportConfig::default()
        };
        if let Some(dir) = &self.export.directory {
            export.directory = expand_tilde(dir);
        }
        export
    }
}
