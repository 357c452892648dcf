//! Configuration type definitions.

use super::enums::{ColorSpec, ExportFormat};
use crate::draw::{Color, PALETTE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool settings a new sketchpad starts with and the font used
/// for text annotations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - a palette name (black, red, green, blue, orange, purple, white),
    /// a hex string like `"#e03131"`, or an RGB array like `[224, 49, 49]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in CSS pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_size")]
    pub default_size: f64,

    /// Font family name for text annotations (e.g., "Sans", "Monospace")
    /// Falls back to the Pango default if the family is not installed
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Text annotation size in CSS pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_size: default_size(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length before the stroke width is added (valid range: 0.0 - 50.0)
    #[serde(default = "default_arrow_head_base")]
    pub head_base: f64,

    /// Angle between each side of the head and the shaft (valid range: 15.0 - 60.0)
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            head_base: default_arrow_head_base(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Toolbar contents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolbarConfig {
    /// Swatches in display order, as hex strings
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Smallest selectable stroke width
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// Largest selectable stroke width
    #[serde(default = "default_max_size")]
    pub max_size: f64,

    /// Show the rectangle and arrow tools
    #[serde(default)]
    pub enable_shape_tools: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            enable_shape_tools: false,
        }
    }
}

impl ToolbarConfig {
    /// Parses the palette, skipping entries that are not valid hex colors.
    pub fn palette_colors(&self) -> Vec<Color> {
        self.palette
            .iter()
            .filter_map(|hex| match Color::from_hex(hex) {
                Ok(color) => Some(color),
                Err(err) => {
                    log::warn!("Ignoring palette entry: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// Where saved sketches and preferences live.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// Data directory; defaults to `<data dir>/sketchpad` (supports `~/`)
    #[serde(default)]
    pub directory: Option<String>,

    /// Key under which the sketch list is stored
    #[serde(default = "default_sketches_key")]
    pub sketches_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: None,
            sketches_key: default_sketches_key(),
        }
    }
}

/// Export destination and naming.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportSettings {
    /// Output directory; defaults to `~/Pictures/Sketchpad` (supports `~/`)
    #[serde(default)]
    pub directory: Option<String>,

    /// File name template without extension (chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Which files to write: "png", "pdf" or "both"
    #[serde(default)]
    pub format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filename_template: default_filename_template(),
            format: ExportFormat::default(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_size() -> f64 {
    3.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_arrow_head_base() -> f64 {
    10.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_palette() -> Vec<String> {
    PALETTE.iter().map(Color::to_hex).collect()
}

fn default_min_size() -> f64 {
    1.0
}

fn default_max_size() -> f64 {
    20.0
}

fn default_sketches_key() -> String {
    "sketches".to_string()
}

pub(crate) fn default_filename_template() -> String {
    "sketch_%Y-%m-%d_%H%M%S".to_string()
}
