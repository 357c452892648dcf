//! Configuration enum types.

use crate::draw::{BLACK, Color, color::name_to_color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which files an export writes.
#[derive(
    Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG image only
    Png,
    /// Single-page PDF only
    Pdf,
    /// Both the PNG and the PDF
    #[default]
    Both,
}

impl ExportFormat {
    pub fn includes_png(self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Both)
    }

    pub fn includes_pdf(self) -> bool {
        matches!(self, ExportFormat::Pdf | ExportFormat::Both)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Both => "both",
        })
    }
}

/// Color specification - a palette name, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex color
/// default_color = "#1971c2"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name (black, red, green, blue, orange, purple, white) or `#rrggbb`/`#rgb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unknown names and malformed hex strings fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => name_to_color(name)
                .or_else(|| Color::from_hex(name).ok())
                .unwrap_or_else(|| {
                    warn!("Unknown color '{}', using black", name);
                    BLACK
                }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
