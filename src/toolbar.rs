//! Toolbar view model.
//!
//! The toolbar is controlled: it never stores the active tool, color or size.
//! It renders from the host's [`ToolSettings`] and turns user intents into
//! [`ToolbarEvent`]s for the host to apply.

use crate::config::ToolbarConfig;
use crate::draw::{Color, PALETTE};
use crate::input::{DrawingTool, ToolSettings};
use log::debug;

/// Intent emitted by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarEvent {
    SelectTool(DrawingTool),
    SelectColor(Color),
    /// Stroke width, already clamped to the toolbar range
    SetSize(f64),
    Clear,
    Save,
    Export,
}

/// One tool button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolButton {
    pub tool: DrawingTool,
    pub label: &'static str,
    pub active: bool,
}

/// One palette swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub color: Color,
    pub selected: bool,
}

pub struct Toolbar {
    palette: Vec<Color>,
    min_size: f64,
    max_size: f64,
    enable_shape_tools: bool,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            palette: PALETTE.to_vec(),
            min_size: crate::input::settings::MIN_SIZE,
            max_size: crate::input::settings::MAX_SIZE,
            enable_shape_tools: false,
        }
    }
}

impl Toolbar {
    pub fn from_config(config: &ToolbarConfig) -> Self {
        let mut palette = config.palette_colors();
        if palette.is_empty() {
            palette = PALETTE.to_vec();
        }
        Self {
            palette,
            min_size: config.min_size,
            max_size: config.max_size.max(config.min_size),
            enable_shape_tools: config.enable_shape_tools,
        }
    }

    /// Tools offered in display order. Rectangle and arrow appear only when enabled.
    pub fn available_tools(&self) -> impl Iterator<Item = DrawingTool> + '_ {
        DrawingTool::ALL
            .into_iter()
            .filter(|tool| self.enable_shape_tools || !tool.is_shape())
    }

    pub fn is_available(&self, tool: DrawingTool) -> bool {
        self.enable_shape_tools || !tool.is_shape()
    }

    /// Tool buttons with the host's active tool marked.
    pub fn tools(&self, settings: &ToolSettings) -> Vec<ToolButton> {
        self.available_tools()
            .map(|tool| ToolButton {
                tool,
                label: tool.label(),
                active: tool == settings.tool,
            })
            .collect()
    }

    /// Palette swatches with the host's color marked.
    pub fn swatches(&self, settings: &ToolSettings) -> Vec<Swatch> {
        self.palette
            .iter()
            .map(|&color| Swatch {
                color,
                selected: color.to_hex() == settings.color.to_hex(),
            })
            .collect()
    }

    /// Stroke width range of the size slider.
    pub fn size_range(&self) -> (f64, f64) {
        (self.min_size, self.max_size)
    }

    pub fn select_tool(&self, tool: DrawingTool) -> Option<ToolbarEvent> {
        if !self.is_available(tool) {
            debug!("Ignoring hidden tool {}", tool);
            return None;
        }
        Some(ToolbarEvent::SelectTool(tool))
    }

    /// Picks a palette swatch by index.
    pub fn select_swatch(&self, index: usize) -> Option<ToolbarEvent> {
        self.palette
            .get(index)
            .map(|&color| ToolbarEvent::SelectColor(color))
    }

    /// Custom color picker input (`#rrggbb` or `#rgb`).
    pub fn pick_custom_color(&self, value: &str) -> Option<ToolbarEvent> {
        match Color::from_hex(value) {
            Ok(color) => Some(ToolbarEvent::SelectColor(color)),
            Err(err) => {
                debug!("Ignoring custom color: {}", err);
                None
            }
        }
    }

    /// Size slider input; non-finite values are ignored.
    pub fn set_size(&self, size: f64) -> Option<ToolbarEvent> {
        if !size.is_finite() {
            return None;
        }
        Some(ToolbarEvent::SetSize(size.clamp(self.min_size, self.max_size)))
    }

    pub fn clear(&self) -> ToolbarEvent {
        ToolbarEvent::Clear
    }

    pub fn save(&self) -> ToolbarEvent {
        ToolbarEvent::Save
    }

    pub fn export(&self) -> ToolbarEvent {
        ToolbarEvent::Export
    }
}
