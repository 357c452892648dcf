//! RGBA color type, hex conversion and the toolbar palette.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use sketchpad::draw::Color;
/// let red: Color = "#e03131".parse().unwrap();
/// assert_eq!(red.to_hex(), "#e03131");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

/// Error returned when a color string is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color '{0}'")]
pub struct ParseColorError(pub String);

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the 8-bit channels, rounding each component.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }

    /// Parses `#rrggbb` or the short `#rgb` form (leading `#` optional).
    pub fn from_hex(value: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(value.to_string());
        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| err());
                Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Self::from_rgb8(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Formats the color as lowercase `#rrggbb` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ============================================================================
// Predefined Color Constants (toolbar palette)
// ============================================================================

/// Palette black (#000000)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Palette red (#e03131)
pub const RED: Color = Color {
    r: 224.0 / 255.0,
    g: 49.0 / 255.0,
    b: 49.0 / 255.0,
    a: 1.0,
};

/// Palette green (#2f9e44)
pub const GREEN: Color = Color {
    r: 47.0 / 255.0,
    g: 158.0 / 255.0,
    b: 68.0 / 255.0,
    a: 1.0,
};

/// Palette blue (#1971c2)
pub const BLUE: Color = Color {
    r: 25.0 / 255.0,
    g: 113.0 / 255.0,
    b: 194.0 / 255.0,
    a: 1.0,
};

/// Palette orange (#f08c00)
pub const ORANGE: Color = Color {
    r: 240.0 / 255.0,
    g: 140.0 / 255.0,
    b: 0.0,
    a: 1.0,
};

/// Palette purple (#9c36b5)
pub const PURPLE: Color = Color {
    r: 156.0 / 255.0,
    g: 54.0 / 255.0,
    b: 181.0 / 255.0,
    a: 1.0,
};

/// Palette white (#ffffff)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Default palette in toolbar order.
pub const PALETTE: [Color; 7] = [BLACK, RED, GREEN, BLUE, ORANGE, PURPLE, WHITE];

/// Maps color name strings to palette colors (case-insensitive).
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "orange" => Some(ORANGE),
        "purple" => Some(PURPLE),
        "white" => Some(WHITE),
        _ => None,
    }
}
