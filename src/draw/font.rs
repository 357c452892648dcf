//! Font descriptor for text annotations.

/// Font configuration for text rendering.
///
/// Describes which font to use, including family name, weight, style and the
/// absolute pixel size text annotations are drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,

    /// Size in CSS pixels
    pub size: f64,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
            size: 16.0,
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String, size: f64) -> Self {
        Self {
            family,
            weight,
            style,
            size,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// The size is left out; it is applied as an absolute pixel size by the
    /// renderer. Example: "Sans" or "Monospace Italic Bold".
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        if self.style.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.style));
        }

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.join(" ")
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_canvas_sans_16px() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(), "Sans");
        assert_eq!(font.size, 16.0);
    }

    #[test]
    fn style_and_weight_are_capitalised() {
        let font = FontDescriptor::new(
            "JetBrains Mono".to_string(),
            "light".to_string(),
            "italic".to_string(),
            12.0,
        );
        assert_eq!(font.to_pango_string(), "JetBrains Mono Italic Light");
    }
}
