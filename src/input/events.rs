//! Generic input event types delivered to the drawing surface.

/// Keys the text entry reacts to.
///
/// Hosts map their native key codes to these values; everything else is
/// delivered as [`Key::Unknown`] and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key
    Char(char),
    /// Escape key (discard pending text)
    Escape,
    /// Return/Enter key (commit pending text)
    Return,
    /// Backspace key
    Backspace,
    /// Unmapped or unrecognized key
    Unknown,
}

/// A pointer position in client coordinates.
///
/// Mouse events carry one position; touch events use the first finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerSample {
    pub fn mouse(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Builds a sample from the first active touch, if any.
    pub fn from_touches(touches: &[(f64, f64)]) -> Option<Self> {
        touches
            .first()
            .map(|&(client_x, client_y)| Self { client_x, client_y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_first_finger() {
        let sample = PointerSample::from_touches(&[(3.0, 4.0), (9.0, 9.0)]).unwrap();
        assert_eq!(sample, PointerSample::mouse(3.0, 4.0));
        assert!(PointerSample::from_touches(&[]).is_none());
    }
}
