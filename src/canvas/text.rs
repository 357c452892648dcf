use super::state::DrawingState;
use super::surface::DrawingSurface;
use crate::draw::{self, TextAnnotation};
use crate::input::Key;
use crate::util::Point;
use log::debug;

impl DrawingSurface {
    /// Replaces the pending text buffer (controlled input). Ignored without an open entry.
    pub fn text_input(&mut self, value: &str) {
        if let DrawingState::TextEntry { buffer, .. } = &mut self.state {
            buffer.clear();
            buffer.push_str(value);
        }
    }

    /// Processes a key press while a text entry is open.
    ///
    /// # Behavior
    /// - `Char`: appends to the buffer
    /// - `Backspace`: removes the last character
    /// - `Return`: commits non-blank text, keeps a blank entry open
    /// - `Escape`: discards the entry
    pub fn key_press(&mut self, key: Key) {
        let DrawingState::TextEntry { buffer, .. } = &mut self.state else {
            return;
        };

        match key {
            Key::Char(ch) => buffer.push(ch),
            Key::Backspace => {
                buffer.pop();
            }
            Key::Return => {
                if buffer.trim().is_empty() {
                    return;
                }
                if let DrawingState::TextEntry { at, buffer } = std::mem::take(&mut self.state) {
                    self.commit_text(at, buffer);
                }
            }
            Key::Escape => {
                debug!("Text entry discarded");
                self.state = DrawingState::Idle;
            }
            Key::Unknown => {}
        }
    }

    /// Closes an open text entry, committing it when it holds visible text.
    pub(super) fn commit_or_discard_pending_text(&mut self) {
        if let DrawingState::TextEntry { at, buffer } = std::mem::take(&mut self.state) {
            if buffer.trim().is_empty() {
                debug!("Blank text entry dropped");
            } else {
                self.commit_text(at, buffer);
            }
        }
    }

    fn commit_text(&mut self, at: Point, value: String) {
        let annotation = TextAnnotation::new(at, value, self.settings.color);
        if let Some(ctx) = self
            .bitmap
            .as_ref()
            .and_then(|bitmap| bitmap.context(annotation.color, self.settings.size))
        {
            draw::render_text(
                &ctx,
                annotation.position(),
                &annotation.value,
                annotation.color,
                &self.style.font,
            );
        }
        debug!(
            "Committed text annotation {} at ({:.1}, {:.1})",
            annotation.id, annotation.x, annotation.y
        );
        self.annotations.push(annotation);
        self.state = DrawingState::Idle;
    }
}
