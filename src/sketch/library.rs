//! In-memory sketch list kept in sync with its store.

use super::store::SketchStore;
use super::types::{SavedSketch, SketchError};
use chrono::{DateTime, Utc};
use log::info;

/// Ordered list of saved sketches.
///
/// Every mutation rewrites the whole list through the [`SketchStore`]. If
/// that write fails the mutation is rolled back so memory and storage agree.
pub struct SketchLibrary {
    store: SketchStore,
    sketches: Vec<SavedSketch>,
}

impl SketchLibrary {
    /// Loads the current list from the store.
    pub fn open(store: SketchStore) -> Self {
        let sketches = store.load();
        Self { store, sketches }
    }

    /// Sketches in insertion order.
    pub fn sketches(&self) -> &[SavedSketch] {
        &self.sketches
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sketches.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SavedSketch> {
        self.sketches.iter().find(|sketch| sketch.id == id)
    }

    /// Re-reads the list from storage, dropping unsaved in-memory state.
    pub fn reload(&mut self) {
        self.sketches = self.store.load();
    }

    /// Appends a sketch created now.
    pub fn add(&mut self, name: &str, data_url: String) -> Result<SavedSketch, SketchError> {
        self.add_at(name, data_url, Utc::now())
    }

    /// Appends a sketch created at `now`.
    ///
    /// The name is trimmed and must not be empty. The id is `now` in Unix
    /// milliseconds, bumped until it is unique within the list.
    pub fn add_at(
        &mut self,
        name: &str,
        data_url: String,
        now: DateTime<Utc>,
    ) -> Result<SavedSketch, SketchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SketchError::EmptyName);
        }

        let mut millis = now.timestamp_millis();
        while self.get(&millis.to_string()).is_some() {
            millis += 1;
        }

        let sketch = SavedSketch::new(millis.to_string(), name, data_url, now);
        self.sketches.push(sketch.clone());
        if !self.store.save(&self.sketches) {
            self.sketches.pop();
            return Err(SketchError::PersistFailed);
        }

        info!("Saved sketch '{}' ({})", sketch.name, sketch.id);
        Ok(sketch)
    }

    /// Removes exactly the sketch with `id`, keeping the others in order.
    pub fn delete(&mut self, id: &str) -> Result<SavedSketch, SketchError> {
        let index = self
            .sketches
            .iter()
            .position(|sketch| sketch.id == id)
            .ok_or_else(|| SketchError::NotFound(id.to_string()))?;

        let removed = self.sketches.remove(index);
        if !self.store.save(&self.sketches) {
            self.sketches.insert(index, removed);
            return Err(SketchError::PersistFailed);
        }

        info!("Deleted sketch '{}' ({})", removed.name, removed.id);
        Ok(removed)
    }
}
