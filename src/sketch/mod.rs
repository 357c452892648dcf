//! Saved sketches: storage, the in-memory library and the browser drawer.

mod browser;
mod library;
mod preferences;
mod storage;
mod store;
mod types;

pub use browser::{
    BrowserAction, BrowserEntry, BrowserView, EMPTY_MESSAGE, SketchBrowser, format_timestamp,
    render_thumbnail,
};
pub use library::SketchLibrary;
pub use preferences::{PREFERENCES_KEY, PreferenceStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{DEFAULT_SKETCHES_KEY, SketchStore};
pub use types::{SavedSketch, SketchError};

#[cfg(test)]
mod tests;
