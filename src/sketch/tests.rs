use super::*;
use crate::canvas::{DrawingSurface, Viewport};
use crate::draw::{BLUE, RED};
use crate::input::{DrawingTool, PointerSample, ToolSettings};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const TINY_PNG_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

/// Store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.inner.set(key, value)
    }
}

fn sketch(id: &str, name: &str) -> SavedSketch {
    SavedSketch {
        id: id.to_string(),
        name: name.to_string(),
        data_url: TINY_PNG_URL.to_string(),
        date: "2024-05-15T12:00:00.000Z".to_string(),
    }
}

fn painted_data_url() -> String {
    let mut surface = DrawingSurface::new(ToolSettings::new(DrawingTool::Pen, RED, 6.0));
    surface.mount(Viewport::new(40.0, 30.0, 1.0));
    surface.pointer_down(PointerSample::mouse(5.0, 5.0));
    surface.pointer_move(PointerSample::mouse(35.0, 25.0));
    surface.pointer_up();
    surface.to_data_url().unwrap()
}

#[test]
fn json_uses_browser_field_names() {
    let json = serde_json::to_value(sketch("1714564800000", "Test")).unwrap();
    assert_eq!(json["id"], "1714564800000");
    assert_eq!(json["name"], "Test");
    assert_eq!(json["dataURL"], TINY_PNG_URL);
    assert_eq!(json["date"], "2024-05-15T12:00:00.000Z");
    assert!(json.get("data_url").is_none());
}

#[test]
fn store_load_is_empty_when_missing_or_corrupt() {
    let backend = Arc::new(MemoryStore::new());
    let store = SketchStore::new(backend.clone());
    assert!(store.load().is_empty());

    backend.set(DEFAULT_SKETCHES_KEY, "{not json").unwrap();
    assert!(store.load().is_empty());

    backend.set(DEFAULT_SKETCHES_KEY, r#"{"id":"1"}"#).unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn store_save_reports_write_failures() {
    let backend = Arc::new(FlakyStore::default());
    let store = SketchStore::new(backend.clone());
    assert!(store.save(&[sketch("1", "a")]));

    backend.fail_writes.store(true, Ordering::SeqCst);
    assert!(!store.save(&[]));
    assert_eq!(store.load().len(), 1);
}

#[test]
fn add_then_reload_returns_named_sketch() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let store = SketchStore::new(backend.clone());
    assert!(store.save(&[]));

    let mut library = SketchLibrary::open(store.clone());
    library.add("Test", painted_data_url()).unwrap();

    let reloaded = SketchStore::new(backend).load();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].name, "Test");
    assert!(reloaded[0].data_url.len() > "data:image/png;base64,".len());
    assert!(reloaded[0].timestamp().is_some());
    assert!(reloaded[0].date.ends_with('Z'));
}

#[test]
fn ids_are_creation_millis_and_unique() {
    let mut library = SketchLibrary::open(SketchStore::new(Arc::new(MemoryStore::new())));
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let first = library.add_at("one", TINY_PNG_URL.into(), now).unwrap();
    let second = library.add_at("two", TINY_PNG_URL.into(), now).unwrap();

    assert_eq!(first.id, now.timestamp_millis().to_string());
    assert_eq!(second.id, (now.timestamp_millis() + 1).to_string());
    assert_eq!(first.date, "2024-05-01T12:00:00.000Z");
}

#[test]
fn blank_names_are_rejected() {
    let mut library = SketchLibrary::open(SketchStore::new(Arc::new(MemoryStore::new())));
    assert!(matches!(
        library.add("   ", TINY_PNG_URL.into()),
        Err(SketchError::EmptyName)
    ));
    assert!(library.is_empty());

    let saved = library.add("  padded  ", TINY_PNG_URL.into()).unwrap();
    assert_eq!(saved.name, "padded");
}

#[test]
fn delete_keeps_other_entries_in_order() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let store = SketchStore::new(backend.clone());
    store.save(&[sketch("1", "a"), sketch("2", "b"), sketch("3", "c")]);

    let mut library = SketchLibrary::open(store.clone());
    let removed = library.delete("2").unwrap();
    assert_eq!(removed.name, "b");

    let names: Vec<_> = library.sketches().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
    let stored: Vec<_> = store.load().into_iter().map(|s| s.id).collect();
    assert_eq!(stored, ["1", "3"]);

    assert!(matches!(library.delete("2"), Err(SketchError::NotFound(_))));
}

#[test]
fn failed_writes_roll_back_memory() {
    let backend = Arc::new(FlakyStore::default());
    let store = SketchStore::new(backend.clone());
    store.save(&[sketch("1", "a"), sketch("2", "b")]);
    let mut library = SketchLibrary::open(store);

    backend.fail_writes.store(true, Ordering::SeqCst);
    assert!(matches!(
        library.add("c", TINY_PNG_URL.into()),
        Err(SketchError::PersistFailed)
    ));
    assert!(matches!(library.delete("1"), Err(SketchError::PersistFailed)));

    let ids: Vec<_> = library.sketches().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[test]
fn file_store_round_trips_and_isolates_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("data"));

    assert_eq!(store.get("sketches").unwrap(), None);
    store.set("sketches", "[]").unwrap();
    store.set("sketches", "[1]").unwrap();
    store.set(PREFERENCES_KEY, "{}").unwrap();

    assert_eq!(store.get("sketches").unwrap().as_deref(), Some("[1]"));
    assert_eq!(store.get(PREFERENCES_KEY).unwrap().as_deref(), Some("{}"));
    assert!(dir.path().join("data/sketches.json").exists());
    assert!(!dir.path().join("data/sketches.json.tmp").exists());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    for key in ["", "../escape", "a/b", ".hidden"] {
        assert!(matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))));
    }
}

#[test]
fn browser_views_follow_drawer_state() {
    let mut browser = SketchBrowser::new();
    assert_eq!(browser.view(&[sketch("1", "a")]), BrowserView::Closed);

    browser.open();
    assert_eq!(browser.view(&[]), BrowserView::Empty("No saved sketches yet."));

    let BrowserView::Entries(entries) = browser.view(&[sketch("1", "a"), sketch("2", "b")]) else {
        panic!("expected entries");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].name, "b");
    assert_eq!(entries[0].thumbnail, TINY_PNG_URL);
    assert!(entries[0].timestamp.starts_with("2024-05-1"));
}

#[test]
fn browser_load_closes_and_delete_keeps_open() {
    let mut browser = SketchBrowser::new();
    browser.open();
    assert_eq!(browser.delete("7"), BrowserAction::Delete("7".to_string()));
    assert!(browser.is_open());

    let action = browser.load(&sketch("7", "seven"));
    assert_eq!(action, BrowserAction::Load(TINY_PNG_URL.to_string()));
    assert!(!browser.is_open());
}

#[test]
fn unparseable_dates_display_verbatim() {
    assert_eq!(format_timestamp("yesterday-ish"), "yesterday-ish");
}

#[test]
fn thumbnail_contain_fits_snapshot() {
    let url = painted_data_url();
    let thumb = render_thumbnail(&url, 80, 80).unwrap();
    assert_eq!((thumb.width(), thumb.height()), (80, 80));

    assert!(render_thumbnail("data:image/png;base64,AAAA", 10, 10).is_err());
}

#[test]
fn preferences_persist_tool_color_and_size() {
    let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let prefs = PreferenceStore::new(backend.clone());
    let defaults = ToolSettings::default();
    assert_eq!(prefs.load(defaults), defaults);

    let chosen = ToolSettings::new(DrawingTool::Eraser, BLUE, 12.0);
    assert!(prefs.save(&chosen));
    assert_eq!(prefs.load(defaults), chosen);

    backend.set(PREFERENCES_KEY, "garbage").unwrap();
    assert_eq!(prefs.load(defaults), defaults);

    backend
        .set(PREFERENCES_KEY, r##"{"tool":"text","color":"#zz","size":99}"##)
        .unwrap();
    let repaired = prefs.load(defaults);
    assert_eq!(repaired.tool, DrawingTool::Text);
    assert_eq!(repaired.color, defaults.color);
    assert_eq!(repaired.size, 20.0);
}
