//! The sketchpad page: toolbar, drawing surface and saved sketches wired together.

use crate::canvas::{DrawingSurface, Viewport};
use crate::config::Config;
use crate::export::{ExportConfig, ExportError, ExportManager, ExportOutcome, ExportRequest};
use crate::input::{Key, PointerSample, ToolSettings};
use crate::sketch::{
    BrowserAction, BrowserView, KeyValueStore, PreferenceStore, SavedSketch, SketchBrowser,
    SketchError, SketchLibrary, SketchStore,
};
use crate::toolbar::{Toolbar, ToolbarEvent};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Something the page needs from its embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostRequest {
    /// Ask the user for a sketch name, then call [`Sketchpad::save_sketch`]
    PromptSketchName,
    /// Run [`Sketchpad::export`]
    Export,
}

/// Host page owning the tool settings and every sketchpad component.
pub struct Sketchpad {
    settings: ToolSettings,
    toolbar: Toolbar,
    surface: DrawingSurface,
    library: SketchLibrary,
    browser: SketchBrowser,
    preferences: PreferenceStore,
    export_config: ExportConfig,
}

impl Sketchpad {
    /// Builds the page from config, restoring saved preferences from `backend`.
    pub fn new(config: &Config, backend: Arc<dyn KeyValueStore>) -> Self {
        let preferences = PreferenceStore::new(Arc::clone(&backend));
        let defaults = config.default_tool_settings();
        let mut settings = preferences.load(defaults);
        let toolbar = Toolbar::from_config(&config.toolbar);
        if !toolbar.is_available(settings.tool) {
            warn!(
                "Stored tool {} is not on the toolbar, using {}",
                settings.tool, defaults.tool
            );
            settings.tool = defaults.tool;
        }
        let surface = DrawingSurface::with_style(settings, config.surface_style());
        let library = SketchLibrary::open(SketchStore::with_key(
            backend,
            config.storage.sketches_key.clone(),
        ));

        debug!(
            "Sketchpad ready with {} saved sketches, tool {}",
            library.len(),
            settings.tool
        );

        Self {
            settings,
            toolbar,
            surface,
            library,
            browser: SketchBrowser::new(),
            preferences,
            export_config: config.export_config(),
        }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    pub fn sketches(&self) -> &[SavedSketch] {
        self.library.sketches()
    }

    pub fn export_config(&self) -> &ExportConfig {
        &self.export_config
    }

    pub fn mount(&mut self, viewport: Viewport) {
        self.surface.mount(viewport);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.surface.pointer_down(sample);
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        self.surface.pointer_move(sample);
    }

    pub fn pointer_up(&mut self) {
        self.surface.pointer_up();
    }

    pub fn key_press(&mut self, key: Key) {
        self.surface.key_press(key);
    }

    /// Applies a toolbar intent.
    ///
    /// Setting changes are pushed into the surface and persisted. Save and
    /// export need the embedder, so they come back as a [`HostRequest`].
    pub fn handle_toolbar(&mut self, event: ToolbarEvent) -> Option<HostRequest> {
        match event {
            ToolbarEvent::SelectTool(tool) => self.update_settings(ToolSettings {
                tool,
                ..self.settings
            }),
            ToolbarEvent::SelectColor(color) => self.update_settings(ToolSettings {
                color,
                ..self.settings
            }),
            ToolbarEvent::SetSize(size) => self.update_settings(ToolSettings {
                size,
                ..self.settings
            }),
            ToolbarEvent::Clear => {
                self.surface.clear();
                None
            }
            ToolbarEvent::Save => Some(HostRequest::PromptSketchName),
            ToolbarEvent::Export => Some(HostRequest::Export),
        }
    }

    fn update_settings(&mut self, settings: ToolSettings) -> Option<HostRequest> {
        self.settings = settings;
        self.surface.apply_settings(&settings);
        if !self.preferences.save(&settings) {
            warn!("Tool preferences were not persisted");
        }
        None
    }

    /// Saves the current bitmap under `name`. Blank names save nothing.
    pub fn save_sketch(&mut self, name: &str) -> Result<SavedSketch, SketchError> {
        if name.trim().is_empty() {
            return Err(SketchError::EmptyName);
        }
        let data_url = self
            .surface
            .to_data_url()
            .ok_or(SketchError::NothingToSave)?;
        self.library.add(name, data_url)
    }

    pub fn open_browser(&mut self) {
        self.browser.open();
    }

    pub fn close_browser(&mut self) {
        self.browser.close();
    }

    pub fn browser_view(&self) -> BrowserView {
        self.browser.view(self.library.sketches())
    }

    /// Replaces the bitmap with a saved sketch and closes the browser.
    ///
    /// An undecodable snapshot leaves the bitmap untouched and the browser open.
    pub fn load_sketch(&mut self, id: &str) -> Result<(), SketchError> {
        let sketch = self
            .library
            .get(id)
            .cloned()
            .ok_or_else(|| SketchError::NotFound(id.to_string()))?;
        let action = self.browser.load(&sketch);
        self.apply_browser_action(action)
    }

    pub fn delete_sketch(&mut self, id: &str) -> Result<(), SketchError> {
        let action = self.browser.delete(id);
        self.apply_browser_action(action)
    }

    fn apply_browser_action(&mut self, action: BrowserAction) -> Result<(), SketchError> {
        match action {
            BrowserAction::Load(url) => {
                if let Err(err) = self.surface.load_data_url(&url) {
                    self.browser.open();
                    return Err(err.into());
                }
                info!("Loaded saved sketch into surface");
                Ok(())
            }
            BrowserAction::Delete(id) => self.library.delete(&id).map(|_| ()),
        }
    }

    /// Queues an export of the current bitmap.
    pub fn export(
        &self,
        manager: &ExportManager,
    ) -> Result<oneshot::Receiver<ExportOutcome>, ExportError> {
        let png = self.surface.encode_png().ok_or(ExportError::NoBitmap)?;
        manager.request_export(ExportRequest::new(png, self.export_config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportFormat;
    use crate::draw::RED;
    use crate::input::DrawingTool;
    use crate::sketch::{MemoryStore, PREFERENCES_KEY};

    fn page() -> (Sketchpad, Arc<dyn KeyValueStore>) {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut pad = Sketchpad::new(&Config::default(), Arc::clone(&backend));
        pad.mount(Viewport::new(100.0, 80.0, 1.0));
        (pad, backend)
    }

    fn scribble(pad: &mut Sketchpad) {
        pad.pointer_down(PointerSample::mouse(10.0, 10.0));
        pad.pointer_move(PointerSample::mouse(60.0, 40.0));
        pad.pointer_up();
    }

    #[test]
    fn toolbar_changes_reach_surface_and_preferences() {
        let (mut pad, backend) = page();
        let event = pad.toolbar().pick_custom_color("#e03131").unwrap();
        assert_eq!(pad.handle_toolbar(event), None);
        pad.handle_toolbar(ToolbarEvent::SelectTool(DrawingTool::Eraser));
        pad.handle_toolbar(pad.toolbar().set_size(40.0).unwrap());

        let expected = ToolSettings::new(DrawingTool::Eraser, RED, 20.0);
        assert_eq!(*pad.settings(), expected);
        assert_eq!(*pad.surface().settings(), expected);
        assert!(backend.get(PREFERENCES_KEY).unwrap().is_some());

        let reopened = Sketchpad::new(&Config::default(), backend);
        assert_eq!(*reopened.settings(), expected);
    }

    #[test]
    fn hidden_stored_tool_falls_back_to_default() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        backend
            .set(
                PREFERENCES_KEY,
                r##"{"tool":"arrow","color":"#e03131","size":5.0}"##,
            )
            .unwrap();

        let pad = Sketchpad::new(&Config::default(), Arc::clone(&backend));
        assert_eq!(*pad.settings(), ToolSettings::new(DrawingTool::Pen, RED, 5.0));
        assert_eq!(pad.surface().settings().tool, DrawingTool::Pen);

        let mut config = Config::default();
        config.toolbar.enable_shape_tools = true;
        let pad = Sketchpad::new(&config, backend);
        assert_eq!(pad.settings().tool, DrawingTool::Arrow);
    }

    #[test]
    fn save_and_export_need_the_host() {
        let (mut pad, _) = page();
        assert_eq!(
            pad.handle_toolbar(ToolbarEvent::Save),
            Some(HostRequest::PromptSketchName)
        );
        assert_eq!(
            pad.handle_toolbar(ToolbarEvent::Export),
            Some(HostRequest::Export)
        );
    }

    #[test]
    fn clear_button_clears_surface() {
        let (mut pad, _) = page();
        scribble(&mut pad);
        assert!(!pad.surface().is_blank());
        pad.handle_toolbar(ToolbarEvent::Clear);
        assert!(pad.surface().is_blank());
    }

    #[test]
    fn save_load_and_delete_round_trip() {
        let (mut pad, _) = page();
        scribble(&mut pad);

        assert!(matches!(pad.save_sketch("  "), Err(SketchError::EmptyName)));
        let saved = pad.save_sketch("Test").unwrap();
        assert_eq!(pad.sketches().len(), 1);

        pad.handle_toolbar(ToolbarEvent::Clear);
        assert!(pad.surface().is_blank());
        pad.open_browser();
        pad.load_sketch(&saved.id).unwrap();
        assert_eq!(pad.browser_view(), BrowserView::Closed);
        assert_eq!(pad.surface().pixel(35, 25).unwrap().a, 255);

        pad.open_browser();
        pad.delete_sketch(&saved.id).unwrap();
        assert_eq!(pad.browser_view(), BrowserView::Empty("No saved sketches yet."));
    }

    #[test]
    fn corrupt_snapshot_keeps_browser_open() {
        let (mut pad, backend) = page();
        backend
            .set(
                "sketches",
                r#"[{"id":"1","name":"bad","dataURL":"data:image/png;base64,AAAA","date":"x"}]"#,
            )
            .unwrap();
        let mut pad_reloaded = Sketchpad::new(&Config::default(), backend);
        pad_reloaded.mount(Viewport::new(100.0, 80.0, 1.0));
        scribble(&mut pad_reloaded);
        let before = pad_reloaded.surface().encode_png();

        pad_reloaded.open_browser();
        let err = pad_reloaded.load_sketch("1").unwrap_err();
        assert!(matches!(err, SketchError::Decode(_)));
        assert!(matches!(pad_reloaded.browser_view(), BrowserView::Entries(_)));
        assert_eq!(pad_reloaded.surface().encode_png(), before);

        assert!(matches!(pad.load_sketch("404"), Err(SketchError::NotFound(_))));
    }

    #[tokio::test]
    async fn export_writes_configured_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.directory = Some(dir.path().to_string_lossy().into_owned());
        config.export.format = ExportFormat::Png;

        let mut pad = Sketchpad::new(&config, Arc::new(MemoryStore::new()));
        pad.mount(Viewport::new(50.0, 50.0, 1.0));
        scribble(&mut pad);

        let manager = ExportManager::new(&tokio::runtime::Handle::current());
        let outcome = pad.export(&manager).unwrap().await.unwrap();
        let ExportOutcome::Success(result) = outcome else {
            panic!("export failed: {outcome:?}");
        };
        assert!(result.png_path.unwrap().starts_with(dir.path()));
        assert!(result.pdf_path.is_none());
    }

    #[test]
    fn export_without_bitmap_is_rejected() {
        let pad = Sketchpad::new(&Config::default(), Arc::new(MemoryStore::new()));
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let manager = ExportManager::new(runtime.handle());
        assert!(matches!(pad.export(&manager), Err(ExportError::NoBitmap)));
    }
}
