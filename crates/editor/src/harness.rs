//! Test doubles and a scripted editor harness.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use shared::{InstanceId, SceneData};

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::error::EditorError;
use crate::fixtures::{self, test_assets};
use crate::input::StateId;
use crate::state::scene::ScenePersistence;
use crate::touch::TouchSample;
use crate::ui::{UiEvent, UiFacade};

/// UI double that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub editing_mode: bool,
    pub marker_visible: bool,
    pub marker_position: Vec2,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    /// Touch IDs the fake UI claims for itself.
    pub blocked_touches: Vec<u64>,
}

impl UiFacade for RecordingUi {
    fn set_editing_mode(&mut self, editing: bool) {
        self.editing_mode = editing;
    }

    fn show_selection_marker(&mut self) {
        self.marker_visible = true;
    }

    fn hide_selection_marker(&mut self) {
        self.marker_visible = false;
    }

    fn move_selection_marker(&mut self, canvas_point: Vec2) {
        self.marker_position = canvas_point;
    }

    fn set_undo_enabled(&mut self, enabled: bool) {
        self.undo_enabled = enabled;
    }

    fn set_redo_enabled(&mut self, enabled: bool) {
        self.redo_enabled = enabled;
    }

    fn is_pointer_over_ui(&self, touch_id: u64) -> bool {
        self.blocked_touches.contains(&touch_id)
    }
}

/// Shared handle onto a [`RecordingUi`], so a test can keep inspecting the
/// recorder after handing the facade to the editor.
#[derive(Debug, Clone)]
pub struct SharedUi(pub Rc<RefCell<RecordingUi>>);

impl UiFacade for SharedUi {
    fn set_editing_mode(&mut self, editing: bool) {
        self.0.borrow_mut().set_editing_mode(editing);
    }

    fn show_selection_marker(&mut self) {
        self.0.borrow_mut().show_selection_marker();
    }

    fn hide_selection_marker(&mut self) {
        self.0.borrow_mut().hide_selection_marker();
    }

    fn move_selection_marker(&mut self, canvas_point: Vec2) {
        self.0.borrow_mut().move_selection_marker(canvas_point);
    }

    fn set_undo_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().set_undo_enabled(enabled);
    }

    fn set_redo_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().set_redo_enabled(enabled);
    }

    fn is_pointer_over_ui(&self, touch_id: u64) -> bool {
        self.0.borrow().is_pointer_over_ui(touch_id)
    }
}

/// Backing store of [`MemoryPersistence`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub data: Option<SceneData>,
    pub save_count: usize,
}

/// In-memory persistence double with an externally inspectable store.
#[derive(Debug, Clone)]
pub struct MemoryPersistence(Rc<RefCell<MemoryStore>>);

impl MemoryPersistence {
    pub fn new() -> (Self, Rc<RefCell<MemoryStore>>) {
        let store = Rc::new(RefCell::new(MemoryStore::default()));
        (Self(store.clone()), store)
    }

    /// Persistence over an existing store, for restart round trips.
    pub fn from_store(store: Rc<RefCell<MemoryStore>>) -> Self {
        Self(store)
    }
}

impl ScenePersistence for MemoryPersistence {
    fn save(&mut self, data: &SceneData) -> Result<(), EditorError> {
        let mut store = self.0.borrow_mut();
        store.data = Some(data.clone());
        store.save_count += 1;
        Ok(())
    }

    fn load(&mut self) -> Result<Option<SceneData>, EditorError> {
        Ok(self.0.borrow().data.clone())
    }
}

/// Frame step used by the scripted harness, one 60 Hz tick.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// An editor wired to recording doubles, plus helpers that script touch
/// sequences the way a finger would produce them.
pub struct TestHarness {
    pub editor: Editor,
    pub ui: Rc<RefCell<RecordingUi>>,
    pub store: Rc<RefCell<MemoryStore>>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let ui = Rc::new(RefCell::new(RecordingUi::default()));
        let (persistence, store) = MemoryPersistence::new();
        let editor = Editor::new(
            config,
            test_assets(),
            Box::new(persistence),
            Box::new(SharedUi(ui.clone())),
        );

        Self { editor, ui, store }
    }

    pub fn frame(&mut self, touches: &[TouchSample]) {
        self.editor.update(touches, FRAME_DT);
    }

    pub fn frames(&mut self, touches: &[TouchSample], count: usize) {
        for _ in 0..count {
            self.frame(touches);
        }
    }

    /// Run touch-free frames, letting smoothed values settle.
    pub fn idle_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame(&[]);
        }
    }

    /// Script a tap: contact, a stationary frame, release, release settled.
    pub fn tap(&mut self, position: Vec2) {
        self.frame(&[fixtures::began(0, position)]);
        self.frame(&[fixtures::stationary(0, position)]);
        self.frame(&[fixtures::ended(0, position)]);
        self.frame(&[]);
    }

    /// Script a one-finger drag from `from` to `to` over `steps` move
    /// frames.
    pub fn drag(&mut self, from: Vec2, to: Vec2, steps: usize) {
        self.frame(&[fixtures::began(0, from)]);
        for step in 1..=steps {
            let position = from.lerp(to, step as f32 / steps as f32);
            self.frame(&[fixtures::moved(0, position)]);
        }
        self.frame(&[fixtures::ended(0, to)]);
        self.frame(&[]);
    }

    /// Pick an asset from the catalog, as the UI hotbar would.
    pub fn spawn(&mut self, asset_id: usize) {
        self.editor.handle_event(UiEvent::AssetPicked(asset_id));
    }

    pub fn state(&self) -> StateId {
        self.editor.input_state()
    }

    pub fn selected(&self) -> Option<InstanceId> {
        self.editor.selection().current()
    }

    pub fn object_position(&self, instance_id: InstanceId) -> Vec3 {
        self.editor
            .scene()
            .objects
            .get(instance_id)
            .map(|object| object.position)
            .unwrap_or_else(|| panic!("object {instance_id} is not registered"))
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::from(self.editor.config().input.screen_size) * 0.5
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
