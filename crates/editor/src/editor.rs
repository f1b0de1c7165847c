//! Top-level editor wiring.

use glam::{Vec2, Vec3};
use shared::{AssetDescriptor, AssetId, InstanceId};

use crate::config::EditorConfig;
use crate::input::{InputHandler, StateId, Transition};
use crate::state::mover::ObjectMover;
use crate::state::scene::{ScenePersistence, SceneState};
use crate::state::selection::SelectionState;
use crate::touch::TouchSample;
use crate::ui::{UiEvent, UiFacade};
use crate::viewport::camera::CameraRig;
use crate::viewport::picking::{raycast_nearest, Layer, LayerMask};

/// Per-frame view of the editor handed to the gesture states.
///
/// Borrows each subsystem separately so a state can, for example, drive the
/// mover and read the registry in the same frame.
pub struct FrameContext<'a> {
    pub touches: &'a [TouchSample],
    pub camera: &'a mut CameraRig,
    pub mover: &'a mut ObjectMover,
    pub selection: &'a mut SelectionState,
    pub scene: &'a mut SceneState,
    pub ui: &'a mut dyn UiFacade,
    pub config: &'a EditorConfig,
}

impl FrameContext<'_> {
    pub fn screen_size(&self) -> Vec2 {
        Vec2::from(self.config.input.screen_size)
    }

    /// The object whose selection volume lies under the given screen point,
    /// if any.
    pub fn selectable_at(&self, screen_point: Vec2) -> Option<InstanceId> {
        let ray = self.camera.screen_ray(screen_point, self.screen_size());
        raycast_nearest(
            &ray,
            self.config.camera.far,
            LayerMask::only(Layer::Selection),
            &self.scene.objects,
        )
        .and_then(|hit| hit.instance_id)
    }

    /// The world point under the given screen point: the nearest hit among
    /// the ground and enabled object colliders, ignoring selection volumes.
    /// Falls back to [`Self::fallback_world_point`] when nothing is hit.
    pub fn world_point_or_fallback(&self, screen_point: Vec2) -> Vec3 {
        let ray = self.camera.screen_ray(screen_point, self.screen_size());
        match raycast_nearest(
            &ray,
            self.config.camera.far,
            LayerMask::all_except(Layer::Selection),
            &self.scene.objects,
        ) {
            Some(hit) => hit.point,
            None => ray.point_at(self.camera.height_above_ground()),
        }
    }

    /// A world point under the given screen point that ignores colliders
    /// entirely, at the camera's height above ground along the ray.
    pub fn fallback_world_point(&self, screen_point: Vec2) -> Vec3 {
        let ray = self.camera.screen_ray(screen_point, self.screen_size());
        ray.point_at(self.camera.height_above_ground())
    }
}

/// The editor core: owns every subsystem and advances them once per frame.
pub struct Editor {
    config: EditorConfig,
    camera: CameraRig,
    mover: ObjectMover,
    selection: SelectionState,
    scene: SceneState,
    input: InputHandler,
    ui: Box<dyn UiFacade>,
    /// This frame's touch snapshot, kept so out-of-band UI events see the
    /// same touches the gesture states saw.
    touches: Vec<TouchSample>,
}

impl Editor {
    /// Build the editor, restore the persisted scene, and push the initial
    /// widget states to the UI.
    pub fn new(
        config: EditorConfig,
        assets: Vec<AssetDescriptor>,
        persistence: Box<dyn ScenePersistence>,
        mut ui: Box<dyn UiFacade>,
    ) -> Self {
        let camera = CameraRig::new(config.camera.clone());
        let mover = ObjectMover::new(config.mover.clone());
        let mut scene = SceneState::new(assets, persistence);
        scene.load_scene();

        ui.hide_selection_marker();
        ui.set_editing_mode(false);
        ui.set_undo_enabled(scene.can_undo());
        ui.set_redo_enabled(scene.can_redo());

        Self {
            config,
            camera,
            mover,
            selection: SelectionState::default(),
            scene,
            input: InputHandler::new(),
            ui,
            touches: Vec::new(),
        }
    }

    /// Advance one frame: run the gesture state machine over the touch
    /// snapshot, then integrate the smoothed subsystems.
    pub fn update(&mut self, touches: &[TouchSample], dt: f32) {
        self.touches.clear();
        self.touches.extend_from_slice(touches);

        let mut ctx = FrameContext {
            touches: &self.touches,
            camera: &mut self.camera,
            mover: &mut self.mover,
            selection: &mut self.selection,
            scene: &mut self.scene,
            ui: self.ui.as_mut(),
            config: &self.config,
        };
        self.input.update(&mut ctx);

        self.camera.update(dt);
        self.mover.update(dt, &mut self.scene.objects);

        self.update_selection_marker();
    }

    /// Handle an interaction coming from the UI layer.
    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AssetPicked(asset_id) => self.spawn_asset(asset_id),
            UiEvent::DeleteRequested => {
                self.scene
                    .delete_selection(&mut self.selection, &self.mover, self.ui.as_mut())
            }
            UiEvent::UndoRequested => self.scene.undo(&mut self.selection, self.ui.as_mut()),
            UiEvent::RedoRequested => self.scene.redo(&mut self.selection, self.ui.as_mut()),
        }
    }

    /// Spawn the picked asset, select it, and hand it straight to the
    /// object drag so it follows the next touch.
    fn spawn_asset(&mut self, asset_id: AssetId) {
        let instance_id = match self.scene.spawn_new_asset(asset_id) {
            Ok(instance_id) => instance_id,
            Err(e) => {
                tracing::error!("failed to spawn asset: {e}");
                return;
            }
        };

        self.selection
            .change_selection(Some(instance_id), self.ui.as_mut());

        let mut ctx = FrameContext {
            touches: &self.touches,
            camera: &mut self.camera,
            mover: &mut self.mover,
            selection: &mut self.selection,
            scene: &mut self.scene,
            ui: self.ui.as_mut(),
            config: &self.config,
        };
        self.input.change_state(Transition::DragObject, &mut ctx);
    }

    /// Pin the selection marker over the selected object's center.
    fn update_selection_marker(&mut self) {
        let Some(instance_id) = self.selection.current() else {
            return;
        };
        let Some(object) = self.scene.objects.get(instance_id) else {
            return;
        };

        let screen = Vec2::from(self.config.input.screen_size);
        if let Some(point) = self.camera.project(object.center(), screen) {
            self.ui.move_selection_marker(point);
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn input_state(&self) -> StateId {
        self.input.active_state()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn mover(&self) -> &ObjectMover {
        &self.mover
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
}
