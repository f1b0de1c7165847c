//! Scene orchestration.
//!
//! Routes spawn/delete/undo/redo requests and completed moves into the
//! registry and the undo history, and decides when the scene is persisted.

mod persistence;

pub use persistence::{JsonFilePersistence, ScenePersistence};

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use shared::{AssetDescriptor, AssetId, InstanceId, SceneData, SceneObjectData};

use crate::error::EditorError;
use crate::state::mover::{CompletedMove, ObjectMover};
use crate::state::registry::{ObjectRegistry, SceneObject};
use crate::state::selection::SelectionState;
use crate::state::undo::{UndoCommand, UndoStack};
use crate::ui::UiFacade;

/// Owns the object registry, the undo history, and the asset catalog.
pub struct SceneState {
    pub objects: ObjectRegistry,
    undo: UndoStack,
    assets: Vec<AssetDescriptor>,
    instance_index: InstanceId,
    /// Shared with [`SuspendSaving`] guards, which must not borrow the
    /// scene itself.
    saving_suspended: Rc<Cell<bool>>,
    persistence: Box<dyn ScenePersistence>,
}

impl SceneState {
    pub fn new(assets: Vec<AssetDescriptor>, persistence: Box<dyn ScenePersistence>) -> Self {
        // Asset IDs follow catalog order.
        let assets = assets
            .into_iter()
            .enumerate()
            .map(|(id, mut descriptor)| {
                descriptor.id = id;
                descriptor
            })
            .collect();

        Self {
            objects: ObjectRegistry::default(),
            undo: UndoStack::default(),
            assets,
            instance_index: 0,
            saving_suspended: Rc::new(Cell::new(false)),
            persistence,
        }
    }

    pub fn assets(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    pub fn asset(&self, asset_id: AssetId) -> Option<&AssetDescriptor> {
        self.assets.get(asset_id)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn undo_head(&self) -> Option<usize> {
        self.undo.head()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    // ── Spawning ────────────────────────────────────────────────

    /// Spawn a freshly picked asset, flagged as a new object. No undo
    /// command is registered yet; the first completed move does that, and a
    /// new object deleted before then is discarded silently.
    pub fn spawn_new_asset(&mut self, asset_id: AssetId) -> Result<InstanceId, EditorError> {
        let instance_id = self.spawn_core(asset_id)?;
        if let Some(object) = self.objects.get_mut(instance_id) {
            object.is_new_object = true;
        }
        Ok(instance_id)
    }

    fn spawn_core(&mut self, asset_id: AssetId) -> Result<InstanceId, EditorError> {
        let descriptor = self
            .assets
            .get(asset_id)
            .ok_or(EditorError::UnknownAsset(asset_id))?;

        // The instance ID lets undo and redo look up previously deleted
        // objects again.
        let instance_id = self.instance_index;
        self.instance_index += 1;

        let object = SceneObject::new(asset_id, instance_id, descriptor.bounding_radius);
        self.objects.add_checked(object)?;

        Ok(instance_id)
    }

    /// Recreate a previously destroyed object with its original IDs.
    fn respawn(
        &mut self,
        asset_id: AssetId,
        instance_id: InstanceId,
        position: Vec3,
    ) -> Result<(), EditorError> {
        let descriptor = self
            .assets
            .get(asset_id)
            .ok_or(EditorError::UnknownAsset(asset_id))?;

        let mut object = SceneObject::new(asset_id, instance_id, descriptor.bounding_radius);
        object.position = position;
        self.objects.add_checked(object)
    }

    // ── Edit routing ────────────────────────────────────────────

    /// Handle a completed move action. The first completed move of a new
    /// object registers a spawn command instead of a move command.
    pub fn on_object_moved(&mut self, moved: &CompletedMove, ui: &mut dyn UiFacade) {
        let Some(object) = self.objects.get_mut(moved.instance_id) else {
            tracing::error!(
                instance_id = moved.instance_id,
                "completed move refers to an unregistered object"
            );
            debug_assert!(false, "completed move refers to an unregistered object");
            return;
        };

        let command = if object.is_new_object {
            object.is_new_object = false;
            UndoCommand::Spawn {
                asset_id: object.asset_id,
                instance_id: moved.instance_id,
                position: moved.final_position,
            }
        } else {
            UndoCommand::Move {
                instance_id: moved.instance_id,
                original_position: moved.initial_position,
                target_position: moved.final_position,
            }
        };

        self.undo.register(command);
        self.notify_head_changed(ui);
    }

    /// Delete the current selection. New, unmoved objects are discarded
    /// without an undo command; anything else registers a delete command
    /// capturing the object's pre-drag position.
    pub fn delete_selection(
        &mut self,
        selection: &mut SelectionState,
        mover: &ObjectMover,
        ui: &mut dyn UiFacade,
    ) {
        let Some(instance_id) = selection.current() else {
            tracing::warn!("attempting to delete the current selection, but nothing is selected");
            return;
        };

        selection.clear(ui);

        let Some(object) = self.objects.get(instance_id) else {
            tracing::error!(instance_id, "selected object is not registered");
            debug_assert!(false, "selected object is not registered");
            return;
        };
        let asset_id = object.asset_id;
        let is_new_object = object.is_new_object;

        // When the object is deleted mid-drag it is sitting under the delete
        // button; record the position it had before the drag instead.
        let position = if mover.active_instance() == Some(instance_id) {
            mover
                .initial_position_for(instance_id)
                .unwrap_or(object.position)
        } else {
            object.position
        };

        // Fold the save triggered by the head change into the single save
        // at the end, after the object is gone from the registry.
        let guard = SuspendSaving::new(&self.saving_suspended);

        if is_new_object {
            // No undo command for an object that was never placed.
            if let Err(e) = self.objects.remove_checked(instance_id) {
                tracing::error!("failed to discard new object: {e}");
            }
            return;
        }

        self.undo.register(UndoCommand::Delete {
            asset_id,
            instance_id,
            position,
        });
        self.notify_head_changed(ui);

        if let Err(e) = self.objects.remove_checked(instance_id) {
            tracing::error!("failed to remove deleted object: {e}");
        }

        drop(guard);
        self.save_scene();
    }

    // ── Undo / redo ─────────────────────────────────────────────

    /// Undo the most recently applied command. A no-op with a diagnostic
    /// when the history is exhausted.
    pub fn undo(&mut self, selection: &mut SelectionState, ui: &mut dyn UiFacade) {
        if !self.undo.can_undo() {
            tracing::warn!("trying to undo, but there are no commands to undo");
            return;
        }

        match self.undo.begin_undo() {
            Ok(command) => {
                if let Err(e) = self.apply_undo(&command) {
                    tracing::error!("undo failed: {e}");
                }
                selection.clear(ui);
                self.notify_head_changed(ui);
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    /// Redo the most recently undone command. A no-op with a diagnostic
    /// when there is nothing to redo.
    pub fn redo(&mut self, selection: &mut SelectionState, ui: &mut dyn UiFacade) {
        if !self.undo.can_redo() {
            tracing::warn!("trying to redo, but there are no commands to redo");
            return;
        }

        match self.undo.begin_redo() {
            Ok(command) => {
                if let Err(e) = self.apply_redo(&command) {
                    tracing::error!("redo failed: {e}");
                }
                selection.clear(ui);
                self.notify_head_changed(ui);
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    fn apply_undo(&mut self, command: &UndoCommand) -> Result<(), EditorError> {
        match *command {
            UndoCommand::Spawn { instance_id, .. } => self.objects.remove_checked(instance_id),
            UndoCommand::Delete {
                asset_id,
                instance_id,
                position,
            } => self.respawn(asset_id, instance_id, position),
            UndoCommand::Move {
                instance_id,
                original_position,
                ..
            } => self.set_object_position(instance_id, original_position),
        }
    }

    fn apply_redo(&mut self, command: &UndoCommand) -> Result<(), EditorError> {
        match *command {
            UndoCommand::Spawn {
                asset_id,
                instance_id,
                position,
            } => self.respawn(asset_id, instance_id, position),
            UndoCommand::Delete { instance_id, .. } => self.objects.remove_checked(instance_id),
            UndoCommand::Move {
                instance_id,
                target_position,
                ..
            } => self.set_object_position(instance_id, target_position),
        }
    }

    fn set_object_position(
        &mut self,
        instance_id: InstanceId,
        position: Vec3,
    ) -> Result<(), EditorError> {
        let object = self
            .objects
            .get_mut(instance_id)
            .ok_or(EditorError::UnknownInstance(instance_id))?;
        object.position = position;
        Ok(())
    }

    /// Push the new undo availability to the UI and persist the scene.
    /// Invoked synchronously after every head change, before the
    /// triggering call returns.
    fn notify_head_changed(&mut self, ui: &mut dyn UiFacade) {
        ui.set_undo_enabled(self.undo.can_undo());
        ui.set_redo_enabled(self.undo.can_redo());

        self.save_scene();
    }

    // ── Persistence ─────────────────────────────────────────────

    /// Persist the current scene through the facade. Failures are logged,
    /// never propagated.
    pub(crate) fn save_scene(&mut self) {
        if self.saving_suspended.get() {
            return;
        }

        let data = SceneData {
            scene_objects: self
                .objects
                .iter()
                .map(|object| SceneObjectData {
                    asset_id: object.asset_id,
                    position: object.position.to_array(),
                })
                .collect(),
        };

        if let Err(e) = self.persistence.save(&data) {
            tracing::error!("failed to save scene: {e}");
        }
    }

    /// Restore the scene from the persistence facade, replaying every entry
    /// through the normal spawn path.
    pub fn load_scene(&mut self) {
        let data = match self.persistence.load() {
            Ok(Some(data)) => data,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("failed to load scene: {e}");
                return;
            }
        };

        for entry in &data.scene_objects {
            match self.spawn_core(entry.asset_id) {
                Ok(instance_id) => {
                    if let Some(object) = self.objects.get_mut(instance_id) {
                        object.position = Vec3::from(entry.position);
                    }
                }
                Err(e) => tracing::error!("failed to restore scene object: {e}"),
            }
        }
    }
}

/// Scoped guard that suppresses scene saves, restoring the previous flag on
/// every exit path.
///
/// Holds its own handle on the flag so the scene stays free to mutate while
/// the guard is alive.
struct SuspendSaving {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl SuspendSaving {
    fn new(flag: &Rc<Cell<bool>>) -> Self {
        let flag = Rc::clone(flag);
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for SuspendSaving {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}
