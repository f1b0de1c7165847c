//! Smooth movement of a single scene object.

use glam::Vec3;
use shared::InstanceId;

use crate::config::MoverConfig;

use super::registry::ObjectRegistry;

/// Notification payload fired when a move action finishes.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMove {
    pub instance_id: InstanceId,
    pub initial_position: Vec3,
    pub final_position: Vec3,
}

#[derive(Debug)]
struct ActiveMove {
    instance_id: InstanceId,
    initial_position: Vec3,
    target_position: Vec3,
    /// Prior enabled flags, index-aligned with the object's colliders.
    collider_states: Vec<bool>,
}

/// Moves at most one object at a time toward a target position, with the
/// same minimum-speed smoothing model the camera uses.
///
/// While a move is active, every collider on the object is disabled so that
/// world-point queries for this drag do not hit the object itself; the
/// prior enabled flags are restored when the move ends.
#[derive(Debug)]
pub struct ObjectMover {
    config: MoverConfig,
    active: Option<ActiveMove>,
    /// The last moved object and its position before that move started.
    /// Kept after the move ends so a deletion can still recover the
    /// object's pre-drag location.
    last_move: Option<(InstanceId, Vec3)>,
}

impl ObjectMover {
    pub fn new(config: MoverConfig) -> Self {
        Self {
            config,
            active: None,
            last_move: None,
        }
    }

    /// The object currently being moved, if any.
    pub fn active_instance(&self) -> Option<InstanceId> {
        self.active.as_ref().map(|m| m.instance_id)
    }

    /// The pre-move position of the given object, if it was the last one
    /// this mover touched.
    pub fn initial_position_for(&self, instance_id: InstanceId) -> Option<Vec3> {
        self.last_move
            .filter(|(id, _)| *id == instance_id)
            .map(|(_, position)| position)
    }

    /// Begin moving an object toward `target`. Records the object's
    /// pre-move position and disables its colliders.
    pub fn start_move(
        &mut self,
        instance_id: InstanceId,
        target: Vec3,
        objects: &mut ObjectRegistry,
    ) {
        if self.active.is_some() {
            tracing::error!("starting a move while another move is still active");
            debug_assert!(false, "starting a move while another move is still active");
            self.restore_colliders(objects);
        }

        let Some(object) = objects.get_mut(instance_id) else {
            tracing::error!(instance_id, "cannot start moving an unregistered object");
            return;
        };

        let initial_position = object.position;
        let mut collider_states = Vec::with_capacity(object.colliders.len());
        for collider in &mut object.colliders {
            collider_states.push(collider.enabled);
            collider.enabled = false;
        }

        self.active = Some(ActiveMove {
            instance_id,
            initial_position,
            target_position: target,
            collider_states,
        });
        self.last_move = Some((instance_id, initial_position));
    }

    /// Update the target position of the object currently being moved.
    pub fn set_move_target(&mut self, target: Vec3) {
        if let Some(active) = &mut self.active {
            active.target_position = target;
        }
    }

    /// Finish the current move: snap the object to its last target, restore
    /// its colliders, and report the completed move.
    ///
    /// A safe no-op returning `None` when no move is active, or when the
    /// object was deleted mid-drag.
    pub fn end_move(&mut self, objects: &mut ObjectRegistry) -> Option<CompletedMove> {
        let active = self.active.take()?;

        let object = objects.get_mut(active.instance_id)?;
        object.position = active.target_position;
        for (collider, prior) in object.colliders.iter_mut().zip(active.collider_states) {
            collider.enabled = prior;
        }

        Some(CompletedMove {
            instance_id: active.instance_id,
            initial_position: active.initial_position,
            final_position: active.target_position,
        })
    }

    /// Integrate the active object toward its target. Called once per frame
    /// after input processing.
    pub fn update(&mut self, dt: f32, objects: &mut ObjectRegistry) {
        let Some(active) = &self.active else {
            return;
        };
        let Some(object) = objects.get_mut(active.instance_id) else {
            return;
        };

        if self.config.move_inertia_time <= 0.0 {
            object.position = active.target_position;
            return;
        }

        let gap = active.target_position - object.position;
        let speed = gap.length().max(self.config.min_move_speed) / self.config.move_inertia_time;

        object.position = move_towards(object.position, active.target_position, speed * dt);
    }

    fn restore_colliders(&mut self, objects: &mut ObjectRegistry) {
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(object) = objects.get_mut(active.instance_id) {
            for (collider, prior) in object.colliders.iter_mut().zip(active.collider_states) {
                collider.enabled = prior;
            }
        }
    }
}

fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let gap = target - current;
    let distance = gap.length();
    if distance <= max_step || distance < f32::EPSILON {
        target
    } else {
        current + gap / distance * max_step
    }
}
