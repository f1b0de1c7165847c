//! One-finger drag of the selected object.

use crate::editor::FrameContext;
use crate::touch::TouchPhase;

use super::Transition;

/// Moves the selected object along the ground under the finger.
///
/// Entered either from the tap state (the touch began on the current
/// selection and crossed the drag threshold) or forced directly after
/// spawning an asset, in which case no touch may be active yet.
#[derive(Debug, Default)]
pub struct DragObjectState;

impl DragObjectState {
    pub fn on_enter(&mut self, ctx: &mut FrameContext) {
        let screen_point = match ctx.touches.first() {
            Some(touch) => touch.screen_position,
            None => {
                // Reached via the spawn flow; park the object mid-screen
                // until a touch arrives.
                ctx.screen_size() * 0.5
            }
        };

        let Some(instance_id) = ctx.selection.current() else {
            tracing::error!("entering object drag without a selection");
            debug_assert!(false, "entering object drag without a selection");
            return;
        };

        // Deliberately skip the collision query here: the object itself is
        // still solid until the mover disables its colliders, and would
        // otherwise catch its own pickup ray.
        let target = ctx.fallback_world_point(screen_point);

        if ctx
            .scene
            .objects
            .get(instance_id)
            .is_some_and(|object| object.is_new_object)
        {
            // Fresh spawns appear under the finger instead of gliding in
            // from the origin.
            if let Some(object) = ctx.scene.objects.get_mut(instance_id) {
                object.position = target;
            }
        }

        ctx.mover.start_move(instance_id, target, &mut ctx.scene.objects);
        ctx.ui.set_editing_mode(true);
    }

    pub fn update(&mut self, ctx: &mut FrameContext) -> Option<Transition> {
        let touch = match ctx.touches {
            [touch] => *touch,
            [_, _] => return Some(Transition::RotateAndZoom),
            _ => return Some(Transition::Idle),
        };

        if touch.phase == TouchPhase::Canceled {
            return Some(Transition::Idle);
        }

        // The dragged object's colliders are disabled, so the query settles
        // on the ground or on whatever other object lies under the finger.
        let target = ctx.world_point_or_fallback(touch.screen_position);
        ctx.mover.set_move_target(target);

        // The release frame still retargets, so the exit snap lands the
        // object under the finger's final position.
        if touch.phase == TouchPhase::Ended {
            return Some(Transition::Idle);
        }

        None
    }

    /// Finish the move and route the completed edit to the scene.
    pub fn on_exit(&mut self, ctx: &mut FrameContext) {
        if let Some(completed) = ctx.mover.end_move(&mut ctx.scene.objects) {
            ctx.scene.on_object_moved(&completed, &mut *ctx.ui);
        }

        ctx.ui.set_editing_mode(false);
    }
}
