//! One-finger camera pan.

use glam::{Vec2, Vec3};

use crate::editor::FrameContext;
use crate::touch::TouchPhase;
use crate::viewport::camera::look_rotation;
use crate::viewport::picking::ray_plane;

use super::Transition;

/// Pans the camera pivot so the world point grabbed by the finger follows
/// it across the ground.
///
/// Screen points are mapped onto a camera-facing plane through the pivot
/// position captured on entry; the drag displacement is measured on that
/// plane, re-expressed in the pivot's frame, and flattened onto the ground
/// so the pivot never leaves it.
#[derive(Debug, Default)]
pub struct DragCameraState {
    initial_screen_point: Vec2,
    initial_pivot_position: Vec3,
    warned_plane_miss: bool,
}

impl DragCameraState {
    pub fn on_enter(&mut self, ctx: &mut FrameContext, initial_screen_point: Vec2) {
        self.initial_screen_point = initial_screen_point;
        self.initial_pivot_position = ctx.camera.pivot_position();
        self.warned_plane_miss = false;
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

        let initial_world = self.drag_plane_point(ctx, self.initial_screen_point);
        let current_world = self.drag_plane_point(ctx, touch.screen_position);

        // Dragging the world under the finger moves the camera the other
        // way.
        let delta = initial_world - current_world;

        // Re-express the on-plane displacement in the drag plane's own
        // frame, then rotate it into the pivot's frame and flatten it onto
        // the ground.
        let camera_rotation = ctx.camera.camera_rotation();
        let drag_basis = look_rotation(camera_rotation * Vec3::Y, camera_rotation * Vec3::NEG_Z);
        let mut offset = ctx.camera.pivot_rotation() * (drag_basis.inverse() * delta);
        offset.y = 0.0;

        ctx.camera.move_to(self.initial_pivot_position + offset);

        // The release frame still pans; the touch leaves the set next frame.
        if touch.phase == TouchPhase::Ended {
            return Some(Transition::Idle);
        }

        None
    }

    /// Map a screen point onto the camera-facing plane through the initial
    /// pivot. Falls back to a point at zoom distance along the ray when the
    /// ray misses the plane.
    fn drag_plane_point(&mut self, ctx: &FrameContext, screen_point: Vec2) -> Vec3 {
        let ray = ctx.camera.screen_ray(screen_point, ctx.screen_size());
        let normal = -ctx.camera.forward();

        match ray_plane(&ray, self.initial_pivot_position, normal) {
            Some(distance) => ray.point_at(distance),
            None => {
                if !self.warned_plane_miss {
                    tracing::warn!("drag ray missed the drag plane, using zoom-distance fallback");
                    self.warned_plane_miss = true;
                }
                ray.point_at(ctx.camera.zoom_distance())
            }
        }
    }
}
