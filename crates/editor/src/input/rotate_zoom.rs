//! Two-finger orbit and pinch zoom.

use glam::Vec2;

use crate::editor::FrameContext;

use super::Transition;

/// Turns two-finger motion into camera commands: the change in distance
/// between the fingers zooms, the change in the angle of the line through
/// them rotates.
#[derive(Debug, Default)]
pub struct RotateAndZoomState {
    /// Finger distance last frame, normalized by display density so the
    /// gesture feels the same across screens.
    previous_distance: f32,
    /// Unit vector from the first finger to the second, last frame.
    previous_direction: Vec2,
}

impl RotateAndZoomState {
    pub fn on_enter(&mut self, ctx: &mut FrameContext) {
        match self.touch_data(ctx) {
            Some((distance, direction)) => {
                self.previous_distance = distance;
                self.previous_direction = direction;
            }
            None => {
                tracing::error!("entering pinch state without two active touches");
                self.previous_distance = 0.0;
                self.previous_direction = Vec2::ZERO;
            }
        }
    }

    pub fn update(&mut self, ctx: &mut FrameContext) -> Option<Transition> {
        match ctx.touches {
            [_, _] => {}
            // A lifted finger degrades the pinch into a pan anchored at the
            // surviving finger's current position.
            [touch] => {
                return Some(Transition::DragCamera {
                    initial_screen_point: touch.screen_position,
                })
            }
            _ => return Some(Transition::Idle),
        }

        let Some((distance, direction)) = self.touch_data(ctx) else {
            return Some(Transition::Idle);
        };

        // Fingers moving together read as a positive delta, zooming out.
        ctx.camera.zoom_by(self.previous_distance - distance);
        ctx.camera
            .rotate_by(signed_angle(self.previous_direction, direction));

        self.previous_distance = distance;
        self.previous_direction = direction;

        None
    }

    fn touch_data(&self, ctx: &FrameContext) -> Option<(f32, Vec2)> {
        let [first, second] = ctx.touches else {
            return None;
        };

        let span = second.screen_position - first.screen_position;
        let distance = span.length() / ctx.config.input.screen_dpi;

        Some((distance, span.normalize_or_zero()))
    }
}

/// Signed angle in radians rotating `from` onto `to`, counterclockwise
/// positive.
fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to))
}
