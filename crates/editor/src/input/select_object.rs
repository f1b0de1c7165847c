//! Pending-tap state: decides between a selection tap and a drag.

use glam::Vec2;

use crate::editor::FrameContext;
use crate::touch::TouchPhase;

use super::Transition;

/// Entered on the first contact of a single touch. If the touch ends close
/// to where it began it is a tap that changes the selection; if it travels
/// past the drag threshold first, it becomes an object drag (when it started
/// on the current selection) or a camera pan (anywhere else).
#[derive(Debug, Default)]
pub struct SelectObjectState {
    initial_screen_point: Vec2,
    /// Whether the touch began on the selection volume of the currently
    /// selected object.
    is_on_current_selection: bool,
}

impl SelectObjectState {
    pub fn on_enter(&mut self, ctx: &mut FrameContext) {
        let Some(touch) = ctx.touches.first() else {
            tracing::error!("entering tap state without an active touch");
            self.initial_screen_point = Vec2::ZERO;
            self.is_on_current_selection = false;
            return;
        };

        self.initial_screen_point = touch.screen_position;

        let touched = ctx.selectable_at(touch.screen_position);
        self.is_on_current_selection =
            touched.is_some() && touched == ctx.selection.current();
    }

    pub fn update(&mut self, ctx: &mut FrameContext) -> Option<Transition> {
        let touch = match ctx.touches {
            [touch] => *touch,
            [_, _] => return Some(Transition::RotateAndZoom),
            _ => return Some(Transition::Idle),
        };

        match touch.phase {
            TouchPhase::Moved => {
                let travelled_sq =
                    (touch.screen_position - self.initial_screen_point).length_squared();
                let threshold = ctx.config.input.drag_threshold;
                if travelled_sq <= threshold * threshold {
                    return None;
                }

                if self.is_on_current_selection {
                    Some(Transition::DragObject)
                } else {
                    // Seed the pan with the original contact point so the
                    // distance already travelled is not lost.
                    Some(Transition::DragCamera {
                        initial_screen_point: self.initial_screen_point,
                    })
                }
            }
            TouchPhase::Ended => {
                // A tap: select whatever is under the release point, or
                // clear the selection on empty space.
                let touched = ctx.selectable_at(touch.screen_position);
                ctx.selection.change_selection(touched, &mut *ctx.ui);
                Some(Transition::Idle)
            }
            TouchPhase::Canceled => Some(Transition::Idle),
            TouchPhase::Began | TouchPhase::Stationary => None,
        }
    }
}
