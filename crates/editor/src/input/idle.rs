//! Rest state: watches for the start of a gesture.

use crate::editor::FrameContext;
use crate::touch::TouchPhase;

use super::Transition;

#[derive(Debug, Default)]
pub struct IdleState;

impl IdleState {
    pub fn update(&mut self, ctx: &mut FrameContext) -> Option<Transition> {
        match ctx.touches {
            [touch] => {
                // Touches captured by the UI never start a selection.
                if touch.phase == TouchPhase::Began && !ctx.ui.is_pointer_over_ui(touch.id) {
                    Some(Transition::SelectObject)
                } else {
                    None
                }
            }
            [_, _] => Some(Transition::RotateAndZoom),
            _ => None,
        }
    }
}
