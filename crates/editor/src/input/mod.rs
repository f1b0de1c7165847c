//! Touch gesture state machine.
//!
//! Exactly one state is active at a time. Each frame the active state
//! inspects the touch snapshot through [`FrameContext`] and either acts on
//! the subsystems or requests a [`Transition`]; at most one transition
//! happens per frame.

pub mod drag_camera;
pub mod drag_object;
pub mod idle;
pub mod rotate_zoom;
pub mod select_object;

use glam::Vec2;

use crate::editor::FrameContext;

use self::drag_camera::DragCameraState;
use self::drag_object::DragObjectState;
use self::idle::IdleState;
use self::rotate_zoom::RotateAndZoomState;
use self::select_object::SelectObjectState;

/// Identity of a gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Idle,
    SelectObject,
    DragCamera,
    DragObject,
    RotateAndZoom,
}

/// A requested state change, carrying the seed data the target state needs.
#[derive(Debug, Clone, Copy)]
pub enum Transition {
    Idle,
    SelectObject,
    /// `initial_screen_point` anchors the pan so the world point that was
    /// under the finger stays under it. A tap that crossed the drag
    /// threshold seeds this with its original contact point; a pinch that
    /// lost a finger seeds it with the surviving finger's current point.
    DragCamera { initial_screen_point: Vec2 },
    DragObject,
    RotateAndZoom,
}

/// Owns the five gesture states and dispatches the per-frame update to the
/// active one.
#[derive(Debug, Default)]
pub struct InputHandler {
    idle: IdleState,
    select_object: SelectObjectState,
    drag_camera: DragCameraState,
    drag_object: DragObjectState,
    rotate_zoom: RotateAndZoomState,
    active: Option<StateId>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active state. `Idle` until the first update.
    pub fn active_state(&self) -> StateId {
        self.active.unwrap_or(StateId::Idle)
    }

    /// Process this frame's touch snapshot.
    pub fn update(&mut self, ctx: &mut FrameContext) {
        let transition = match self.active_state() {
            StateId::Idle => self.idle.update(ctx),
            StateId::SelectObject => self.select_object.update(ctx),
            StateId::DragCamera => self.drag_camera.update(ctx),
            StateId::DragObject => self.drag_object.update(ctx),
            StateId::RotateAndZoom => self.rotate_zoom.update(ctx),
        };

        if let Some(transition) = transition {
            self.change_state(transition, ctx);
        }
    }

    /// Switch states, running the active state's exit hook and the target
    /// state's entry hook. Also used to force a state from outside the
    /// per-frame flow, e.g. to start dragging a freshly spawned object.
    pub fn change_state(&mut self, transition: Transition, ctx: &mut FrameContext) {
        self.exit_active(ctx);

        let next = match transition {
            Transition::Idle => StateId::Idle,
            Transition::SelectObject => {
                self.select_object.on_enter(ctx);
                StateId::SelectObject
            }
            Transition::DragCamera {
                initial_screen_point,
            } => {
                self.drag_camera.on_enter(ctx, initial_screen_point);
                StateId::DragCamera
            }
            Transition::DragObject => {
                self.drag_object.on_enter(ctx);
                StateId::DragObject
            }
            Transition::RotateAndZoom => {
                self.rotate_zoom.on_enter(ctx);
                StateId::RotateAndZoom
            }
        };

        tracing::debug!(from = ?self.active, to = ?next, "input state change");
        self.active = Some(next);
    }

    fn exit_active(&mut self, ctx: &mut FrameContext) {
        // Only the object drag has teardown work.
        if self.active == Some(StateId::DragObject) {
            self.drag_object.on_exit(ctx);
        }
    }
}
