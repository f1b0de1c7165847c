//! Facade for the UI layer.
//!
//! The editor core never touches widgets directly. Outbound notifications go
//! through [`UiFacade`]; inbound interactions arrive as [`UiEvent`] values
//! handled by [`crate::Editor::handle_event`].

use glam::Vec2;

/// Outbound interface to the UI layer.
pub trait UiFacade {
    /// Switch the UI between the default layout and the minimal editing
    /// layout shown while an object is being dragged.
    fn set_editing_mode(&mut self, editing: bool);

    fn show_selection_marker(&mut self);

    fn hide_selection_marker(&mut self);

    /// Reposition the selection marker. The point is in canvas space with a
    /// bottom-left origin, matching the marker's anchor.
    fn move_selection_marker(&mut self, canvas_point: Vec2);

    fn set_undo_enabled(&mut self, enabled: bool);

    fn set_redo_enabled(&mut self, enabled: bool);

    /// Whether the given touch started on top of a UI element. Touches that
    /// did are consumed by the UI and never start a selection.
    fn is_pointer_over_ui(&self, touch_id: u64) -> bool;
}

/// Inbound events from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// An asset was picked from the catalog hotbar.
    AssetPicked(usize),
    /// The delete button was released over the current selection.
    DeleteRequested,
    UndoRequested,
    RedoRequested,
}

/// Facade that ignores every notification, for embedders without a UI.
#[derive(Debug, Default)]
pub struct NullUi;

impl UiFacade for NullUi {
    fn set_editing_mode(&mut self, _editing: bool) {}
    fn show_selection_marker(&mut self) {}
    fn hide_selection_marker(&mut self) {}
    fn move_selection_marker(&mut self, _canvas_point: Vec2) {}
    fn set_undo_enabled(&mut self, _enabled: bool) {}
    fn set_redo_enabled(&mut self, _enabled: bool) {}
    fn is_pointer_over_ui(&self, _touch_id: u64) -> bool {
        false
    }
}
