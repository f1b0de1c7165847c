//! Current selection tracking.

use shared::InstanceId;

use crate::ui::UiFacade;

/// Keeps track of the currently selected scene object and mirrors it to the
/// selection marker in the UI.
#[derive(Debug, Default)]
pub struct SelectionState {
    current: Option<InstanceId>,
}

impl SelectionState {
    /// The currently selected object, if any.
    pub fn current(&self) -> Option<InstanceId> {
        self.current
    }

    /// Change the selection, or clear it by passing `None`.
    pub fn change_selection(&mut self, selected: Option<InstanceId>, ui: &mut dyn UiFacade) {
        self.current = selected;

        if selected.is_some() {
            ui.show_selection_marker();
        } else {
            ui.hide_selection_marker();
        }
    }

    /// Clear the selection.
    pub fn clear(&mut self, ui: &mut dyn UiFacade) {
        self.current = None;
        ui.hide_selection_marker();
    }
}
