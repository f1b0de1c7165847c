//! Linear undo/redo history.

use glam::Vec3;
use shared::{AssetId, InstanceId};

use crate::error::EditorError;

/// A reversible scene edit.
///
/// Commands capture only the data needed to invert themselves and resolve
/// the affected object through the registry by instance ID at execution
/// time; a previous undo/redo cycle may have replaced the concrete object.
#[derive(Debug, Clone)]
pub enum UndoCommand {
    /// An object was spawned (recorded on its first completed move).
    Spawn {
        asset_id: AssetId,
        instance_id: InstanceId,
        position: Vec3,
    },
    /// An object was deleted. `position` is its pre-delete location.
    Delete {
        asset_id: AssetId,
        instance_id: InstanceId,
        position: Vec3,
    },
    /// An object was moved.
    Move {
        instance_id: InstanceId,
        original_position: Vec3,
        target_position: Vec3,
    },
}

/// Ordered command history with a head pointing at the most recently
/// applied command.
///
/// Registering a new command while redo is available truncates everything
/// past the head first; there is no redo tree.
#[derive(Debug, Default)]
pub struct UndoStack {
    commands: Vec<UndoCommand>,
    /// Index of the most recently applied command, `None` if everything has
    /// been undone (or nothing was ever registered).
    head: Option<usize>,
}

impl UndoStack {
    pub fn can_undo(&self) -> bool {
        self.head.is_some()
    }

    pub fn can_redo(&self) -> bool {
        match self.head {
            None => !self.commands.is_empty(),
            Some(head) => head + 1 < self.commands.len(),
        }
    }

    /// Index of the most recently applied command.
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Append a command, discarding any undone commands past the head.
    /// Returns the new head index.
    pub fn register(&mut self, command: UndoCommand) -> usize {
        self.trim_redo_commands();

        self.commands.push(command);
        let head = self.commands.len() - 1;
        self.head = Some(head);
        head
    }

    /// Step the head back and hand out the command to invert. Fails without
    /// mutating when there is nothing to undo.
    pub fn begin_undo(&mut self) -> Result<UndoCommand, EditorError> {
        let head = self.head.ok_or(EditorError::NothingToUndo)?;
        let command = self.commands[head].clone();

        self.head = head.checked_sub(1);
        Ok(command)
    }

    /// Step the head forward and hand out the command to reapply. Fails
    /// without mutating when there is nothing to redo.
    pub fn begin_redo(&mut self) -> Result<UndoCommand, EditorError> {
        if !self.can_redo() {
            return Err(EditorError::NothingToRedo);
        }

        let next = self.head.map_or(0, |head| head + 1);
        self.head = Some(next);
        Ok(self.commands[next].clone())
    }

    fn trim_redo_commands(&mut self) {
        if !self.can_redo() {
            return;
        }

        match self.head {
            // The head is all the way at the start; drop everything.
            None => self.commands.clear(),
            Some(head) => self.commands.truncate(head + 1),
        }
    }
}
