//! Editor state: scene objects, selection, object movement, undo history.

pub mod mover;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod undo;
