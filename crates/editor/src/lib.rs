//! Interaction core for a touch-driven 3D scene editor.
//!
//! Converts per-frame multi-touch snapshots into camera movement, object
//! selection, object dragging, and two-finger rotate/zoom gestures, while
//! maintaining a linear undo/redo history of scene edits (spawn, move,
//! delete). Rendering, asset import, and UI layout live in the embedding
//! application and are reached through the [`ui::UiFacade`] and
//! [`state::scene::ScenePersistence`] traits.

pub mod config;
pub mod editor;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod input;
pub mod state;
pub mod touch;
pub mod ui;
pub mod viewport;

pub use editor::Editor;
pub use error::EditorError;
