//! Error types for the editor core.

use shared::{AssetId, InstanceId};
use thiserror::Error;

/// Errors reported by the checked registry and undo operations.
///
/// Most call sites in the editor treat absence as an expected condition and
/// use the boolean/`Option` variants instead; these errors are for call
/// sites where absence indicates a logic defect.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("an object with instance ID {0} is already registered")]
    DuplicateInstance(InstanceId),

    #[error("no object with instance ID {0} exists in the registry")]
    UnknownInstance(InstanceId),

    #[error("no asset with ID {0} exists in the catalog")]
    UnknownAsset(AssetId),

    #[error("there are no commands left to undo")]
    NothingToUndo,

    #[error("there are no commands left to redo")]
    NothingToRedo,

    #[error("persistence error: {0}")]
    Persistence(String),
}
