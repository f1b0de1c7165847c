//! Types shared between the editor core and embedding front ends.

use serde::{Deserialize, Serialize};

/// Index of an asset in the catalog.
pub type AssetId = usize;

/// Stable identifier of a scene object. Survives destroy/recreate cycles
/// driven by undo and redo.
pub type InstanceId = u64;

/// Describes an asset that can be spawned at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// The ID of the asset, assigned from catalog order at startup.
    pub id: AssetId,
    /// Display name of the asset.
    pub name: String,
    /// Radius of the sphere that approximates the asset's bounds.
    pub bounding_radius: f32,
}

impl AssetDescriptor {
    /// Create a descriptor with a placeholder ID. The catalog assigns the
    /// real ID when the scene is constructed.
    pub fn new(name: impl Into<String>, bounding_radius: f32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            bounding_radius,
        }
    }
}

/// Serialized form of a single scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectData {
    /// The ID of the asset this object was spawned from.
    pub asset_id: AssetId,
    /// World-space position of the object.
    pub position: [f32; 3],
}

/// Serialized form of a scene, the shape consumed by the persistence facade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    pub scene_objects: Vec<SceneObjectData>,
}

impl SceneData {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
