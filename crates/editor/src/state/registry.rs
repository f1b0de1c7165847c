//! ID-indexed set of live scene objects.

use std::collections::HashMap;

use glam::Vec3;
use shared::{AssetId, InstanceId};

use crate::error::EditorError;
use crate::viewport::picking::{Collider, Layer};

/// A live object in the scene.
///
/// Owned by the registry; every other part of the editor refers to it by
/// instance ID, because undo/redo cycles replace the concrete object while
/// keeping the ID stable.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub asset_id: AssetId,
    pub instance_id: InstanceId,
    /// True only between spawn and the first completed move, after which it
    /// is permanently false.
    pub is_new_object: bool,
    pub position: Vec3,
    pub bounding_radius: f32,
    pub colliders: Vec<Collider>,
}

impl SceneObject {
    pub fn new(asset_id: AssetId, instance_id: InstanceId, bounding_radius: f32) -> Self {
        Self {
            asset_id,
            instance_id,
            is_new_object: false,
            position: Vec3::ZERO,
            bounding_radius,
            colliders: vec![
                Collider {
                    layer: Layer::Default,
                    center_offset: Vec3::new(0.0, bounding_radius * 0.5, 0.0),
                    radius: bounding_radius,
                    enabled: true,
                },
                // Sphere sized from the object's bounds to get an
                // approximate selection area.
                Collider {
                    layer: Layer::Selection,
                    center_offset: Vec3::new(0.0, bounding_radius, 0.0),
                    radius: bounding_radius,
                    enabled: true,
                },
            ],
        }
    }

    /// The approximate center of the object, based on its bounds.
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.bounding_radius, 0.0)
    }
}

/// Lookup of live scene objects by instance ID, preserving spawn order for
/// enumeration.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    lookup: HashMap<InstanceId, SceneObject>,
    order: Vec<InstanceId>,
}

impl ObjectRegistry {
    /// Add an object. Returns `false` if an object with the same instance
    /// ID is already registered.
    pub fn add(&mut self, object: SceneObject) -> bool {
        let instance_id = object.instance_id;
        if self.lookup.contains_key(&instance_id) {
            return false;
        }

        self.lookup.insert(instance_id, object);
        self.order.push(instance_id);
        true
    }

    /// Add an object, reporting a duplicate ID as an error.
    pub fn add_checked(&mut self, object: SceneObject) -> Result<(), EditorError> {
        let instance_id = object.instance_id;
        if self.add(object) {
            Ok(())
        } else {
            Err(EditorError::DuplicateInstance(instance_id))
        }
    }

    pub fn get(&self, instance_id: InstanceId) -> Option<&SceneObject> {
        self.lookup.get(&instance_id)
    }

    pub fn get_mut(&mut self, instance_id: InstanceId) -> Option<&mut SceneObject> {
        self.lookup.get_mut(&instance_id)
    }

    /// Get an object, reporting an unknown ID as an error.
    pub fn get_checked(&self, instance_id: InstanceId) -> Result<&SceneObject, EditorError> {
        self.get(instance_id)
            .ok_or(EditorError::UnknownInstance(instance_id))
    }

    /// Remove an object. Returns `false` if the ID is not registered.
    pub fn remove(&mut self, instance_id: InstanceId) -> bool {
        if self.lookup.remove(&instance_id).is_none() {
            return false;
        }

        self.order.retain(|id| *id != instance_id);
        true
    }

    /// Remove an object, reporting an unknown ID as an error.
    pub fn remove_checked(&mut self, instance_id: InstanceId) -> Result<(), EditorError> {
        if self.remove(instance_id) {
            Ok(())
        } else {
            Err(EditorError::UnknownInstance(instance_id))
        }
    }

    pub fn contains(&self, instance_id: InstanceId) -> bool {
        self.lookup.contains_key(&instance_id)
    }

    /// All live objects in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.order.iter().filter_map(|id| self.lookup.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
