//! Canned data for tests and demos.

use glam::Vec2;
use shared::AssetDescriptor;

use crate::touch::{TouchPhase, TouchSample};

/// A small asset catalog. IDs are assigned from catalog order when the
/// scene is built.
pub fn test_assets() -> Vec<AssetDescriptor> {
    vec![
        AssetDescriptor::new("tree", 1.0),
        AssetDescriptor::new("rock", 0.5),
        AssetDescriptor::new("house", 2.0),
        AssetDescriptor::new("tower", 1.5),
    ]
}

pub fn began(id: u64, position: Vec2) -> TouchSample {
    TouchSample::new(id, position, TouchPhase::Began)
}

pub fn moved(id: u64, position: Vec2) -> TouchSample {
    TouchSample::new(id, position, TouchPhase::Moved)
}

pub fn stationary(id: u64, position: Vec2) -> TouchSample {
    TouchSample::new(id, position, TouchPhase::Stationary)
}

pub fn ended(id: u64, position: Vec2) -> TouchSample {
    TouchSample::new(id, position, TouchPhase::Ended)
}
