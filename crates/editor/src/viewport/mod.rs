//! Camera rig and ray queries for the 3D viewport.

pub mod camera;
pub mod picking;
