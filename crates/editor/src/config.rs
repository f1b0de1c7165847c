//! Editor tuning values.

use serde::{Deserialize, Serialize};

/// Camera movement tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// The smallest distance to which the camera is allowed to zoom in.
    pub min_zoom: f32,
    /// The largest distance to which the camera is allowed to zoom out.
    pub max_zoom: f32,
    /// Sensitivity of the zoom action when pinching on the screen.
    pub zoom_sensitivity: f32,
    /// The lowest speed at which a zoom action moves to its target distance.
    pub min_zoom_speed: f32,
    /// The maximum time a zoom action takes to reach the target distance.
    /// Zero or negative disables smoothing and snaps instead.
    pub zoom_inertia_time: f32,
    /// Sensitivity of rotate actions. 1.0 matches the input angle exactly.
    pub rotate_sensitivity: f32,
    /// Minimal rotation speed in radians per second while smoothing.
    pub min_rotate_speed: f32,
    /// The maximum time a rotate action takes to complete.
    pub rotation_inertia_time: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance. Also the maximum distance for selection queries.
    pub far: f32,
    /// Initial offset of the camera from the pivot. Its direction is the
    /// fixed zoom axis; its length is the initial zoom distance.
    pub initial_offset: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 25.0,
            zoom_sensitivity: 1.0,
            min_zoom_speed: 0.1,
            zoom_inertia_time: 0.2,
            rotate_sensitivity: 1.0,
            min_rotate_speed: 5.0_f32.to_radians(),
            rotation_inertia_time: 0.2,
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 200.0,
            initial_offset: [0.0, 12.0, -10.0],
        }
    }
}

/// Object mover tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoverConfig {
    /// The minimal speed per second at which a dragged object moves.
    pub min_move_speed: f32,
    /// If larger than zero, a smooth delay is applied to dragged objects.
    pub move_inertia_time: f32,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            min_move_speed: 0.1,
            move_inertia_time: 0.2,
        }
    }
}

/// Touch input tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Screen size in pixels, bottom-left origin.
    pub screen_size: [f32; 2],
    /// Display density used to normalize pinch distances.
    pub screen_dpi: f32,
    /// Minimum screen-space displacement in pixels before a tap is
    /// reclassified as a drag.
    pub drag_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            screen_size: [1080.0, 1920.0],
            screen_dpi: 100.0,
            drag_threshold: 10.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    pub camera: CameraConfig,
    pub mover: MoverConfig,
    pub input: InputConfig,
}
