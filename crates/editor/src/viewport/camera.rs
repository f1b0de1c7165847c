//! Smoothed camera rig.
//!
//! The rig anchors the camera to a pivot that slides over the ground plane.
//! Move commands take effect instantly; rotate and zoom commands set a
//! target that the visible value approaches with a minimum-speed
//! exponential model, so motion completes within roughly the configured
//! inertia time regardless of gap size while never crawling on tiny
//! residual gaps.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::config::CameraConfig;

use super::picking::Ray;

pub struct CameraRig {
    config: CameraConfig,
    /// Fixed pivot-local zoom axis; the camera sits at
    /// `zoom_direction * zoom_distance` before the pivot transform.
    zoom_direction: Vec3,
    pivot_position: Vec3,
    yaw: f32,
    zoom_distance: f32,
    target_position: Vec3,
    target_yaw: f32,
    target_zoom: f32,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let offset = Vec3::from(config.initial_offset);
        let zoom_distance = offset.length();
        let zoom_direction = offset / zoom_distance;

        Self {
            config,
            zoom_direction,
            pivot_position: Vec3::ZERO,
            yaw: 0.0,
            zoom_distance,
            target_position: Vec3::ZERO,
            target_yaw: 0.0,
            target_zoom: zoom_distance,
        }
    }

    /// Set the target position the pivot should move to.
    pub fn move_to(&mut self, position: Vec3) {
        self.target_position = position;
    }

    /// Rotate the camera around the vertical axis by the given angle in
    /// radians. The visible rotation happens smoothly over several frames.
    pub fn rotate_by(&mut self, angle: f32) {
        self.target_yaw += angle * self.config.rotate_sensitivity;
    }

    /// Zoom in or out by the given delta. Positive values zoom out. The
    /// target distance is clamped to the configured range.
    pub fn zoom_by(&mut self, delta: f32) {
        // Convert the delta to a factor that is > 1.0 (zoom out) or < 1.0
        // (zoom in).
        let factor = 1.0 + delta * self.config.zoom_sensitivity;

        self.target_zoom =
            (self.target_zoom * factor).clamp(self.config.min_zoom, self.config.max_zoom);
    }

    /// Integrate the visible pose toward its targets. Called once per frame
    /// after all input processing.
    pub fn update(&mut self, dt: f32) {
        // No smoothing on the pivot itself; a delayed pivot feels wrong
        // with touch input.
        self.pivot_position = self.target_position;

        self.update_rotation(dt);
        self.update_zoom(dt);
    }

    fn update_rotation(&mut self, dt: f32) {
        if self.config.rotation_inertia_time <= 0.0 {
            self.yaw = self.target_yaw;
            return;
        }

        let gap = (self.target_yaw - self.yaw).abs();
        let speed = gap.max(self.config.min_rotate_speed) / self.config.rotation_inertia_time;

        self.yaw = move_towards(self.yaw, self.target_yaw, speed * dt);
    }

    fn update_zoom(&mut self, dt: f32) {
        if self.config.zoom_inertia_time <= 0.0 {
            self.zoom_distance = self.target_zoom;
            return;
        }

        let gap = (self.target_zoom - self.zoom_distance).abs();
        let speed = gap.max(self.config.min_zoom_speed) / self.config.zoom_inertia_time;

        self.zoom_distance = move_towards(self.zoom_distance, self.target_zoom, speed * dt);
    }

    // ── Pose queries ────────────────────────────────────────────

    pub fn pivot_position(&self) -> Vec3 {
        self.pivot_position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn zoom_distance(&self) -> f32 {
        self.zoom_distance
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    /// Rotation of the pivot around the vertical axis.
    pub fn pivot_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> Vec3 {
        self.pivot_position + self.pivot_rotation() * (self.zoom_direction * self.zoom_distance)
    }

    /// Unit vector from the camera toward the pivot.
    pub fn forward(&self) -> Vec3 {
        (self.pivot_position - self.eye_position()).normalize_or_zero()
    }

    /// Orientation of the camera itself, looking at the pivot.
    pub fn camera_rotation(&self) -> Quat {
        look_rotation(self.pivot_position - self.eye_position(), Vec3::Y)
    }

    /// Height of the camera above the ground plane, used as the reference
    /// distance for world-point fallbacks.
    pub fn height_above_ground(&self) -> f32 {
        self.eye_position().y
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.pivot_position, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.config.fov, aspect, self.config.near, self.config.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Cast a ray from a screen position into the scene. Screen coordinates
    /// are in pixels with a bottom-left origin.
    pub fn screen_ray(&self, screen_pos: Vec2, screen: Vec2) -> Ray {
        let aspect = screen.x / screen.y;

        // Screen -> NDC
        let ndc_x = screen_pos.x / screen.x * 2.0 - 1.0;
        let ndc_y = screen_pos.y / screen.y * 2.0 - 1.0;

        let vp_inv = self.view_projection(aspect).inverse();

        // Unproject near and far points
        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }

    /// Project a world point to screen coordinates (pixels, bottom-left
    /// origin). Returns `None` for points behind the camera.
    pub fn project(&self, point: Vec3, screen: Vec2) -> Option<Vec2> {
        let aspect = screen.x / screen.y;
        let clip = self.view_projection(aspect) * Vec4::new(point.x, point.y, point.z, 1.0);

        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen.x,
            (ndc.y + 1.0) * 0.5 * screen.y,
        ))
    }
}

/// Rotation that maps local +Z onto `forward` with `up` as the secondary
/// axis.
pub(crate) fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    let r = up.cross(f).normalize_or_zero();
    let u = f.cross(r);

    Quat::from_mat3(&Mat3::from_cols(r, u, f))
}

fn move_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(gap)
    }
}
