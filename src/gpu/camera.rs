//! Orbit camera and perspective projection.

use glam::{Mat4, Vec3};

/// Narrowest vertical field of view, in degrees.
pub const MIN_FOV_Y: f32 = 60.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 50.0;

/// Orbit camera for viewing particle simulations.
///
/// The default places the eye at `(0, 3, 20)` looking down `-Z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 20.0,
            target: Vec3::new(0.0, 3.0, 0.0),
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Eye-from-world (view) matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// World-from-eye transform, the camera's placement in the world.
    pub fn transform(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Rotate by a mouse drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.5, 1.5);
    }

    /// Move toward (positive) or away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.8).clamp(2.0, 45.0);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertical field of view for a window, in degrees.
///
/// Wide windows get [`MIN_FOV_Y`]. Tall windows widen the vertical FOV so
/// the horizontal FOV never drops below it.
pub fn fov_y_degrees(width: u32, height: u32) -> f32 {
    if width >= height || width == 0 {
        return MIN_FOV_Y;
    }
    let half = (MIN_FOV_Y * 0.5).to_radians();
    let widened = (half.sin() * height as f32).atan2(half.cos() * width as f32);
    (widened * 2.0).to_degrees()
}

/// Perspective projection for a window of the given size.
pub fn projection_matrix(width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    Mat4::perspective_rh(fov_y_degrees(width, height).to_radians(), aspect, NEAR, FAR)
}
