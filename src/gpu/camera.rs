//! Camera for 3D orbit view.

use glam::{Mat4, Vec2, Vec3};

/// Radians of orbit per pixel of mouse drag.
const ORBIT_SENSITIVITY: f32 = 0.005;
/// World units of dolly per scroll line.
const ZOOM_STEP: f32 = 0.8;
const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 40.0;
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera looking at the duct.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Camera {
    /// Default view: in front of the duct, slightly above it, looking at
    /// the blend door region.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.28,
            distance: 14.6,
            target: Vec3::new(2.0, 0.0, 0.0),
            fov_y: 75.0_f32.to_radians(),
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y, aspect, 0.1, 1000.0);
        proj * self.view_matrix()
    }

    /// Unit vector pointing right on screen, in world space.
    pub fn right(&self) -> Vec3 {
        let forward = (self.target - self.position()).normalize();
        forward.cross(Vec3::Y).normalize()
    }

    /// Unit vector pointing up on screen, in world space.
    pub fn up(&self) -> Vec3 {
        let forward = (self.target - self.position()).normalize();
        self.right().cross(forward)
    }

    /// Orbit by a mouse drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Dolly in (positive) or out (negative) by scroll lines.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        // Roughly (2, 4, 14): in front of the duct and above it.
        let p = Camera::new().position();
        assert!((p.x - 2.0).abs() < 1e-4);
        assert!(p.y > 3.5 && p.y < 4.5);
        assert!(p.z > 13.5 && p.z < 14.5);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut camera = Camera::new();
        camera.orbit(Vec2::new(120.0, -40.0));
        let right = camera.right();
        let up = camera.up();
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(right.dot(up).abs() < 1e-5);
        assert!(up.y > 0.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new();
        camera.orbit(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.pitch, PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut camera = Camera::new();
        camera.zoom(1000.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }
}
