//! First-person camera with yaw/pitch rotation state.

use crate::math;
use glam::{Mat4, Vec3};

/// Perspective camera.
///
/// `rotation` is derived from `yaw`/`pitch` via [`Camera::update_rotation`]
/// and cached so the per-frame matrix build and the movement basis agree.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Mat4,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Movement step per polled frame, in world units.
    pub speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Mat4::IDENTITY,
            fov_deg: 70.0,
            aspect: 1.0,
            near: 0.2,
            far: 500.0,
            yaw: 0.0,
            pitch: 0.0,
            speed: 0.5,
        }
    }
}

impl Camera {
    /// Rebuild the cached rotation matrix: pitch around X, then yaw around Y.
    pub fn update_rotation(&mut self) {
        self.rotation = math::rotate_x(self.pitch) * math::rotate_y(self.yaw);
    }

    /// View matrix: rotate after translating the camera to the origin.
    pub fn view_matrix(&self) -> Mat4 {
        self.rotation * math::translate(-self.position)
    }

    /// Full camera matrix `P * R * T` for the given output aspect.
    pub fn camera_matrix(&self) -> Mat4 {
        math::perspective(self.fov_deg, self.aspect, self.near, self.far) * self.view_matrix()
    }

    /// World-space view direction (the -Z basis row of the rotation).
    pub fn forward(&self) -> Vec3 {
        -self.rotation.row(2).truncate()
    }

    /// World-space right direction (the +X basis row of the rotation).
    pub fn right(&self) -> Vec3 {
        self.rotation.row(0).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rotation_looks_down_negative_z() {
        let cam = Camera::default();
        assert!((cam.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((cam.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let mut cam = Camera::default();
        cam.position = Vec3::new(1.0, 2.0, 3.0);
        let p = cam.view_matrix() * glam::Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert!(p.truncate().length() < 1e-6);
    }
}
