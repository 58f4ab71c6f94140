//! Point light sources.

use glam::Vec3;

/// Point light with a hard influence radius.
///
/// Fragments farther than `radius` from the light receive nothing from it;
/// within the radius the specular term is attenuated by
/// `1 / (1 + (d / radius)^2)`.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vec3,
    /// RGB in [0, 1].
    pub color: Vec3,
    pub brightness: f32,
    /// Influence radius, > 0.
    pub radius: f32,
}

impl Light {
    pub fn new(position: Vec3, color: Vec3, brightness: f32, radius: f32) -> Self {
        Self {
            position,
            color,
            brightness,
            radius,
        }
    }
}
