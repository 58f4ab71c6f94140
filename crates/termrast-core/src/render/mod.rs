//! The per-triangle pipeline: near-plane clipping, rasterization, shading,
//! and frame composition.

pub mod clip;
pub mod composer;
pub mod raster;
pub mod shade;

use glam::{Vec2, Vec3, Vec4};

/// A vertex in flight between the clip-space transform and the rasterizer.
///
/// Exists only for the duration of one triangle: `clip` is the homogeneous
/// position, the remaining attributes stay in world space so shading can run
/// per fragment after interpolation.
#[derive(Debug, Clone, Copy)]
pub struct ClipVertex {
    pub clip: Vec4,
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    /// Position after the perspective divide. Requires `clip.w != 0`; the
    /// near-plane clipper guarantees `w >= near` for every surviving vertex.
    pub fn ndc(&self) -> Vec3 {
        self.clip.truncate() / self.clip.w
    }

    /// Linear interpolation of the full attribute set.
    pub fn lerp(&self, other: &ClipVertex, t: f32) -> ClipVertex {
        ClipVertex {
            clip: self.clip.lerp(other.clip, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}
