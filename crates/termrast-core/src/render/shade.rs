//! Per-fragment Blinn-Phong shading.

use crate::scene::{Light, Material};
use glam::{Vec2, Vec3};

/// Distances below this are clamped before the direction divide.
const MIN_LIGHT_DISTANCE: f32 = 1e-4;

/// Shade one fragment.
///
/// `normal` must already be unit length. Lights beyond their radius are cut
/// off entirely; within it, the specular term is attenuated by
/// `1 / (1 + (d/radius)^2)` while the diffuse term is not. The diffuse
/// texture modulates ambient + diffuse only, and the material opacity blends
/// the lit color toward the background (opacity 1 = opaque).
pub fn shade_fragment(
    world: Vec3,
    normal: Vec3,
    uv: Vec2,
    material: &Material,
    lights: &[Light],
    camera_pos: Vec3,
    background: Vec3,
) -> Vec3 {
    let ambient = material.ambient;
    let mut diffuse = Vec3::ZERO;
    let mut specular = Vec3::ZERO;

    for light in lights {
        let to_light = light.position - world;
        let dist = to_light.length().max(MIN_LIGHT_DISTANCE);
        if dist > light.radius {
            continue;
        }
        let l = to_light / dist;

        let n_dot_l = normal.dot(l).max(0.0);
        if n_dot_l == 0.0 {
            continue;
        }

        let attenuation = 1.0 / (1.0 + (dist / light.radius).powi(2));
        let view = (camera_pos - world).normalize_or_zero();
        let halfway = (view + l).normalize_or_zero();
        // Clamped before pow: a negative base would NaN on fractional
        // exponents.
        let n_dot_h = normal.dot(halfway).max(0.0);
        let spec_factor = n_dot_h.powf(material.shininess);

        diffuse += material.diffuse * light.color * light.brightness;
        specular += material.specular * light.color * light.brightness * spec_factor * attenuation;
    }

    let ambient = ambient.clamp(Vec3::ZERO, Vec3::ONE);
    let diffuse = diffuse.clamp(Vec3::ZERO, Vec3::ONE);
    let specular = specular.clamp(Vec3::ZERO, Vec3::ONE);

    let texel = material.diffuse_map.sample(uv.x, uv.y);
    let lit = (ambient + diffuse) * texel + specular;

    background
        .lerp(lit, material.opacity)
        .clamp(Vec3::ZERO, Vec3::ONE)
}

/// Quantize a shaded color to 8-bit channels.
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    [
        (color.x * 255.0).round() as u8,
        (color.y * 255.0).round() as u8,
        (color.z * 255.0).round() as u8,
    ]
}
