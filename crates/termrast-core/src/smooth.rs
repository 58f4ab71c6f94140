//! Vertex-normal smoothing.
//!
//! Recomputes per-corner normals as the unweighted average of the face
//! normals of every triangle sharing that corner position. Invoked when the
//! geometry sets its smooth flag, or unconditionally under the force-smooth
//! option.

use crate::math;
use crate::scene::Triangle;
use glam::Vec3;
use std::collections::HashMap;

/// Per-axis tolerance for treating two corner positions as the same vertex.
const POSITION_TOLERANCE: f32 = 1e-6;

type PositionKey = (i64, i64, i64);

fn position_key(p: Vec3) -> PositionKey {
    let quantize = |v: f32| (v / POSITION_TOLERANCE).round() as i64;
    (quantize(p.x), quantize(p.y), quantize(p.z))
}

/// Replace every corner normal with the position-class average of incident
/// face normals. Degenerate triangles contribute a zero face normal.
pub fn smooth_normals(triangles: &mut [Triangle]) {
    let mut classes: HashMap<PositionKey, (Vec3, u32)> = HashMap::new();

    for tri in triangles.iter() {
        let face = tri.face_normal();
        for corner in &tri.pos {
            let entry = classes.entry(position_key(*corner)).or_insert((Vec3::ZERO, 0));
            entry.0 += face;
            entry.1 += 1;
        }
    }

    for tri in triangles.iter_mut() {
        for corner in 0..3 {
            if let Some(&(sum, count)) = classes.get(&position_key(tri.pos[corner])) {
                tri.normal[corner] = math::normalize_safe(sum / count as f32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn flat_fan_keeps_shared_normal() {
        // Two coplanar triangles sharing an edge: every smoothed normal is
        // the common face normal.
        let tri = |a, b, c| Triangle {
            pos: [a, b, c],
            uv: [Vec2::ZERO; 3],
            normal: [Vec3::ZERO; 3],
        };
        let mut tris = vec![
            tri(Vec3::ZERO, Vec3::X, Vec3::Y),
            tri(Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
        ];
        smooth_normals(&mut tris);
        for t in &tris {
            for n in &t.normal {
                assert!((*n - Vec3::Z).length() < 1e-6, "normal: {n}");
            }
        }
    }
}
