//! Sutherland-Hodgman clipping against the near plane.
//!
//! Runs in homogeneous clip space before the perspective divide, so
//! triangles crossing the camera plane never produce wrapped projections. A
//! vertex is inside when `z + w >= 0`; only the near plane is clipped here
//! (the remaining frustum planes are handled by bounding-box clamping and
//! the fully-offscreen reject in the composer).

use super::ClipVertex;

/// Clipping a triangle against one plane yields at most 4 vertices.
pub type ClipPolygon = heapless::Vec<ClipVertex, 4>;

fn near_distance(v: &ClipVertex) -> f32 {
    v.clip.z + v.clip.w
}

/// Clip a triangle against the near plane.
///
/// Returns the surviving convex polygon: empty (fully behind), the input
/// triangle (fully in front), or a 3/4-vertex polygon for a crossing
/// triangle. Attributes of the boundary vertices are linearly interpolated;
/// they satisfy `z + w == 0` up to float rounding.
pub fn clip_near(tri: &[ClipVertex; 3]) -> ClipPolygon {
    let mut out = ClipPolygon::new();

    for i in 0..3 {
        let a = &tri[i];
        let b = &tri[(i + 1) % 3];
        let da = near_distance(a);
        let db = near_distance(b);
        let a_inside = da >= 0.0;
        let b_inside = db >= 0.0;

        if a_inside && b_inside {
            let _ = out.push(*b);
        } else if a_inside || b_inside {
            let t = da / (da - db);
            let _ = out.push(a.lerp(b, t));
            if b_inside {
                let _ = out.push(*b);
            }
        }
    }

    out
}

/// Fan-triangulate a clipped polygon: (0,1,2) and, for quads, (0,2,3).
pub fn fan(poly: &ClipPolygon) -> heapless::Vec<[ClipVertex; 3], 2> {
    let mut tris = heapless::Vec::new();
    if poly.len() >= 3 {
        let _ = tris.push([poly[0], poly[1], poly[2]]);
    }
    if poly.len() == 4 {
        let _ = tris.push([poly[0], poly[2], poly[3]]);
    }
    tris
}
