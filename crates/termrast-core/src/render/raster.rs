//! Edge-function rasterization with perspective-correct interpolation and a
//! z-buffer.

use super::shade::shade_fragment;
use super::ClipVertex;
use crate::math;
use crate::scene::{Light, Material};
use glam::{Vec2, Vec3};

/// The glyph written for every covered cell.
pub const BLOCK_GLYPH: char = '\u{2588}';

/// Per-frame output buffers, allocated by the composer at frame start and
/// dropped at frame end.
#[derive(Debug)]
pub struct FrameBuffers {
    pub width: u32,
    pub height: u32,
    /// Interpolated NDC depth per cell; +inf where nothing has landed.
    pub depth: Vec<f32>,
    /// Shaded RGB in [0, 1] per cell.
    pub color: Vec<Vec3>,
    /// Space where nothing has landed, the block glyph elsewhere.
    pub glyphs: Vec<char>,
}

impl FrameBuffers {
    pub fn new(width: u32, height: u32) -> Self {
        let cells = (width * height) as usize;
        Self {
            width,
            height,
            depth: vec![f32::INFINITY; cells],
            color: vec![Vec3::ZERO; cells],
            glyphs: vec![' '; cells],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }
}

/// Signed double area of (a, b, c); positive for one winding, negative for
/// the other. Also evaluates the edge function for barycentrics.
#[inline]
pub fn edge(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y)
}

/// Rasterize one clipped triangle into the frame buffers.
///
/// Projects to pixel space, walks the clamped bounding box, and for every
/// covered cell interpolates depth and attributes perspective-correctly
/// (weighting by `1/clip_w`). Nearer fragments win under a less-than depth
/// test. Degenerate cases (zero area, zero interpolation denominator, zero
/// interpolated normal) are skipped without writing.
pub fn rasterize(
    fb: &mut FrameBuffers,
    tri: &[ClipVertex; 3],
    material: &Material,
    lights: &[Light],
    camera_pos: Vec3,
    background: Vec3,
) {
    if fb.width == 0 || fb.height == 0 {
        return;
    }

    let ndc = [tri[0].ndc(), tri[1].ndc(), tri[2].ndc()];
    let screen = ndc.map(|p| math::ndc_to_screen(p, fb.width, fb.height));
    let s = [screen[0].truncate(), screen[1].truncate(), screen[2].truncate()];

    let area = edge(s[0], s[1], s[2]);
    if area == 0.0 {
        return;
    }

    let min_x = s[0].x.min(s[1].x).min(s[2].x).floor().max(0.0) as u32;
    let max_x = (s[0].x.max(s[1].x).max(s[2].x) as u32).min(fb.width.saturating_sub(1));
    let min_y = s[0].y.min(s[1].y).min(s[2].y).floor().max(0.0) as u32;
    let max_y = (s[0].y.max(s[1].y).max(s[2].y) as u32).min(fb.height.saturating_sub(1));
    if min_x > max_x || min_y > max_y {
        return;
    }

    let inv_w = [1.0 / tri[0].clip.w, 1.0 / tri[1].clip.w, 1.0 / tri[2].clip.w];

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(s[1], s[2], p) / area;
            let w1 = edge(s[2], s[0], p) / area;
            let w2 = edge(s[0], s[1], p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let pw = [w0 * inv_w[0], w1 * inv_w[1], w2 * inv_w[2]];
            let denom = pw[0] + pw[1] + pw[2];
            if denom == 0.0 {
                continue;
            }

            let depth = (pw[0] * screen[0].z + pw[1] * screen[1].z + pw[2] * screen[2].z) / denom;
            let cell = fb.index(x, y);
            if depth >= fb.depth[cell] {
                continue;
            }

            let normal = (pw[0] * tri[0].normal + pw[1] * tri[1].normal + pw[2] * tri[2].normal)
                / denom;
            let len = normal.length();
            if len == 0.0 {
                continue;
            }
            let normal = normal / len;

            let world =
                (pw[0] * tri[0].world + pw[1] * tri[1].world + pw[2] * tri[2].world) / denom;
            let uv = (pw[0] * tri[0].uv + pw[1] * tri[1].uv + pw[2] * tri[2].uv) / denom;

            fb.depth[cell] = depth;
            fb.color[cell] =
                shade_fragment(world, normal, uv, material, lights, camera_pos, background);
            fb.glyphs[cell] = BLOCK_GLYPH;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    /// Screen-filling right triangle with w = 1 (orthographic-like input).
    fn ortho_vertex(x: f32, y: f32, z: f32) -> ClipVertex {
        ClipVertex {
            clip: Vec4::new(x, y, z, 1.0),
            world: Vec3::new(x, y, z),
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    fn flat_material() -> Material {
        Material {
            ambient: Vec3::ONE,
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            ..Material::default()
        }
    }

    #[test]
    fn covers_center_of_full_screen_triangle() {
        let mut fb = FrameBuffers::new(16, 16);
        let tri = [
            ortho_vertex(-1.0, -1.0, 0.0),
            ortho_vertex(3.0, -1.0, 0.0),
            ortho_vertex(-1.0, 3.0, 0.0),
        ];
        rasterize(&mut fb, &tri, &flat_material(), &[], Vec3::Z, Vec3::ZERO);
        let center = fb.index(8, 8);
        assert_eq!(fb.glyphs[center], BLOCK_GLYPH);
        assert!(fb.depth[center].is_finite());
        assert_eq!(fb.color[center], Vec3::ONE);
    }

    #[test]
    fn zero_area_triangle_is_skipped() {
        let mut fb = FrameBuffers::new(8, 8);
        let v = ortho_vertex(0.0, 0.0, 0.0);
        rasterize(&mut fb, &[v, v, v], &flat_material(), &[], Vec3::Z, Vec3::ZERO);
        assert!(fb.glyphs.iter().all(|&g| g == ' '));
    }

    #[test]
    fn nearer_fragment_wins_depth_test() {
        let mut fb = FrameBuffers::new(8, 8);
        let far = [
            ortho_vertex(-1.0, -1.0, 0.5),
            ortho_vertex(3.0, -1.0, 0.5),
            ortho_vertex(-1.0, 3.0, 0.5),
        ];
        let near = [
            ortho_vertex(-1.0, -1.0, -0.5),
            ortho_vertex(3.0, -1.0, -0.5),
            ortho_vertex(-1.0, 3.0, -0.5),
        ];
        let mut red = flat_material();
        red.ambient = Vec3::new(1.0, 0.0, 0.0);
        let mut blue = flat_material();
        blue.ambient = Vec3::new(0.0, 0.0, 1.0);

        // Far (red) first, near (blue) second; then the reverse order.
        rasterize(&mut fb, &far, &red, &[], Vec3::Z, Vec3::ZERO);
        rasterize(&mut fb, &near, &blue, &[], Vec3::Z, Vec3::ZERO);
        let cell = fb.index(4, 4);
        assert_eq!(fb.color[cell], Vec3::new(0.0, 0.0, 1.0));

        let mut fb = FrameBuffers::new(8, 8);
        rasterize(&mut fb, &near, &blue, &[], Vec3::Z, Vec3::ZERO);
        rasterize(&mut fb, &far, &red, &[], Vec3::Z, Vec3::ZERO);
        let cell = fb.index(4, 4);
        assert_eq!(fb.color[cell], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn bounding_box_clamps_to_screen() {
        // A triangle hanging far off every edge must still only touch
        // in-bounds cells (no panic, full coverage).
        let mut fb = FrameBuffers::new(4, 4);
        let tri = [
            ortho_vertex(-40.0, -40.0, 0.0),
            ortho_vertex(40.0, -40.0, 0.0),
            ortho_vertex(0.0, 40.0, 0.0),
        ];
        rasterize(&mut fb, &tri, &flat_material(), &[], Vec3::Z, Vec3::ZERO);
        assert!(fb.glyphs.iter().all(|&g| g == BLOCK_GLYPH));
    }
}
