//! Triangle meshes, materials, and textures.

use crate::math;
use glam::{Mat4, Vec2, Vec3};

/// One triangle with per-corner attributes.
///
/// Winding: a face is front-facing when `cross(pos[1] - pos[0],
/// pos[2] - pos[0])` points toward the viewer.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub pos: [Vec3; 3],
    pub uv: [Vec2; 3],
    pub normal: [Vec3; 3],
}

impl Triangle {
    /// Unit geometric face normal, or zero for a degenerate triangle.
    pub fn face_normal(&self) -> Vec3 {
        math::normalize_safe((self.pos[1] - self.pos[0]).cross(self.pos[2] - self.pos[0]))
    }
}

/// Immutable RGB texture with float texels in [0, 1].
///
/// A null texture (no texels) samples white, so untextured materials render
/// with their lighting colors alone.
#[derive(Debug, Clone, Default)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec3>,
}

impl Texture {
    /// Build from a row-major texel array of length `width * height`.
    pub fn new(width: u32, height: u32, texels: Vec<Vec3>) -> Self {
        debug_assert_eq!(texels.len(), (width * height) as usize);
        Self {
            width,
            height,
            texels,
        }
    }

    /// The sentinel for a missing image; sampling returns white.
    pub fn null() -> Self {
        Self::default()
    }

    /// Uniform single-color texture.
    pub fn solid(width: u32, height: u32, color: Vec3) -> Self {
        Self::new(width, height, vec![color; (width * height) as usize])
    }

    /// The 120x120 magenta/black checkerboard (4-pixel squares) used when a
    /// mesh folder provides no image at all.
    pub fn checkerboard() -> Self {
        const SIZE: u32 = 120;
        const SQUARE: u32 = 4;
        let magenta = Vec3::new(1.0, 0.0, 1.0);
        let mut texels = Vec::with_capacity((SIZE * SIZE) as usize);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let even = ((x / SQUARE) + (y / SQUARE)) % 2 == 0;
                texels.push(if even { magenta } else { Vec3::ZERO });
            }
        }
        Self::new(SIZE, SIZE, texels)
    }

    pub fn is_null(&self) -> bool {
        self.texels.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-texel lookup with clamp-to-edge wrapping and a flipped V
    /// axis (v = 0 is the bottom image row). A null texture returns white.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        if self.texels.is_empty() {
            return Vec3::ONE;
        }
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let tx = (u * (self.width - 1) as f32) as u32;
        let ty = ((1.0 - v) * (self.height - 1) as f32) as u32;
        self.texels[(ty * self.width + tx) as usize]
    }
}

/// Surface description from a wavefront material record.
#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    /// RGB in [0, 1].
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Specular exponent, >= 0.
    pub shininess: f32,
    /// `d` record: 1 renders opaque, 0 dissolves to the background.
    pub opacity: f32,
    /// Illumination model index; carried through unused.
    pub illum: i32,
    pub diffuse_map: Texture,
    /// Recorded but not sampled by the pipeline.
    pub specular_map: Option<Texture>,
    /// Recorded but not sampled by the pipeline.
    pub normal_map: Option<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            shininess: 32.0,
            opacity: 1.0,
            illum: 2,
            diffuse_map: Texture::null(),
            specular_map: None,
            normal_map: None,
        }
    }
}

/// A named triangle soup with its material.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// The source folder name; behaviors address meshes by it.
    pub name: String,
    pub triangles: Vec<Triangle>,
    pub material: Material,
    /// Geometry requested smooth shading (`s on`).
    pub smooth: bool,
}

impl Mesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>, material: Material) -> Self {
        Self {
            name: name.into(),
            triangles,
            material,
            smooth: false,
        }
    }

    /// Mean of all triangle corner positions.
    pub fn centroid(&self) -> Vec3 {
        let corners = (self.triangles.len() * 3) as f32;
        if corners == 0.0 {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self
            .triangles
            .iter()
            .map(|t| t.pos[0] + t.pos[1] + t.pos[2])
            .sum();
        sum / corners
    }

    /// Apply an absolute transform to every vertex, pushing normals through
    /// the inverse-transpose and renormalizing them.
    pub fn transform(&mut self, m: &Mat4) {
        let nm = math::normal_matrix(m);
        for tri in &mut self.triangles {
            for pos in &mut tri.pos {
                *pos = m.transform_point3(*pos);
            }
            for normal in &mut tri.normal {
                *normal = math::normalize_safe(nm * *normal);
            }
        }
    }

    /// Apply a transform relative to the mesh centroid:
    /// `translate(+c) * m * translate(-c)` as one absolute transform.
    pub fn transform_about_centroid(&mut self, m: &Mat4) {
        let c = self.centroid();
        let composed = math::translate(c) * *m * math::translate(-c);
        self.transform(&composed);
    }
}
