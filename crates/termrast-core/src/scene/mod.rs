//! Scene model: display, camera, lights, meshes, materials, behaviors.
//!
//! Pure data plus the transforms that mutate it. Rendering reads the scene;
//! behaviors are the only mutators and run before rasterization each frame.

pub mod behavior;
pub mod camera;
pub mod light;
pub mod mesh;

pub use behavior::{Action, Axis, Behavior, BehaviorKind, MeshTarget};
pub use camera::Camera;
pub use light::Light;
pub use mesh::{Material, Mesh, Texture, Triangle};

use glam::Vec3;

/// Seam to the asset ingestor, so swap/reload behaviors can pull meshes and
/// textures without the scene model depending on any loader crate.
///
/// All methods are best-effort: a miss returns `None` and the caller treats
/// it as a no-op (the loader is expected to log the reason).
pub trait AssetLoader {
    /// Load a complete mesh (geometry + material + diffuse texture) from a
    /// named folder under the asset root.
    fn load_mesh(&mut self, folder: &str) -> Option<Mesh>;

    /// Decode a texture image from a path.
    fn load_texture(&mut self, path: &std::path::Path) -> Option<Texture>;

    /// Load geometry variant `<folder><n>.obj` from a mesh folder, keeping
    /// the folder's material. Used by the mesh-cycling behavior.
    fn load_mesh_variant(&mut self, folder: &str, n: u32) -> Option<Mesh>;
}

/// Loader that never resolves anything. Swap/reload behaviors become
/// no-ops; useful for headless rendering and tests.
#[derive(Debug, Default)]
pub struct NullLoader;

impl AssetLoader for NullLoader {
    fn load_mesh(&mut self, _folder: &str) -> Option<Mesh> {
        None
    }

    fn load_texture(&mut self, _path: &std::path::Path) -> Option<Texture> {
        None
    }

    fn load_mesh_variant(&mut self, _folder: &str, _n: u32) -> Option<Mesh> {
        None
    }
}

/// The complete renderable scene plus its output dimensions.
#[derive(Debug)]
pub struct Display {
    pub width: u32,
    pub height: u32,
    /// Background color, RGB in [0, 1].
    pub background: Vec3,
    /// Recorded but not sampled by the pipeline.
    pub background_texture: Option<Texture>,
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
    pub lights: Vec<Light>,
    pub behaviors: Vec<Behavior>,
    pub frame_count: u64,
    pub running: bool,
}

impl Display {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Vec3::ZERO,
            background_texture: None,
            camera: Camera::default(),
            meshes: Vec::new(),
            lights: Vec::new(),
            behaviors: Vec::new(),
            frame_count: 0,
            running: true,
        }
    }

    /// Restore the pre-load defaults, dropping all meshes, lights and
    /// behaviors. Scene and folder loading call this first.
    pub fn reset(&mut self) {
        self.background = Vec3::ZERO;
        self.background_texture = None;
        self.camera = Camera::default();
        self.meshes.clear();
        self.lights.clear();
        self.behaviors.clear();
        self.frame_count = 0;
    }

    /// Index of the mesh named `name`, if any.
    pub fn mesh_index(&self, name: &str) -> Option<usize> {
        self.meshes.iter().position(|m| m.name == name)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
