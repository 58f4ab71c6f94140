//! Asset ingestion for the terminal renderer.
//!
//! Parses wavefront geometry and material text, decodes textures, applies
//! the mesh-folder policy, and reads scene files. [`FsAssetLoader`] is the
//! filesystem-backed implementation of the core's `AssetLoader` seam, which
//! lets swap/reload behaviors pull assets mid-run.

pub mod error;
pub mod folder;
pub mod mtl;
pub mod obj;
pub mod scene;
pub mod texture;

pub use error::AssetError;

use log::warn;
use std::path::{Path, PathBuf};
use termrast_core::{AssetLoader, Mesh, Texture};

/// Filesystem asset loader rooted at an asset directory containing
/// `models/<folder>/` mesh folders and `scenes/` scene files.
#[derive(Debug, Clone)]
pub struct FsAssetLoader {
    root: PathBuf,
    /// Smooth every loaded mesh regardless of its geometry flag.
    pub force_smooth: bool,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            force_smooth: false,
        }
    }

    /// Directory holding the named mesh folder.
    pub fn model_dir(&self, folder: &str) -> PathBuf {
        self.root.join("models").join(folder)
    }

    /// Load a mesh folder, propagating the error (used by scene loading,
    /// where a missing mesh is fatal).
    pub fn load_mesh_fatal(&mut self, folder: &str) -> Result<Mesh, AssetError> {
        folder::load_mesh_folder(&self.model_dir(folder), self.force_smooth)
    }

    /// Resolve a path from a scene file: absolute paths pass through,
    /// relative ones are anchored at the asset root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_mesh(&mut self, folder: &str) -> Option<Mesh> {
        match self.load_mesh_fatal(folder) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                warn!("mesh reload '{folder}' failed: {e}");
                None
            }
        }
    }

    fn load_texture(&mut self, path: &Path) -> Option<Texture> {
        match texture::load_texture(&self.resolve(path)) {
            Ok(tex) => Some(tex),
            Err(e) => {
                warn!("texture swap failed: {e}");
                None
            }
        }
    }

    fn load_mesh_variant(&mut self, folder: &str, n: u32) -> Option<Mesh> {
        match folder::load_geometry_variant(&self.model_dir(folder), n, self.force_smooth) {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                warn!("mesh variant {folder}{n} failed: {e}");
                None
            }
        }
    }
}
