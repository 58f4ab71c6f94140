//! Mesh-folder loading policy.
//!
//! A mesh folder holds exactly one geometry file, an optional material
//! file, and an optional bitmap. Extensions match case-insensitively; when
//! duplicates exist the last one in name order wins, with a warning. A
//! material without a diffuse map gets the folder bitmap; with neither, a
//! checkerboard is synthesized.

use crate::error::AssetError;
use crate::{mtl, obj, texture};
use log::warn;
use std::path::{Path, PathBuf};
use termrast_core::smooth::smooth_normals;
use termrast_core::{Material, Mesh, Texture};

/// Files discovered in a mesh folder.
#[derive(Debug, Default)]
struct FolderScan {
    geometry: Option<PathBuf>,
    material: Option<PathBuf>,
    bitmap: Option<PathBuf>,
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn scan(dir: &Path) -> Result<FolderScan, AssetError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut found = FolderScan::default();
    for path in files {
        let slot = match extension_of(&path).as_str() {
            "obj" => &mut found.geometry,
            "mtl" => &mut found.material,
            "png" | "jpg" | "jpeg" => &mut found.bitmap,
            _ => continue,
        };
        if let Some(previous) = slot.replace(path) {
            warn!(
                "{}: multiple candidates, ignoring {}",
                dir.display(),
                previous.display()
            );
        }
    }
    Ok(found)
}

/// Build a [`Material`] from an optional record, loading its textures
/// eagerly relative to the folder.
fn build_material(dir: &Path, record: Option<mtl::MaterialRecord>, bitmap: Option<&Path>) -> Material {
    let mut material = Material::default();
    let mut diffuse_path: Option<PathBuf> = None;

    if let Some(record) = record {
        material.name = record.name;
        material.ambient = record.ambient;
        material.diffuse = record.diffuse;
        material.specular = record.specular;
        material.shininess = record.shininess;
        material.opacity = record.opacity;
        material.illum = record.illum;
        diffuse_path = record.diffuse_map.map(|p| dir.join(p));
        material.specular_map = record
            .specular_map
            .map(|p| texture::load_texture_or_null(&dir.join(p)));
        material.normal_map = record
            .normal_map
            .map(|p| texture::load_texture_or_null(&dir.join(p)));
    }

    material.diffuse_map = match (diffuse_path, bitmap) {
        (Some(path), _) => texture::load_texture_or_null(&path),
        (None, Some(bitmap)) => texture::load_texture_or_null(bitmap),
        (None, None) => Texture::checkerboard(),
    };
    material
}

/// Load a complete mesh from a folder. Missing geometry is fatal.
pub fn load_mesh_folder(dir: &Path, force_smooth: bool) -> Result<Mesh, AssetError> {
    let found = scan(dir)?;
    let geometry_path = found.geometry.ok_or_else(|| AssetError::NoGeometry {
        dir: dir.to_path_buf(),
    })?;

    let geometry = obj::load_geometry(&geometry_path)?;

    let record = match &found.material {
        Some(path) => {
            let records = mtl::parse_materials(&std::fs::read_to_string(path)?);
            if records.len() > 1 {
                warn!(
                    "{}: {} material records, using the first",
                    path.display(),
                    records.len()
                );
            }
            records.into_iter().next()
        }
        None => None,
    };

    let material = build_material(dir, record, found.bitmap.as_deref());

    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("mesh")
        .to_string();

    let mut mesh = Mesh::new(name, geometry.triangles, material);
    mesh.smooth = geometry.smooth;
    if mesh.smooth || force_smooth {
        smooth_normals(&mut mesh.triangles);
    }
    Ok(mesh)
}

/// Load geometry variant `<folder><n>.obj`, reusing nothing else from the
/// folder; the caller keeps its current material.
pub fn load_geometry_variant(dir: &Path, n: u32, force_smooth: bool) -> Result<Mesh, AssetError> {
    let name = dir
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("mesh")
        .to_string();
    let path = dir.join(format!("{name}{n}.obj"));
    let geometry = obj::load_geometry(&path)?;

    let mut mesh = Mesh::new(name, geometry.triangles, Material::default());
    mesh.smooth = geometry.smooth;
    if mesh.smooth || force_smooth {
        smooth_normals(&mut mesh.triangles);
    }
    Ok(mesh)
}
