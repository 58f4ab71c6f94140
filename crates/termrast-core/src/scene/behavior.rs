//! Per-frame scene actions registered by scene files.
//!
//! Each verb from the scene text becomes one [`Action`] variant with typed
//! parameters; dispatch is a match instead of a function-pointer table.
//! Actions that miss (unknown mesh name, out-of-range index, failed reload)
//! are silent no-ops and never abort the frame.

use super::{AssetLoader, Display, Mesh, Texture};
use crate::math;
use glam::{Mat4, Vec3};
use std::path::PathBuf;

/// When a behavior fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    /// Every frame.
    Continuous,
    /// Only while the frame counter is zero.
    Startup,
}

/// How a behavior addresses meshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshTarget {
    All,
    Name(String),
    Index(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn rotation(self, radians: f32) -> Mat4 {
        match self {
            Axis::X => math::rotate_x(radians),
            Axis::Y => math::rotate_y(radians),
            Axis::Z => math::rotate_z(radians),
        }
    }
}

/// One parameterized scene action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rotate mesh(es) around their own centroid.
    Rotate {
        target: MeshTarget,
        axis: Axis,
        degrees: f32,
    },
    /// Step a mesh toward a fixed point along the normalized direction.
    MoveTo {
        target: MeshTarget,
        to: Vec3,
        step: f32,
    },
    /// Step a mesh toward another mesh's centroid.
    MoveToMesh {
        src: MeshTarget,
        dst: MeshTarget,
        step: f32,
    },
    /// Scale a mesh relative to its centroid.
    ScaleMesh { index: usize, factors: Vec3 },
    /// Replace the diffuse texture from an image path.
    SwapTexture { target: MeshTarget, path: PathBuf },
    /// Reload geometry + material from another mesh folder, in place.
    SwapMesh { target: MeshTarget, folder: String },
    /// Replace the diffuse texture with a 128x128 solid color.
    Colorize { index: usize, color: Vec3 },
    /// Cycle through geometry variants `<name>1.obj .. <name>N.obj`.
    LoopMesh { index: usize, frame_count: u32 },
}

/// A registered action with its firing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    pub kind: BehaviorKind,
    pub action: Action,
}

/// Run all registered behaviors for the current frame, in registration
/// order. Startup behaviors fire only while `frame_count == 0`.
pub fn run_behaviors(display: &mut Display, loader: &mut dyn AssetLoader) {
    // Behaviors never edit the behavior list, so take it out while the
    // actions mutate the rest of the display.
    let behaviors = std::mem::take(&mut display.behaviors);
    for behavior in &behaviors {
        match behavior.kind {
            BehaviorKind::Startup if display.frame_count != 0 => continue,
            _ => apply(&behavior.action, display, loader),
        }
    }
    display.behaviors = behaviors;
}

fn resolve(target: &MeshTarget, display: &Display) -> Option<usize> {
    match target {
        MeshTarget::All => None,
        MeshTarget::Name(name) => display.mesh_index(name),
        MeshTarget::Index(i) if *i < display.meshes.len() => Some(*i),
        MeshTarget::Index(_) => None,
    }
}

fn apply(action: &Action, display: &mut Display, loader: &mut dyn AssetLoader) {
    match action {
        Action::Rotate {
            target,
            axis,
            degrees,
        } => {
            let m = axis.rotation(degrees.to_radians());
            match target {
                MeshTarget::All => {
                    for mesh in &mut display.meshes {
                        mesh.transform_about_centroid(&m);
                    }
                }
                other => {
                    if let Some(i) = resolve(other, display) {
                        display.meshes[i].transform_about_centroid(&m);
                    }
                }
            }
        }
        Action::MoveTo { target, to, step } => {
            if let Some(i) = resolve(target, display) {
                step_toward(&mut display.meshes[i], *to, *step);
            }
        }
        Action::MoveToMesh { src, dst, step } => {
            let (Some(si), Some(di)) = (resolve(src, display), resolve(dst, display)) else {
                return;
            };
            if si == di {
                return;
            }
            let goal = display.meshes[di].centroid();
            step_toward(&mut display.meshes[si], goal, *step);
        }
        Action::ScaleMesh { index, factors } => {
            if let Some(mesh) = display.meshes.get_mut(*index) {
                mesh.transform_about_centroid(&math::scale(*factors));
            }
        }
        Action::SwapTexture { target, path } => {
            let Some(i) = resolve(target, display) else {
                return;
            };
            if let Some(tex) = loader.load_texture(path) {
                display.meshes[i].material.diffuse_map = tex;
            }
        }
        Action::SwapMesh { target, folder } => {
            let Some(i) = resolve(target, display) else {
                return;
            };
            if let Some(mesh) = loader.load_mesh(folder) {
                display.meshes[i] = mesh;
            }
        }
        Action::Colorize { index, color } => {
            if let Some(mesh) = display.meshes.get_mut(*index) {
                mesh.material.diffuse_map = Texture::solid(128, 128, *color);
            }
        }
        Action::LoopMesh { index, frame_count } => {
            if *frame_count == 0 {
                return;
            }
            let Some(mesh) = display.meshes.get(*index) else {
                return;
            };
            let n = (display.frame_count % u64::from(*frame_count)) as u32 + 1;
            let name = mesh.name.clone();
            if let Some(variant) = loader.load_mesh_variant(&name, n) {
                let mesh = &mut display.meshes[*index];
                mesh.triangles = variant.triangles;
                mesh.smooth = variant.smooth;
            }
        }
    }
}

/// Translate a mesh by `step` along the normalized direction toward `goal`.
fn step_toward(mesh: &mut Mesh, goal: Vec3, step: f32) {
    let dir = math::normalize_safe(goal - mesh.centroid());
    mesh.transform(&math::translate(dir * step));
}
