//! Scene file loading.
//!
//! Line-oriented text with `[section]` headers: `camera`, `meshes`,
//! `display`, `lights`, `continuous`, `startup`. Unknown sections, verbs,
//! or unparsable lines are logged and skipped; a mesh folder that fails to
//! load is fatal.

use crate::error::AssetError;
use crate::FsAssetLoader;
use glam::Vec3;
use log::{info, warn};
use std::path::Path;
use termrast_core::scene::{Action, Axis, Behavior, BehaviorKind, MeshTarget};
use termrast_core::{math, Display, Light};

/// Load a scene file into the display, resetting it first.
pub fn load_scene(
    display: &mut Display,
    path: &Path,
    loader: &mut FsAssetLoader,
) -> Result<(), AssetError> {
    let source = std::fs::read_to_string(path)?;
    display.reset();

    let mut section = String::new();
    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.to_string();
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match section.as_str() {
            "camera" => camera_line(display, &tokens, line_no),
            "meshes" => mesh_line(display, &tokens, line_no, loader)?,
            "display" => display_line(display, &tokens, line_no),
            "lights" => light_line(display, &tokens, line_no),
            "continuous" => behavior_line(display, &tokens, line_no, BehaviorKind::Continuous),
            "startup" => behavior_line(display, &tokens, line_no, BehaviorKind::Startup),
            other => warn!("line {line_no}: line outside a known section ({other:?})"),
        }
    }

    display.camera.update_rotation();
    info!(
        "loaded scene {}: {} meshes, {} lights, {} behaviors",
        path.display(),
        display.meshes.len(),
        display.lights.len(),
        display.behaviors.len()
    );
    Ok(())
}

fn parse_all<T: std::str::FromStr>(tokens: &[&str]) -> Option<Vec<T>> {
    tokens.iter().map(|t| t.parse().ok()).collect()
}

fn camera_line(display: &mut Display, tokens: &[&str], line_no: usize) {
    match tokens {
        ["position", rest @ ..] => {
            if let Some(v) = parse_all::<f32>(rest).filter(|v| v.len() == 3) {
                display.camera.position = Vec3::new(v[0], v[1], v[2]);
            } else {
                warn!("line {line_no}: bad camera position");
            }
        }
        ["fov", value] => match value.parse() {
            Ok(fov) => display.camera.fov_deg = fov,
            Err(_) => warn!("line {line_no}: bad fov"),
        },
        ["speed", value] => match value.parse() {
            Ok(speed) => display.camera.speed = speed,
            Err(_) => warn!("line {line_no}: bad speed"),
        },
        _ => warn!("line {line_no}: unknown camera setting"),
    }
}

fn mesh_line(
    display: &mut Display,
    tokens: &[&str],
    line_no: usize,
    loader: &mut FsAssetLoader,
) -> Result<(), AssetError> {
    let [folder, numbers @ ..] = tokens else {
        warn!("line {line_no}: empty mesh line");
        return Ok(());
    };
    let Some(v) = parse_all::<f32>(numbers).filter(|v| v.len() == 6) else {
        warn!("line {line_no}: mesh line needs x y z sx sy sz");
        return Ok(());
    };

    let mut mesh =
        loader
            .load_mesh_fatal(folder)
            .map_err(|source| AssetError::SceneMesh {
                folder: folder.to_string(),
                source: Box::new(source),
            })?;
    let transform = math::translate(Vec3::new(v[0], v[1], v[2]))
        * math::scale(Vec3::new(v[3], v[4], v[5]));
    mesh.transform(&transform);
    display.meshes.push(mesh);
    Ok(())
}

fn display_line(display: &mut Display, tokens: &[&str], line_no: usize) {
    match tokens {
        ["background_color", rest @ ..] => {
            if let Some(v) = parse_all::<f32>(rest).filter(|v| v.len() == 3) {
                display.background = Vec3::new(v[0], v[1], v[2]) / 255.0;
            } else {
                warn!("line {line_no}: bad background_color");
            }
        }
        _ => warn!("line {line_no}: unknown display setting"),
    }
}

fn light_line(display: &mut Display, tokens: &[&str], line_no: usize) {
    let Some(v) = parse_all::<f32>(tokens).filter(|v| v.len() == 8) else {
        warn!("line {line_no}: light line needs x y z r g b brightness radius");
        return;
    };
    display.lights.push(Light::new(
        Vec3::new(v[0], v[1], v[2]),
        Vec3::new(v[3], v[4], v[5]) / 255.0,
        v[6],
        v[7],
    ));
}

fn behavior_line(display: &mut Display, tokens: &[&str], line_no: usize, kind: BehaviorKind) {
    match parse_action(tokens) {
        Some(action) => display.behaviors.push(Behavior { kind, action }),
        None => warn!("line {line_no}: unrecognized behavior: {}", tokens.join(" ")),
    }
}

fn parse_axis(token: &str) -> Option<Axis> {
    match token.to_ascii_uppercase().as_str() {
        "X" => Some(Axis::X),
        "Y" => Some(Axis::Y),
        "Z" => Some(Axis::Z),
        _ => None,
    }
}

fn named_target(token: &str) -> MeshTarget {
    if token == "ALL" {
        MeshTarget::All
    } else {
        MeshTarget::Name(token.to_string())
    }
}

/// Parse one behavior verb with its arguments.
pub fn parse_action(tokens: &[&str]) -> Option<Action> {
    match tokens {
        ["rotate", target, axis, degrees] => Some(Action::Rotate {
            target: named_target(target),
            axis: parse_axis(axis)?,
            degrees: degrees.parse().ok()?,
        }),
        ["rotate_id", index, axis, degrees] => Some(Action::Rotate {
            target: MeshTarget::Index(index.parse().ok()?),
            axis: parse_axis(axis)?,
            degrees: degrees.parse().ok()?,
        }),
        ["moveto", name, x, y, z, step] => Some(Action::MoveTo {
            target: MeshTarget::Name(name.to_string()),
            to: parse_vec3(x, y, z)?,
            step: step.parse().ok()?,
        }),
        ["moveto_id", index, x, y, z, step] => Some(Action::MoveTo {
            target: MeshTarget::Index(index.parse().ok()?),
            to: parse_vec3(x, y, z)?,
            step: step.parse().ok()?,
        }),
        ["movetomesh", src, dst, step] => Some(Action::MoveToMesh {
            src: MeshTarget::Name(src.to_string()),
            dst: MeshTarget::Name(dst.to_string()),
            step: step.parse().ok()?,
        }),
        ["movetomesh_id", src, dst, step] => Some(Action::MoveToMesh {
            src: MeshTarget::Index(src.parse().ok()?),
            dst: MeshTarget::Index(dst.parse().ok()?),
            step: step.parse().ok()?,
        }),
        ["scalemesh", index, sx, sy, sz] => Some(Action::ScaleMesh {
            index: index.parse().ok()?,
            factors: parse_vec3(sx, sy, sz)?,
        }),
        ["swaptex", name, path] => Some(Action::SwapTexture {
            target: MeshTarget::Name(name.to_string()),
            path: (*path).into(),
        }),
        ["swaptex_id", index, path] => Some(Action::SwapTexture {
            target: MeshTarget::Index(index.parse().ok()?),
            path: (*path).into(),
        }),
        ["swapmesh", name, folder] => Some(Action::SwapMesh {
            target: MeshTarget::Name(name.to_string()),
            folder: folder.to_string(),
        }),
        ["swapmesh_id", index, folder] => Some(Action::SwapMesh {
            target: MeshTarget::Index(index.parse().ok()?),
            folder: folder.to_string(),
        }),
        ["colorize", index, r, g, b] => Some(Action::Colorize {
            index: index.parse().ok()?,
            color: parse_vec3(r, g, b)? / 255.0,
        }),
        ["loopmesh", index, frame_count] => Some(Action::LoopMesh {
            index: index.parse().ok()?,
            frame_count: frame_count.parse().ok()?,
        }),
        _ => None,
    }
}

fn parse_vec3(x: &str, y: &str, z: &str) -> Option<Vec3> {
    Some(Vec3::new(
        x.parse().ok()?,
        y.parse().ok()?,
        z.parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_verb() {
        let cases: &[&[&str]] = &[
            &["rotate", "ALL", "X", "1"],
            &["rotate", "Cube", "y", "5"],
            &["rotate_id", "0", "Z", "-2.5"],
            &["moveto", "Cube", "1", "2", "3", "0.1"],
            &["moveto_id", "1", "0", "0", "0", "1"],
            &["movetomesh", "a", "b", "0.25"],
            &["movetomesh_id", "0", "1", "0.25"],
            &["scalemesh", "0", "2", "1", "1"],
            &["swaptex", "Cube", "textures/alt.png"],
            &["swaptex_id", "0", "textures/alt.png"],
            &["swapmesh", "Cube", "sphere"],
            &["swapmesh_id", "0", "sphere"],
            &["colorize", "0", "255", "128", "0"],
            &["loopmesh", "0", "12"],
        ];
        for tokens in cases {
            assert!(parse_action(tokens).is_some(), "failed on {tokens:?}");
        }
    }

    #[test]
    fn rotate_all_is_special_cased() {
        let Some(Action::Rotate { target, .. }) = parse_action(&["rotate", "ALL", "Y", "1"])
        else {
            panic!("not a rotate");
        };
        assert_eq!(target, MeshTarget::All);
    }

    #[test]
    fn colorize_normalizes_to_unit_range() {
        let Some(Action::Colorize { color, .. }) =
            parse_action(&["colorize", "0", "255", "0", "127"])
        else {
            panic!("not a colorize");
        };
        assert!((color - Vec3::new(1.0, 0.0, 127.0 / 255.0)).length() < 1e-6);
    }

    #[test]
    fn malformed_verbs_are_rejected() {
        assert!(parse_action(&["rotate", "Cube", "W", "1"]).is_none());
        assert!(parse_action(&["rotate", "Cube", "X"]).is_none());
        assert!(parse_action(&["teleport", "Cube"]).is_none());
        assert!(parse_action(&["scalemesh", "zero", "1", "1", "1"]).is_none());
    }
}
