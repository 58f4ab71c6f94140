//! Wavefront geometry parsing.
//!
//! Single pass over the text: attribute tables for `v`/`vt`/`vn`, faces
//! resolved immediately into self-contained triangles (n-gons become fans
//! sharing the first corner). Malformed lines are logged and skipped; only
//! an unreadable file is fatal.

use crate::error::AssetError;
use glam::{Vec2, Vec3};
use log::{info, warn};
use std::path::Path;
use termrast_core::Triangle;

/// Parsed geometry: triangle soup plus the smooth-shading request.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub triangles: Vec<Triangle>,
    /// Set by `s 1` / `s on` lines; the last directive wins.
    pub smooth: bool,
}

/// One corner reference from a face token: 1-based indices, 0 = absent.
#[derive(Debug, Clone, Copy, Default)]
struct CornerRef {
    vertex: usize,
    uv: usize,
    normal: usize,
}

/// Parse a face token of the form `i`, `i/t`, `i//n`, or `i/t/n`.
fn parse_corner(token: &str) -> Option<CornerRef> {
    let mut parts = token.split('/');
    let vertex = parts.next()?.parse().ok()?;
    let uv = match parts.next() {
        None | Some("") => 0,
        Some(t) => t.parse().ok()?,
    };
    let normal = match parts.next() {
        None | Some("") => 0,
        Some(n) => n.parse().ok()?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(CornerRef { vertex, uv, normal })
}

fn parse_floats<const N: usize>(rest: &str) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    let mut fields = rest.split_whitespace();
    for slot in &mut out {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(out)
}

/// Load and parse a geometry file.
pub fn load_geometry(path: &Path) -> Result<Geometry, AssetError> {
    let source = std::fs::read_to_string(path)?;
    let geometry = parse_geometry(&source);
    info!(
        "loaded geometry {}{}",
        path.display(),
        if geometry.smooth { " (smooth)" } else { "" }
    );
    Ok(geometry)
}

/// Parse geometry from text. Never fails: bad lines are logged and skipped.
pub fn parse_geometry(source: &str) -> Geometry {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut geometry = Geometry::default();

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match keyword {
            "v" => match parse_floats::<3>(rest) {
                Some([x, y, z]) => positions.push(Vec3::new(x, y, z)),
                None => warn!("line {line_no}: unparsable vertex: {line}"),
            },
            "vt" => match parse_floats::<2>(rest) {
                Some([u, v]) => uvs.push(Vec2::new(u, v)),
                None => warn!("line {line_no}: unparsable uv: {line}"),
            },
            "vn" => match parse_floats::<3>(rest) {
                Some([x, y, z]) => normals.push(Vec3::new(x, y, z)),
                None => warn!("line {line_no}: unparsable normal: {line}"),
            },
            "s" => match rest.trim() {
                "1" | "on" => geometry.smooth = true,
                "0" | "off" => geometry.smooth = false,
                other => warn!("line {line_no}: unknown smooth setting: {other}"),
            },
            "f" => {
                parse_face(rest, line_no, &positions, &uvs, &normals, &mut geometry.triangles)
            }
            // Object/group/material statements carry no geometry.
            _ => {}
        }
    }

    info!(
        "vertices: {}, uvs: {}, normals: {}, triangles: {}",
        positions.len(),
        uvs.len(),
        normals.len(),
        geometry.triangles.len()
    );
    geometry
}

fn parse_face(
    rest: &str,
    line_no: usize,
    positions: &[Vec3],
    uvs: &[Vec2],
    normals: &[Vec3],
    triangles: &mut Vec<Triangle>,
) {
    let mut corners: Vec<CornerRef> = Vec::with_capacity(4);
    for token in rest.split_whitespace() {
        match parse_corner(token) {
            Some(corner) => corners.push(corner),
            None => {
                warn!("line {line_no}: unexpected face token: {token}");
                return;
            }
        }
    }
    if corners.len() < 3 {
        warn!("line {line_no}: incomplete face");
        return;
    }

    // Resolve one corner against the attribute tables. 1-based indices;
    // absent or out-of-range uv/normal fall back to zeros.
    let resolve = |c: &CornerRef| -> Option<(Vec3, Vec2, Vec3)> {
        let pos = *positions.get(c.vertex.checked_sub(1)?)?;
        let uv = c
            .uv
            .checked_sub(1)
            .and_then(|i| uvs.get(i))
            .copied()
            .unwrap_or(Vec2::ZERO);
        let normal = c
            .normal
            .checked_sub(1)
            .and_then(|i| normals.get(i))
            .copied()
            .unwrap_or(Vec3::ZERO);
        Some((pos, uv, normal))
    };

    // Fan triangulation sharing corner 0.
    for i in 1..corners.len() - 1 {
        let fan = [&corners[0], &corners[i], &corners[i + 1]];
        let mut resolved = [(Vec3::ZERO, Vec2::ZERO, Vec3::ZERO); 3];
        let mut ok = true;
        for (slot, corner) in resolved.iter_mut().zip(fan) {
            match resolve(corner) {
                Some(r) => *slot = r,
                None => {
                    warn!("line {line_no}: vertex index {} out of range", corner.vertex);
                    ok = false;
                    break;
                }
            }
        }
        if !ok {
            continue;
        }
        triangles.push(Triangle {
            pos: [resolved[0].0, resolved[1].0, resolved[2].0],
            uv: [resolved[0].1, resolved[1].1, resolved[2].1],
            normal: [resolved[0].2, resolved[1].2, resolved[2].2],
        });
    }
}
