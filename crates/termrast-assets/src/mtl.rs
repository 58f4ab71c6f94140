//! Wavefront material parsing.
//!
//! Produces plain records; texture paths are resolved and decoded by the
//! folder loader so the parser stays filesystem-free.

use glam::Vec3;
use log::warn;

/// One `newmtl` record with standard defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    pub name: String,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    /// `d`: 1 = opaque, 0 = dissolved to background.
    pub opacity: f32,
    pub illum: i32,
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub normal_map: Option<String>,
}

impl MaterialRecord {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            shininess: 32.0,
            opacity: 1.0,
            illum: 2,
            diffuse_map: None,
            specular_map: None,
            normal_map: None,
        }
    }
}

/// Parse every material record in the text. Lines before the first
/// `newmtl` and unrecognized keys are ignored; unparsable values keep the
/// record's current value with a warning.
pub fn parse_materials(source: &str) -> Vec<MaterialRecord> {
    let mut records: Vec<MaterialRecord> = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        if keyword == "newmtl" {
            records.push(MaterialRecord::new(rest));
            continue;
        }
        let Some(record) = records.last_mut() else {
            continue;
        };

        match keyword {
            "Ka" => parse_color(rest, line_no, &mut record.ambient),
            "Kd" => parse_color(rest, line_no, &mut record.diffuse),
            "Ks" => parse_color(rest, line_no, &mut record.specular),
            "Ns" => parse_scalar(rest, line_no, &mut record.shininess),
            "d" => parse_scalar(rest, line_no, &mut record.opacity),
            "illum" => {
                match rest.parse() {
                    Ok(v) => record.illum = v,
                    Err(_) => warn!("line {line_no}: unparsable illum: {rest}"),
                }
            }
            "map_Kd" => record.diffuse_map = Some(rest.to_string()),
            "map_Ks" => record.specular_map = Some(rest.to_string()),
            "map_Bump" => record.normal_map = Some(rest.to_string()),
            _ => {}
        }
    }

    records
}

fn parse_color(rest: &str, line_no: usize, out: &mut Vec3) {
    let mut fields = rest.split_whitespace().map(str::parse::<f32>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(r)), Some(Ok(g)), Some(Ok(b))) => *out = Vec3::new(r, g, b),
        _ => warn!("line {line_no}: unparsable color: {rest}"),
    }
}

fn parse_scalar(rest: &str, line_no: usize, out: &mut f32) {
    match rest.split_whitespace().next().map(str::parse::<f32>) {
        Some(Ok(v)) => *out = v,
        _ => warn!("line {line_no}: unparsable value: {rest}"),
    }
}
