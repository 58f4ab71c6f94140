//! Texture decoding via the `image` crate.

use crate::error::AssetError;
use glam::Vec3;
use log::warn;
use std::path::Path;
use termrast_core::Texture;

/// Decode an image file into RGB float texels.
pub fn load_texture(path: &Path) -> Result<Texture, AssetError> {
    let img = image::open(path).map_err(|e| AssetError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let texels: Vec<Vec3> = rgb
        .pixels()
        .map(|p| Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32) / 255.0)
        .collect();

    Ok(Texture::new(width, height, texels))
}

/// Decode an image, downgrading failure to a warning and the null texture
/// (which samples white).
pub fn load_texture_or_null(path: &Path) -> Texture {
    match load_texture(path) {
        Ok(tex) => tex,
        Err(e) => {
            warn!("texture load failed, sampling white: {e}");
            Texture::null()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        img.put_pixel(1, 0, image::Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let tex = load_texture(&path).unwrap();
        assert_eq!((tex.width(), tex.height()), (2, 1));
        assert_eq!(tex.sample(0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(1.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn missing_file_degrades_to_null() {
        let tex = load_texture_or_null(Path::new("/nonexistent/tex.png"));
        assert!(tex.is_null());
        assert_eq!(tex.sample(0.5, 0.5), Vec3::ONE);
    }
}
