use std::path::PathBuf;

/// Errors that can occur during asset and scene ingestion.
///
/// Only unrecoverable conditions surface here; recoverable ones (duplicate
/// files, missing textures, malformed lines) are logged and patched over
/// with defaults.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// I/O error reading an asset or scene file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mesh folder contains no geometry file.
    #[error("no geometry file found in {dir}")]
    NoGeometry { dir: PathBuf },

    /// Failed to decode a texture image.
    #[error("image decode error for {path}: {message}")]
    ImageDecode { path: PathBuf, message: String },

    /// A scene line referenced a mesh folder that failed to load.
    #[error("scene mesh '{folder}' failed to load: {source}")]
    SceneMesh {
        folder: String,
        #[source]
        source: Box<AssetError>,
    },
}
