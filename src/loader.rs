//! Photograph loading.
//!
//! The loader reads image bytes from disk and decodes them into a pixel
//! grid. It is the only component that touches the filesystem; everything
//! downstream operates on decoded pixels. Failures are terminal for the
//! call: there is no retry and no partial result.

use std::fmt;
use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Terminal failures when reading a photograph.
#[derive(Clone, Debug)]
pub enum LoadError {
    /// The path does not resolve to a readable file.
    NotFound(PathBuf),
    /// The bytes are not a valid or supported image format.
    Decode(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "file not found: {}", path.display()),
            LoadError::Decode(detail) => write!(f, "invalid image: {}", detail),
        }
    }
}

impl std::error::Error for LoadError {}

/// Read and decode the photograph at `path`.
pub fn load(path: &Path) -> Result<DynamicImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|_| LoadError::NotFound(path.to_path_buf()))?;
    image::load_from_memory(&bytes).map_err(|e| LoadError::Decode(e.to_string()))
}
