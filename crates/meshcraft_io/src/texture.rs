//! Texture loading.

use std::path::Path;

use image::RgbaImage;
use meshcraft_core::TexelBuffer;
use tracing::debug;

use crate::error::{MeshError, MeshResult};

/// Decodes an image file into RGBA8 pixels.
///
/// # Errors
///
/// [`MeshError::Open`] if the file cannot be read, [`MeshError::Image`] if
/// it cannot be decoded.
pub fn load_rgba(path: &Path) -> MeshResult<RgbaImage> {
    let reader = image::ImageReader::open(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let img = reader
        .with_guessed_format()
        .map_err(|source| MeshError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(|source| MeshError::Image {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
    Ok(img.to_rgba8())
}

/// Converts decoded pixels into a sampleable texture.
///
/// # Errors
///
/// Only if the buffer disagrees with its own dimensions.
pub fn texture_from_image(img: &RgbaImage) -> MeshResult<TexelBuffer> {
    Ok(TexelBuffer::from_rgba8(
        img.width(),
        img.height(),
        img.as_raw(),
    )?)
}

/// Loads an image file as a texture.
///
/// # Errors
///
/// See [`load_rgba`].
pub fn load_texture(path: &Path) -> MeshResult<TexelBuffer> {
    texture_from_image(&load_rgba(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshcraft_core::{Rgba, Texture};

    #[test]
    fn test_texture_from_image_keeps_rows() {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let tex = texture_from_image(&img).unwrap();
        assert_eq!(tex.pixel(0, 0), Rgba::new(255, 0, 0, 255));
        // texture row 0 is the bottom image row
        assert_eq!(tex.texel(0, 0), Rgba::new(0, 0, 255, 255));
    }

    #[test]
    fn test_missing_file() {
        let err = load_texture(Path::new("/nonexistent/meshcraft/tex.png")).unwrap_err();
        assert!(matches!(err, MeshError::Open { .. }));
    }
}
