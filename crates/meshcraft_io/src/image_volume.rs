//! Flat image inputs.
//!
//! A raster image becomes a one-voxel-deep [`Volume`], nearest-resampled so
//! its longer side spans the requested extent. Image row 0 is the top, so
//! voxel row `y` reads image row `height - 1 - y`.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use meshcraft_core::{Rgba, Volume};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::texture::load_rgba;

/// A resampled image viewed as a depth-1 volume.
#[derive(Debug, Clone)]
pub struct ImageVolume {
    image: RgbaImage,
}

impl ImageVolume {
    /// Loads and resamples an image file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or decoded, or has no pixels.
    pub fn load(path: &Path, max_extent: u32) -> MeshResult<Self> {
        let image = load_rgba(path)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(MeshError::EmptyImage {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_image(&image, max_extent))
    }

    /// Resamples decoded pixels. Both sides of `image` must be non-zero.
    #[must_use]
    pub fn from_image(image: &RgbaImage, max_extent: u32) -> Self {
        let (w, h) = fitted_size(image.width(), image.height(), max_extent);
        debug!(
            from_width = image.width(),
            from_height = image.height(),
            width = w,
            height = h,
            "resampling image volume"
        );
        Self {
            image: imageops::resize(image, w, h, FilterType::Nearest),
        }
    }
}

/// Scales `(w, h)` so the longer side becomes `max_extent`, flooring the
/// other and keeping both at least 1.
fn fitted_size(w: u32, h: u32, max_extent: u32) -> (u32, u32) {
    let per_voxel = f64::from(w.max(h)) / f64::from(max_extent.max(1));
    let side = |v: u32| ((f64::from(v) / per_voxel) as u32).max(1);
    (side(w), side(h))
}

impl Volume for ImageVolume {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn depth(&self) -> u32 {
        1
    }

    fn voxel(&self, x: u32, y: u32, z: u32) -> Rgba {
        if z != 0 || x >= self.width() || y >= self.height() {
            return Rgba::TRANSPARENT;
        }
        let [r, g, b, a] = self.image.get_pixel(x, self.height() - 1 - y).0;
        Rgba::new(r, g, b, a)
    }
}
