//! Texture sampling.
//!
//! Textures wrap in both directions and are addressed bottom-up: texture
//! row `0` is the last image row. Sampling is nearest-texel only.

use std::fmt;

use crate::color::Rgba;
use crate::error::{CoreError, CoreResult};

/// A 2D color source sampled by textured triangles.
pub trait Texture: Send + Sync + fmt::Debug {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Raw pixel in image space (row 0 is the top row).
    ///
    /// Callers guarantee `x < width()` and `y < height()`.
    fn pixel(&self, x: u32, y: u32) -> Rgba;

    /// Texel at integer texture coordinates.
    ///
    /// Both coordinates wrap modulo the image size; `ty` counts rows from the
    /// bottom. A zero-sized texture is opaque white.
    fn texel(&self, tx: i64, ty: i64) -> Rgba {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Rgba::WHITE;
        }

        let x = tx.rem_euclid(i64::from(w)) as u32;
        let y = ty.rem_euclid(i64::from(h)) as u32;
        self.pixel(x, h - 1 - y)
    }

    /// Nearest texel at normalized texture coordinate `(u, v)`.
    fn color_at(&self, u: f64, v: f64) -> Rgba {
        let tx = (u * f64::from(self.width())).floor();
        let ty = (v * f64::from(self.height())).floor();
        self.texel(tx as i64, ty as i64)
    }
}

/// An in-memory RGBA texture.
#[derive(Clone, PartialEq, Eq)]
pub struct TexelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl TexelBuffer {
    /// Creates a texture from row-major pixels (row 0 at the top).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TexelCountMismatch`] if `pixels.len()` is not
    /// `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> CoreResult<Self> {
        if pixels.len() != width as usize * height as usize {
            return Err(CoreError::TexelCountMismatch {
                width,
                height,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a texture from a packed RGBA8 byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TexelCountMismatch`] if the buffer is not exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> CoreResult<Self> {
        let pixels: &[Rgba] =
            bytemuck::try_cast_slice(bytes).map_err(|_| CoreError::TexelCountMismatch {
                width,
                height,
                got: bytes.len() / 4,
            })?;
        Self::new(width, height, pixels.to_vec())
    }

    /// A 1x1 texture of a single color.
    #[must_use]
    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// All pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

impl fmt::Debug for TexelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TexelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Texture for TexelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.pixels[x as usize + self.width as usize * y as usize]
    }
}
