//! RGBA colors.
//!
//! `Rgba` is `Pod` so decoded RGBA8 image buffers can be viewed as `&[Rgba]`
//! without copying.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An 8-bit-per-channel RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black. Marks a voxel that was never written.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque white. Color of untextured triangles.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff, 0xff);

    /// Creates a color from its four channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a packed `0xRRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 0xff,
        }
    }

    /// Squared Euclidean distance in RGB space. Alpha is ignored.
    #[inline]
    #[must_use]
    pub const fn distance_sq(self, other: Self) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Per-channel arithmetic mean, truncated toward zero.
    ///
    /// An empty slice averages to [`Rgba::TRANSPARENT`].
    #[must_use]
    pub fn average(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return Self::TRANSPARENT;
        }

        let mut sums = [0u64; 4];
        for c in samples {
            sums[0] += u64::from(c.r);
            sums[1] += u64::from(c.g);
            sums[2] += u64::from(c.b);
            sums[3] += u64::from(c.a);
        }

        let n = samples.len() as u64;
        Self::new(
            (sums[0] / n) as u8,
            (sums[1] / n) as u8,
            (sums[2] / n) as u8,
            (sums[3] / n) as u8,
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = CoreError;

    /// Parses `#rrggbb` (opaque) or `#rrggbbaa`. The `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let invalid = || CoreError::InvalidColor(s.to_string());

        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Rgba {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}
