//! Read-only 3D color sources.

use crate::color::Rgba;

/// A bounded 3D grid of colors.
///
/// Out-of-range coordinates and unwritten cells read as
/// [`Rgba::TRANSPARENT`].
pub trait Volume {
    /// Extent along X.
    fn width(&self) -> u32;

    /// Extent along Y.
    fn height(&self) -> u32;

    /// Extent along Z.
    fn depth(&self) -> u32;

    /// Color of the voxel at `(x, y, z)`.
    fn voxel(&self, x: u32, y: u32, z: u32) -> Rgba;
}

impl<V: Volume + ?Sized> Volume for &V {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn depth(&self) -> u32 {
        (**self).depth()
    }

    fn voxel(&self, x: u32, y: u32, z: u32) -> Rgba {
        (**self).voxel(x, y, z)
    }
}
