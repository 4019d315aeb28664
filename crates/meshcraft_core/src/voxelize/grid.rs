//! Sparse color-sample grid.
//!
//! One flat arena of `width * height * depth` slots, indexed as
//! `x + w*y + w*h*z`. A slot stays `None` until its first sample arrives.
//! Because whole z-planes are contiguous, the arena splits into disjoint
//! z-slabs that worker threads can fill without locking.

use crate::color::Rgba;
use crate::geometry::Aabb;
use crate::volume::Volume;

/// Grid dimensions. Every axis is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    /// Cells along X.
    pub width: u32,
    /// Cells along Y.
    pub height: u32,
    /// Cells along Z.
    pub depth: u32,
}

impl GridDims {
    /// Creates dimensions, raising any zero axis to 1.
    #[must_use]
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            depth: depth.max(1),
        }
    }

    /// Fits a grid to `bounds` so the longest axis spans `max_extent` cells.
    ///
    /// The other axes keep their aspect ratio, floored, and never drop below
    /// one cell. On ties Y wins over Z, and Z over X. A box with no extent
    /// gets a single cell.
    #[must_use]
    pub fn fit(bounds: &Aabb, max_extent: u32) -> Self {
        let max_extent = max_extent.max(1);
        let (cx, cy, cz) = (bounds.width(), bounds.height(), bounds.depth());

        if !(cx > 0.0 || cy > 0.0 || cz > 0.0) {
            return Self::new(1, 1, 1);
        }

        let e = f64::from(max_extent);
        let derive = |extent: f64, longest: f64| (e * (extent / longest)) as u32;

        if cx > cy && cx > cz {
            Self::new(max_extent, derive(cy, cx), derive(cz, cx))
        } else if cz > cy {
            Self::new(derive(cx, cz), derive(cy, cz), max_extent)
        } else {
            Self::new(derive(cx, cy), max_extent, derive(cz, cy))
        }
    }

    /// Per-axis factors mapping `bounds` (after translation to the origin)
    /// onto cell indices `[0, dim - 1]`. Flat axes get factor 0.
    #[must_use]
    pub fn scale_factors(&self, bounds: &Aabb) -> (f64, f64, f64) {
        (
            axis_scale(self.width, bounds.width()),
            axis_scale(self.height, bounds.height()),
            axis_scale(self.depth, bounds.depth()),
        )
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Cells in one z-plane.
    #[inline]
    #[must_use]
    pub const fn plane_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear index of `(x, y, z)`, or `None` if out of range.
    #[inline]
    #[must_use]
    pub const fn index(&self, x: u32, y: u32, z: u32) -> Option<usize> {
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(x as usize + self.width as usize * y as usize + self.plane_len() * z as usize)
    }
}

fn axis_scale(dim: u32, extent: f64) -> f64 {
    if extent > 0.0 {
        f64::from(dim - 1) / extent
    } else {
        0.0
    }
}

type Cell = Option<Vec<Rgba>>;

/// Sparse grid of accumulated color samples.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    dims: GridDims,
    cells: Vec<Cell>,
}

impl VoxelGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![None; dims.cell_count()],
        }
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Appends a sample to cell `(x, y, z)`.
    ///
    /// Returns false (and stores nothing) if the cell is out of range.
    pub fn splat(&mut self, x: u32, y: u32, z: u32, color: Rgba) -> bool {
        match self.dims.index(x, y, z) {
            Some(i) => {
                self.cells[i].get_or_insert_with(Vec::new).push(color);
                true
            }
            None => false,
        }
    }

    /// Samples accumulated in cell `(x, y, z)`.
    #[must_use]
    pub fn samples(&self, x: u32, y: u32, z: u32) -> &[Rgba] {
        self.dims
            .index(x, y, z)
            .and_then(|i| self.cells[i].as_deref())
            .unwrap_or(&[])
    }

    /// Returns true if cell `(x, y, z)` has at least one sample.
    #[must_use]
    pub fn is_occupied(&self, x: u32, y: u32, z: u32) -> bool {
        !self.samples(x, y, z).is_empty()
    }

    /// Number of cells holding at least one sample.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Total samples across all cells.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.cells.iter().flatten().map(Vec::len).sum()
    }

    /// A writable view over the whole grid.
    pub(crate) fn slab_mut(&mut self) -> GridSlab<'_> {
        GridSlab {
            dims: self.dims,
            z_start: 0,
            z_end: self.dims.depth,
            cells: &mut self.cells,
        }
    }

    /// Splits the grid into at most `count` disjoint z-slabs.
    pub(crate) fn slabs_mut(&mut self, count: usize) -> Vec<GridSlab<'_>> {
        let dims = self.dims;
        let depth = dims.depth as usize;
        let slab_depth = depth.div_ceil(count.clamp(1, depth));

        self.cells
            .chunks_mut(dims.plane_len() * slab_depth)
            .enumerate()
            .map(|(i, cells)| {
                let z_start = (i * slab_depth) as u32;
                GridSlab {
                    dims,
                    z_start,
                    z_end: (z_start as usize + slab_depth).min(depth) as u32,
                    cells,
                }
            })
            .collect()
    }
}

impl Volume for VoxelGrid {
    fn width(&self) -> u32 {
        self.dims.width
    }

    fn height(&self) -> u32 {
        self.dims.height
    }

    fn depth(&self) -> u32 {
        self.dims.depth
    }

    fn voxel(&self, x: u32, y: u32, z: u32) -> Rgba {
        Rgba::average(self.samples(x, y, z))
    }
}

/// Mutable view over the z-planes `[z_start, z_end)` of a grid.
///
/// Splats outside the slab are dropped; another slab owns them.
pub(crate) struct GridSlab<'a> {
    dims: GridDims,
    z_start: u32,
    z_end: u32,
    cells: &'a mut [Cell],
}

impl GridSlab<'_> {
    pub(crate) const fn dims(&self) -> GridDims {
        self.dims
    }

    /// True if any plane in `[z_min, z_max]` belongs to this slab.
    pub(crate) const fn overlaps(&self, z_min: u32, z_max: u32) -> bool {
        z_max >= self.z_start && z_min < self.z_end
    }

    /// Appends `color` to the 8 cells at the floor/ceil corners around
    /// `(x, y, z)`, each clamped into the grid.
    pub(crate) fn splat_corners(&mut self, x: f64, y: f64, z: f64, color: Rgba) {
        let d = self.dims;
        let xs = [clamp_cell(x.floor(), d.width), clamp_cell(x.ceil(), d.width)];
        let ys = [clamp_cell(y.floor(), d.height), clamp_cell(y.ceil(), d.height)];
        let zs = [clamp_cell(z.floor(), d.depth), clamp_cell(z.ceil(), d.depth)];

        for &cx in &xs {
            for &cy in &ys {
                for &cz in &zs {
                    if cz < self.z_start || cz >= self.z_end {
                        continue;
                    }
                    let i = cx as usize
                        + d.width as usize * cy as usize
                        + d.plane_len() * (cz - self.z_start) as usize;
                    self.cells[i].get_or_insert_with(Vec::new).push(color);
                }
            }
        }
    }
}

/// Clamps a whole-number coordinate into `[0, dim - 1]`. NaN maps to 0.
#[inline]
pub(crate) fn clamp_cell(v: f64, dim: u32) -> u32 {
    if v > 0.0 {
        (v as u64).min(u64::from(dim - 1)) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn test_fit_longest_axis() {
        let bounds = Aabb::new([0.0, 0.0, 0.0], [10.0, 5.0, 2.5]);
        assert_eq!(GridDims::fit(&bounds, 100), GridDims::new(100, 50, 25));

        let bounds = Aabb::new([0.0, 0.0, 0.0], [1.0, 2.0, 8.0]);
        assert_eq!(GridDims::fit(&bounds, 16), GridDims::new(2, 4, 16));

        let bounds = Aabb::new([-3.0, -3.0, 0.0], [-2.0, 1.0, 1.0]);
        assert_eq!(GridDims::fit(&bounds, 16), GridDims::new(4, 16, 4));
    }

    #[test]
    fn test_fit_floors_to_one() {
        let bounds = Aabb::new([0.0, 0.0, 0.0], [100.0, 1.0, 0.0]);
        assert_eq!(GridDims::fit(&bounds, 10), GridDims::new(10, 1, 1));
    }

    #[test]
    fn test_fit_tie_prefers_height() {
        let bounds = Aabb::new([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        assert_eq!(GridDims::fit(&bounds, 2), GridDims::new(2, 2, 1));
    }

    #[test]
    fn test_fit_empty_box() {
        let bounds = Aabb::new([4.0, 4.0, 4.0], [4.0, 4.0, 4.0]);
        assert_eq!(GridDims::fit(&bounds, 64), GridDims::new(1, 1, 1));
    }

    #[test]
    fn test_scale_factors() {
        let bounds = Aabb::new([0.0, 0.0, 0.0], [10.0, 5.0, 0.0]);
        let dims = GridDims::fit(&bounds, 11);
        assert_eq!(dims, GridDims::new(11, 5, 1));
        let (sx, sy, sz) = dims.scale_factors(&bounds);
        assert!((sx - 1.0).abs() < 1e-12);
        assert!((sy - 0.8).abs() < 1e-12);
        assert_eq!(sz, 0.0);
    }

    #[test]
    fn test_index_formula() {
        let dims = GridDims::new(4, 3, 2);
        assert_eq!(dims.index(0, 0, 0), Some(0));
        assert_eq!(dims.index(3, 0, 0), Some(3));
        assert_eq!(dims.index(0, 1, 0), Some(4));
        assert_eq!(dims.index(0, 0, 1), Some(12));
        assert_eq!(dims.index(3, 2, 1), Some(23));
        assert_eq!(dims.index(4, 0, 0), None);
        assert_eq!(dims.cell_count(), 24);
    }

    #[test]
    fn test_empty_cell_resolves_transparent() {
        let grid = VoxelGrid::new(GridDims::new(2, 2, 2));
        assert_eq!(grid.voxel(1, 1, 1), Rgba::TRANSPARENT);
        assert_eq!(grid.voxel(9, 9, 9), Rgba::TRANSPARENT);
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_splat_and_resolve() {
        let mut grid = VoxelGrid::new(GridDims::new(2, 2, 2));
        assert!(grid.splat(1, 0, 1, RED));
        assert!(grid.splat(1, 0, 1, Rgba::new(0, 0, 255, 255)));
        assert!(!grid.splat(2, 0, 0, RED));

        assert_eq!(grid.samples(1, 0, 1).len(), 2);
        assert_eq!(grid.voxel(1, 0, 1), Rgba::new(127, 0, 127, 255));
        assert_eq!(grid.occupied_cells(), 1);
        assert_eq!(grid.sample_count(), 2);
    }

    #[test]
    fn test_splat_corners_integer_point_hits_one_cell() {
        let mut grid = VoxelGrid::new(GridDims::new(3, 3, 3));
        grid.slab_mut().splat_corners(1.0, 2.0, 0.0, RED);
        assert_eq!(grid.occupied_cells(), 1);
        assert_eq!(grid.samples(1, 2, 0).len(), 8);
    }

    #[test]
    fn test_splat_corners_fractional_point_hits_eight_cells() {
        let mut grid = VoxelGrid::new(GridDims::new(3, 3, 3));
        grid.slab_mut().splat_corners(0.5, 1.5, 1.2, RED);
        assert_eq!(grid.occupied_cells(), 8);
        assert!(grid.is_occupied(0, 1, 1));
        assert!(grid.is_occupied(1, 2, 2));
    }

    #[test]
    fn test_splat_corners_clamps() {
        let mut grid = VoxelGrid::new(GridDims::new(2, 2, 1));
        grid.slab_mut().splat_corners(-3.5, 7.2, f64::NAN, RED);
        assert_eq!(grid.occupied_cells(), 1);
        assert!(grid.is_occupied(0, 1, 0));
    }

    #[test]
    fn test_slabs_partition_depth() {
        let mut grid = VoxelGrid::new(GridDims::new(2, 2, 5));
        let slabs = grid.slabs_mut(2);
        assert_eq!(slabs.len(), 2);
        assert_eq!((slabs[0].z_start, slabs[0].z_end), (0, 3));
        assert_eq!((slabs[1].z_start, slabs[1].z_end), (3, 5));
        assert!(slabs[1].overlaps(0, 3));
        assert!(!slabs[1].overlaps(0, 2));
    }

    #[test]
    fn test_slab_drops_foreign_planes() {
        let mut grid = VoxelGrid::new(GridDims::new(1, 1, 4));
        {
            let mut slabs = grid.slabs_mut(4);
            slabs[2].splat_corners(0.0, 0.0, 1.5, RED);
        }
        assert!(!grid.is_occupied(0, 0, 1));
        assert!(grid.is_occupied(0, 0, 2));
    }
}
