//! # Voxelization Engine
//!
//! Scales a [`TriangleSet`] into a fixed-size grid and rasterizes every
//! triangle into it.
//!
//! ## Parallelism
//!
//! With more than one thread the grid is split into disjoint z-slabs. Every
//! worker walks every triangle but only keeps splats that land in its own
//! slab, so no cell is shared and no locking is needed. Each cell sees the
//! same samples in the same order as the sequential path.

mod grid;
mod raster;

pub use grid::{GridDims, VoxelGrid};

use std::num::NonZeroUsize;
use std::thread;

use crossbeam_channel::unbounded;
use tracing::debug;

use crate::geometry::{Triangle, TriangleSet};
use crate::progress::{NoProgress, ProgressObserver, Stage};

/// Triangles between progress reports.
const PROGRESS_BATCH: usize = 64;

/// Largest accepted grid edge.
pub const MAX_EXTENT_LIMIT: u32 = 256;

/// Converts triangle meshes into [`VoxelGrid`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxelizer {
    max_extent: u32,
    threads: usize,
}

impl Voxelizer {
    /// Creates a single-threaded voxelizer whose longest grid edge is
    /// `max_extent` cells (at least 1).
    #[must_use]
    pub fn new(max_extent: u32) -> Self {
        Self {
            max_extent: max_extent.max(1),
            threads: 1,
        }
    }

    /// Sets the worker count; 0 means one per available core.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = if threads == 0 {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            threads
        };
        self
    }

    /// Longest grid edge in cells.
    #[must_use]
    pub const fn max_extent(&self) -> u32 {
        self.max_extent
    }

    /// Worker thread count.
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Voxelizes `mesh` without progress reporting.
    #[must_use]
    pub fn voxelize(&self, mesh: &TriangleSet) -> VoxelGrid {
        self.voxelize_with_progress(mesh, &mut NoProgress)
    }

    /// Voxelizes `mesh`, reporting per-triangle progress to `observer`.
    ///
    /// The observer is always called on the current thread.
    pub fn voxelize_with_progress(
        &self,
        mesh: &TriangleSet,
        observer: &mut dyn ProgressObserver,
    ) -> VoxelGrid {
        let bounds = mesh.bounds();
        let dims = GridDims::fit(&bounds, self.max_extent);
        let (sx, sy, sz) = dims.scale_factors(&bounds);
        let origin = bounds.min_corner();

        debug!(
            width = dims.width,
            height = dims.height,
            depth = dims.depth,
            triangles = mesh.len(),
            "fitted voxel grid"
        );

        let triangles: Vec<Triangle> = mesh
            .iter()
            .map(|tri| (tri - origin).scaled(sx, sy, sz))
            .collect();

        let mut grid = VoxelGrid::new(dims);
        let workers = self.threads.min(dims.depth as usize);

        if workers <= 1 || triangles.is_empty() {
            rasterize_sequential(&triangles, &mut grid, observer);
        } else {
            rasterize_parallel(&triangles, &mut grid, workers, observer);
        }

        debug!(
            occupied = grid.occupied_cells(),
            samples = grid.sample_count(),
            "voxelization finished"
        );
        grid
    }
}

impl Default for Voxelizer {
    fn default() -> Self {
        Self::new(MAX_EXTENT_LIMIT)
    }
}

fn rasterize_sequential(
    triangles: &[Triangle],
    grid: &mut VoxelGrid,
    observer: &mut dyn ProgressObserver,
) {
    let total = triangles.len();
    let mut slab = grid.slab_mut();

    for (i, tri) in triangles.iter().enumerate() {
        raster::rasterize(tri, &mut slab);
        let done = i + 1;
        if done % PROGRESS_BATCH == 0 || done == total {
            observer.on_progress(Stage::Voxelizing, done, total);
        }
    }
}

fn rasterize_parallel(
    triangles: &[Triangle],
    grid: &mut VoxelGrid,
    workers: usize,
    observer: &mut dyn ProgressObserver,
) {
    let total = triangles.len();
    let slabs = grid.slabs_mut(workers);
    let slab_count = slabs.len();
    let (tx, rx) = unbounded::<usize>();

    debug!(slabs = slab_count, "rasterizing in parallel");

    thread::scope(|scope| {
        for mut slab in slabs {
            let tx = tx.clone();
            scope.spawn(move || {
                let mut pending = 0;
                for tri in triangles {
                    if raster::touches(tri, &slab) {
                        raster::rasterize(tri, &mut slab);
                    }
                    pending += 1;
                    if pending == PROGRESS_BATCH {
                        // The receiver outlives every worker inside this scope.
                        let _ = tx.send(pending);
                        pending = 0;
                    }
                }
                if pending > 0 {
                    let _ = tx.send(pending);
                }
            });
        }
        drop(tx);

        let mut done = 0;
        for n in rx {
            done += n;
            observer.on_progress(Stage::Voxelizing, done / slab_count, total);
        }
    });
}
