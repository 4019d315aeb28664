//! # MESHCRAFT Core
//!
//! Turns textured triangle meshes into colored voxel volumes.
//!
//! ## Design Principles
//!
//! 1. **Gap-free**: every line walk advances its dominant axis one cell per step
//! 2. **Conservative**: each fill point splats all 8 surrounding grid corners
//! 3. **Order-free**: a cell's color is the mean of its samples, so write order never matters
//! 4. **Deterministic**: the parallel rasterizer writes exactly what the sequential one does
//!
//! ## Core Components
//!
//! - [`TriangleSet`]: parallel-array mesh storage with shared texture references
//! - [`LineStepper`]: N-dimensional integer-grid line walker
//! - [`Voxelizer`]: scaling policy + triangle rasterizer producing a [`VoxelGrid`]
//! - [`Volume`]: read-only 3D color source consumed by the schematic writer
//! - [`Palette`]: nearest-color block quantizer
//!
//! ## Example
//!
//! ```rust
//! use meshcraft_core::{Point, Triangle, TriangleSet, Volume, Voxelizer, palette::WOOL};
//!
//! let mut mesh = TriangleSet::new();
//! mesh.append(&Triangle::new(
//!     Point::new(0.0, 0.0, 0.0),
//!     Point::new(1.0, 0.0, 0.0),
//!     Point::new(0.0, 1.0, 0.0),
//! ));
//!
//! let grid = Voxelizer::new(8).voxelize(&mesh);
//! assert_eq!((grid.width(), grid.height(), grid.depth()), (8, 8, 1));
//!
//! let block = WOOL.quantize(grid.voxel(0, 0, 0));
//! assert!(!block.is_air());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod line;
pub mod palette;
pub mod progress;
pub mod texture;
pub mod volume;
pub mod voxelize;

pub use color::Rgba;
pub use error::{CoreError, CoreResult};
pub use geometry::{Aabb, Point, Triangle, TriangleSet};
pub use line::LineStepper;
pub use palette::{BlockState, Palette, PaletteEntry, ALPHA_CUTOFF};
pub use progress::{NoProgress, ProgressObserver, Stage};
pub use texture::{TexelBuffer, Texture};
pub use volume::Volume;
pub use voxelize::{GridDims, VoxelGrid, Voxelizer};
