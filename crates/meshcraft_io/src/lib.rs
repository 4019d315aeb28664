//! # MESHCRAFT I/O
//!
//! Everything that touches files: meshes and textures in, schematics out.
//!
//! ## Core Components
//!
//! - [`load_obj`] / [`ObjReader`]: Wavefront OBJ + MTL into a [`TriangleSet`]
//! - [`load_texture`]: image files as sampleable textures
//! - [`ImageVolume`]: a flat image as a depth-1 [`Volume`]
//! - [`load_palette`]: TOML palette tables
//! - [`Schematic`]: quantized volume plus gzip container save/load
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use meshcraft_core::{palette::WOOL, NoProgress, Voxelizer};
//! use meshcraft_io::{load_obj, save_schematic, Compression};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = load_obj(Path::new("statue.obj"), &mut NoProgress)?;
//! let grid = Voxelizer::new(128).voxelize(&mesh);
//! save_schematic(&grid, &WOOL, Path::new("statue.schematic"), Compression::Gzip, &mut NoProgress)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`TriangleSet`]: meshcraft_core::TriangleSet
//! [`Volume`]: meshcraft_core::Volume

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod image_volume;
pub mod obj;
pub mod palette_file;
pub mod schematic;
pub mod texture;

pub use error::{MeshError, MeshResult, SchematicError, SchematicResult};
pub use image_volume::ImageVolume;
pub use obj::{load_obj, parse_mtl, ObjReader};
pub use palette_file::{load_palette, parse_palette};
pub use schematic::{
    build_schematic, load_schematic, load_tree, read_tree, save_schematic, Compression, Schematic,
};
pub use texture::{load_rgba, load_texture, texture_from_image};
