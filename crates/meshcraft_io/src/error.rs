//! # I/O Error Types
//!
//! [`MeshError`] covers everything read from disk before voxelization:
//! OBJ/MTL text, textures, image inputs and palette files.
//! [`SchematicError`] covers the container on the way out and back in.

use std::io;
use std::path::PathBuf;

use meshcraft_core::CoreError;
use meshcraft_nbt::NbtError;
use thiserror::Error;

/// Errors raised while reading meshes, textures, images or palettes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A file could not be opened or read.
    #[error("couldn't read '{}': {source}", path.display())]
    Open {
        /// The file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// A recognized command with bad arguments.
    #[error("{file}:{line}: invalid {command} command: {text}")]
    Syntax {
        /// Source file name.
        file: String,
        /// 1-based line number.
        line: usize,
        /// The command keyword.
        command: String,
        /// The whole offending line.
        text: String,
    },

    /// A command this reader does not understand.
    #[error("{file}:{line}: unsupported OBJ command: {text}")]
    Unsupported {
        /// Source file name.
        file: String,
        /// 1-based line number.
        line: usize,
        /// The whole offending line.
        text: String,
    },

    /// `usemtl` naming a material no loaded library defines.
    #[error("{file}:{line}: no such material: {name}")]
    UnknownMaterial {
        /// Source file name.
        file: String,
        /// 1-based line number.
        line: usize,
        /// The material name.
        name: String,
    },

    /// A face index of zero or past either end of the table.
    #[error("{file}:{line}: invalid OBJ {kind} index: {index} (out of {len})")]
    IndexOutOfBounds {
        /// Source file name.
        file: String,
        /// 1-based line number.
        line: usize,
        /// `"vertex"` or `"texture"`.
        kind: &'static str,
        /// The index as written.
        index: i64,
        /// Entries defined so far.
        len: usize,
    },

    /// An image that could not be decoded.
    #[error("couldn't decode image '{}': {source}", path.display())]
    Image {
        /// The image file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: image::ImageError,
    },

    /// An image with no pixels.
    #[error("image '{}' is empty", path.display())]
    EmptyImage {
        /// The image file.
        path: PathBuf,
    },

    /// A palette file that is not valid TOML or misses fields.
    #[error("couldn't parse palette '{}': {source}", path.display())]
    Palette {
        /// The palette file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: toml::de::Error,
    },

    /// Core validation failure (empty palette, bad texel buffer).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for input loading.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors raised while assembling, writing or reading a schematic.
#[derive(Error, Debug)]
pub enum SchematicError {
    /// A volume axis that does not fit the 16-bit dimension fields.
    #[error("{axis} of {value} does not fit a schematic dimension")]
    DimensionTooLarge {
        /// `"Width"`, `"Height"` or `"Length"`.
        axis: &'static str,
        /// The volume extent.
        value: u32,
    },

    /// A decoded tree that is not a well-formed schematic.
    #[error("malformed schematic: {0}")]
    Malformed(String),

    /// Codec failure.
    #[error(transparent)]
    Nbt(#[from] NbtError),

    /// File or stream failure.
    #[error("schematic I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Result type for schematic operations.
pub type SchematicResult<T> = Result<T, SchematicError>;
