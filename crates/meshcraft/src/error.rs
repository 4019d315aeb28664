//! Top-level error type for the conversion pipeline.

use std::io;
use std::path::PathBuf;

use meshcraft_io::{MeshError, SchematicError};
use thiserror::Error;

/// Anything that can stop a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Bad command line; the binary prints usage after this.
    #[error("{0}")]
    Usage(String),

    /// A config file that could not be read.
    #[error("couldn't read config '{}': {source}", path.display())]
    ConfigRead {
        /// The config file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// A config file that is not valid TOML for [`ConvertConfig`](crate::ConvertConfig).
    #[error("couldn't parse config '{}': {source}", path.display())]
    ConfigParse {
        /// The config file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: toml::de::Error,
    },

    /// A setting that is missing or out of range after merging.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Input loading failed.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Schematic assembly or writing failed.
    #[error(transparent)]
    Schematic(#[from] SchematicError),
}

impl ConvertError {
    /// True if the binary should print usage alongside the message.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::Invalid(_))
    }
}

/// Result type for the pipeline.
pub type ConvertResult<T> = Result<T, ConvertError>;
