//! # MESHCRAFT
//!
//! Converts textured OBJ meshes (or flat images) into palette-quantized
//! block schematics.
//!
//! ## Pipeline
//!
//! 1. **Load**: OBJ + MTL + textures, or a raster image
//! 2. **Voxelize**: gap-free triangle rasterization into a sparse color grid
//! 3. **Quantize**: nearest palette entry per voxel, low alpha becomes air
//! 4. **Write**: tagged binary schematic, gzip-wrapped by default
//!
//! ## Example
//!
//! ```rust,no_run
//! use meshcraft::{convert, ConvertConfig};
//!
//! # fn main() -> Result<(), meshcraft::ConvertError> {
//! let config = ConvertConfig {
//!     input: Some("statue.obj".into()),
//!     output: Some("statue.schematic".into()),
//!     max_extent: Some(128),
//!     ..ConvertConfig::default()
//! };
//! let report = convert(&config)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;

pub use config::{ConvertConfig, ConvertJob};
pub use error::{ConvertError, ConvertResult};
pub use pipeline::{convert, convert_with_progress, ConversionReport, InputKind};
pub use progress::LogProgress;

/// Installs `env_logger` as the `log` backend, defaulting to `info`.
///
/// Library events are emitted through `tracing`, which forwards to `log`
/// when no subscriber is set. Safe to call more than once.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // a second init in the same process is not an error worth reporting
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
