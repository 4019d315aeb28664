//! TOML palette tables.
//!
//! ```toml
//! [[entries]]
//! color = "#f9fffe"
//! block = 35
//! data = 0
//! ```
//!
//! Rows keep file order; on equal distance the earlier row wins.

use std::fs;
use std::path::Path;

use meshcraft_core::palette::PaletteFile;
use meshcraft_core::Palette;
use tracing::info;

use crate::error::{MeshError, MeshResult};

/// Reads a palette table from disk.
///
/// # Errors
///
/// [`MeshError::Open`] if unreadable, [`MeshError::Palette`] if the TOML is
/// malformed, [`MeshError::Core`] if it has no entries.
pub fn load_palette(path: &Path) -> MeshResult<Palette> {
    let src = fs::read_to_string(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let palette = parse_palette(&src, path)?;
    info!(path = %path.display(), entries = palette.len(), "loaded palette");
    Ok(palette)
}

/// Parses palette TOML. `origin` is only used in error messages.
///
/// # Errors
///
/// See [`load_palette`].
pub fn parse_palette(src: &str, origin: &Path) -> MeshResult<Palette> {
    let file: PaletteFile = toml::from_str(src).map_err(|source| MeshError::Palette {
        path: origin.to_path_buf(),
        source,
    })?;
    Ok(Palette::try_from(file)?)
}
