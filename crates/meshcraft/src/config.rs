//! # Conversion Settings
//!
//! Settings come from an optional TOML file and the command line. Both
//! produce a [`ConvertConfig`] where every field is optional; command-line
//! values are merged over the file with [`ConvertConfig::merge`], then
//! [`ConvertConfig::resolve`] checks the result and yields a [`ConvertJob`].
//!
//! ```toml
//! input = "statue.obj"
//! output = "statue.schematic"
//! max_extent = 128
//! threads = 4
//! palette = "palettes/wool.toml"
//! compression = "gzip"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use meshcraft_core::voxelize::MAX_EXTENT_LIMIT;
use meshcraft_io::Compression;
use serde::Deserialize;

use crate::error::{ConvertError, ConvertResult};

/// Partially specified conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// OBJ or image file to read.
    pub input: Option<PathBuf>,
    /// Schematic file to write.
    pub output: Option<PathBuf>,
    /// Blocks along the longest axis, 1 to 256.
    pub max_extent: Option<u32>,
    /// Rasterizer threads. Unset uses every core.
    pub threads: Option<usize>,
    /// TOML palette table. Unset uses the wool palette.
    pub palette: Option<PathBuf>,
    /// Container wrapping. Unset means gzip.
    pub compression: Option<Compression>,
}

impl ConvertConfig {
    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// [`ConvertError::ConfigParse`] naming `origin`.
    pub fn from_toml_str(src: &str, origin: &Path) -> ConvertResult<Self> {
        toml::from_str(src).map_err(|source| ConvertError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads settings from a TOML file. Relative paths inside the file
    /// resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// [`ConvertError::ConfigRead`] or [`ConvertError::ConfigParse`].
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let src = fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&src, path)?;

        if let Some(dir) = path.parent() {
            for file in [&mut config.input, &mut config.output, &mut config.palette]
                .into_iter()
                .flatten()
            {
                if file.is_relative() {
                    *file = dir.join(&*file);
                }
            }
        }
        Ok(config)
    }

    /// Overlays every setting `overrides` specifies.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            max_extent: overrides.max_extent.or(self.max_extent),
            threads: overrides.threads.or(self.threads),
            palette: overrides.palette.or(self.palette),
            compression: overrides.compression.or(self.compression),
        }
    }

    /// Checks required settings and ranges.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Invalid`] if input or output is missing, the extent
    /// is outside `1..=256`, or threads is zero.
    pub fn resolve(&self) -> ConvertResult<ConvertJob> {
        let input = self
            .input
            .clone()
            .ok_or_else(|| ConvertError::Invalid("no input file given".into()))?;
        let output = self
            .output
            .clone()
            .ok_or_else(|| ConvertError::Invalid("no output file given".into()))?;

        let max_extent = match self.max_extent {
            Some(e @ 1..=MAX_EXTENT_LIMIT) => e,
            Some(e) => {
                return Err(ConvertError::Invalid(format!(
                    "max extent {e} is outside 1-{MAX_EXTENT_LIMIT}"
                )))
            }
            None => return Err(ConvertError::Invalid("no max extent given".into())),
        };

        if self.threads == Some(0) {
            return Err(ConvertError::Invalid("threads must be at least 1".into()));
        }

        Ok(ConvertJob {
            input,
            output,
            max_extent,
            threads: self.threads,
            palette: self.palette.clone(),
            compression: self.compression.unwrap_or_default(),
        })
    }
}

/// Fully specified, validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    /// OBJ or image file to read.
    pub input: PathBuf,
    /// Schematic file to write.
    pub output: PathBuf,
    /// Blocks along the longest axis.
    pub max_extent: u32,
    /// Rasterizer threads; `None` uses every core.
    pub threads: Option<usize>,
    /// TOML palette table, if not the wool default.
    pub palette: Option<PathBuf>,
    /// Container wrapping.
    pub compression: Compression,
}
