//! # Conversion Pipeline
//!
//! ```text
//! input ──► load (OBJ + MTL, or image) ──► voxelize ──► quantize ──► save
//! ```
//!
//! Image inputs skip voxelization: the resampled image is already a volume.

use std::fmt;
use std::path::{Path, PathBuf};

use meshcraft_core::{Palette, ProgressObserver, Volume, Voxelizer};
use meshcraft_io::{load_obj, load_palette, save_schematic, ImageVolume, Schematic};
use tracing::info;

use crate::config::{ConvertConfig, ConvertJob};
use crate::error::ConvertResult;
use crate::progress::LogProgress;

/// Raster extensions routed to [`ImageVolume`] (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"];

/// How an input file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Wavefront OBJ mesh.
    Mesh,
    /// Flat raster image.
    Image,
}

impl InputKind {
    /// Picks the reader from the file extension. Anything that is not a
    /// known raster extension is treated as OBJ.
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if is_image {
            Self::Image
        } else {
            Self::Mesh
        }
    }
}

/// Summary of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// Where the schematic was written.
    pub output: PathBuf,
    /// Which reader handled the input.
    pub kind: InputKind,
    /// Triangles read; zero for image inputs.
    pub triangles: usize,
    /// Schematic X extent.
    pub width: u16,
    /// Schematic Y extent.
    pub height: u16,
    /// Schematic Z extent.
    pub length: u16,
    /// Blocks that are not air.
    pub non_air_blocks: usize,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}x{}x{} blocks ({} solid",
            self.output.display(),
            self.width,
            self.height,
            self.length,
            self.non_air_blocks
        )?;
        if self.kind == InputKind::Mesh {
            write!(f, ", from {} triangles", self.triangles)?;
        }
        write!(f, ")")
    }
}

/// Runs a conversion, logging progress at 10% steps.
///
/// # Errors
///
/// Fails if the settings are invalid or any stage fails.
pub fn convert(config: &ConvertConfig) -> ConvertResult<ConversionReport> {
    convert_with_progress(&config.resolve()?, &mut LogProgress::default())
}

/// Runs a validated conversion, reporting progress to `observer`.
///
/// # Errors
///
/// Fails if the input, palette or output cannot be handled.
pub fn convert_with_progress(
    job: &ConvertJob,
    observer: &mut dyn ProgressObserver,
) -> ConvertResult<ConversionReport> {
    info!(
        input = %job.input.display(),
        output = %job.output.display(),
        max_extent = job.max_extent,
        "converting"
    );

    let palette = match &job.palette {
        Some(path) => load_palette(path)?,
        None => Palette::default(),
    };

    let kind = InputKind::detect(&job.input);
    let (triangles, schematic) = match kind {
        InputKind::Image => {
            let volume = ImageVolume::load(&job.input, job.max_extent)?;
            (0, write(job, &volume, &palette, observer)?)
        }
        InputKind::Mesh => {
            let mesh = load_obj(&job.input, observer)?;
            let grid = Voxelizer::new(job.max_extent)
                .with_threads(job.threads.unwrap_or(0))
                .voxelize_with_progress(&mesh, observer);
            (mesh.len(), write(job, &grid, &palette, observer)?)
        }
    };

    let report = ConversionReport {
        output: job.output.clone(),
        kind,
        triangles,
        width: schematic.width(),
        height: schematic.height(),
        length: schematic.length(),
        non_air_blocks: schematic.non_air_count(),
    };
    info!("done: {report}");
    Ok(report)
}

fn write<V: Volume + ?Sized>(
    job: &ConvertJob,
    volume: &V,
    palette: &Palette,
    observer: &mut dyn ProgressObserver,
) -> ConvertResult<Schematic> {
    Ok(save_schematic(
        volume,
        palette,
        &job.output,
        job.compression,
        observer,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_input_kind() {
        assert_eq!(InputKind::detect(Path::new("a/statue.obj")), InputKind::Mesh);
        assert_eq!(InputKind::detect(Path::new("logo.PNG")), InputKind::Image);
        assert_eq!(InputKind::detect(Path::new("scan.tiff")), InputKind::Image);
        assert_eq!(InputKind::detect(Path::new("noext")), InputKind::Mesh);
    }

    #[test]
    fn test_report_display() {
        let mut report = ConversionReport {
            output: PathBuf::from("out.schematic"),
            kind: InputKind::Mesh,
            triangles: 12,
            width: 4,
            height: 2,
            length: 3,
            non_air_blocks: 20,
        };
        assert_eq!(
            report.to_string(),
            "out.schematic: 4x2x3 blocks (20 solid, from 12 triangles)"
        );
        report.kind = InputKind::Image;
        assert_eq!(report.to_string(), "out.schematic: 4x2x3 blocks (20 solid)");
    }
}
