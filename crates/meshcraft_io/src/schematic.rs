//! # Schematic Assembly
//!
//! Quantizes a [`Volume`] against a [`Palette`] and lays the result out as
//! the classic schematic compound:
//!
//! ```text
//! Schematic (compound)
//! ├── Width, Length, Height   i16   (Length is the Z extent)
//! ├── Materials               "Alpha"
//! ├── Blocks, Data            byte arrays, Y outer / Z middle / X inner
//! └── Entities, TileEntities  empty lists of compounds
//! ```
//!
//! Containers are gzip-compressed on disk by default; [`Schematic::read_from`]
//! recognizes either form by the gzip magic bytes.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use meshcraft_core::{BlockState, Palette, ProgressObserver, Stage, Volume};
use meshcraft_nbt::{List, NamedTag, Payload, TagId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SchematicError, SchematicResult};

/// Root tag name.
pub const ROOT_NAME: &str = "Schematic";

/// Value of the `Materials` field.
pub const MATERIALS: &str = "Alpha";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// On-disk wrapping of the encoded tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Gzip stream.
    #[default]
    Gzip,
    /// Raw tag bytes.
    None,
}

/// A quantized block volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    width: u16,
    height: u16,
    length: u16,
    blocks: Vec<u8>,
    data: Vec<u8>,
}

fn axis(name: &'static str, value: u32) -> SchematicResult<u16> {
    i16::try_from(value)
        .ok()
        .and_then(|v| u16::try_from(v).ok())
        .ok_or(SchematicError::DimensionTooLarge { axis: name, value })
}

impl Schematic {
    /// Quantizes every voxel of `volume`, one Y layer at a time.
    ///
    /// Reports [`Stage::Writing`] progress per layer. The volume is read
    /// exactly once per voxel.
    ///
    /// # Errors
    ///
    /// [`SchematicError::DimensionTooLarge`] if an axis exceeds `i16::MAX`.
    pub fn from_volume<V: Volume + ?Sized>(
        volume: &V,
        palette: &Palette,
        observer: &mut dyn ProgressObserver,
    ) -> SchematicResult<Self> {
        let width = axis("Width", volume.width())?;
        let height = axis("Height", volume.height())?;
        let length = axis("Length", volume.depth())?;

        let cells = usize::from(width) * usize::from(height) * usize::from(length);
        let mut blocks = Vec::with_capacity(cells);
        let mut data = Vec::with_capacity(cells);

        observer.on_progress(Stage::Writing, 0, usize::from(height));
        for y in 0..u32::from(height) {
            for z in 0..u32::from(length) {
                for x in 0..u32::from(width) {
                    let state = palette.quantize(volume.voxel(x, y, z));
                    blocks.push(state.id);
                    data.push(state.data);
                }
            }
            observer.on_progress(Stage::Writing, y as usize + 1, usize::from(height));
        }

        debug!(width, height, length, "quantized volume");
        Ok(Self {
            width,
            height,
            length,
            blocks,
            data,
        })
    }

    /// X extent.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Y extent.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Z extent.
    #[must_use]
    pub const fn length(&self) -> u16 {
        self.length
    }

    /// Block ids in Y / Z / X order.
    #[must_use]
    pub fn blocks(&self) -> &[u8] {
        &self.blocks
    }

    /// Block data in the same order as [`Schematic::blocks`].
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Block at `(x, y, z)`, or `None` outside the volume.
    #[must_use]
    pub fn block_at(&self, x: u16, y: u16, z: u16) -> Option<BlockState> {
        if x >= self.width || y >= self.height || z >= self.length {
            return None;
        }
        let (w, l) = (usize::from(self.width), usize::from(self.length));
        let i = (usize::from(y) * l + usize::from(z)) * w + usize::from(x);
        Some(BlockState::new(self.blocks[i], self.data[i]))
    }

    /// Number of blocks that are not air.
    #[must_use]
    pub fn non_air_count(&self) -> usize {
        self.blocks.iter().filter(|&&id| id != BlockState::AIR.id).count()
    }

    /// Builds the root compound.
    #[must_use]
    pub fn to_tag(&self) -> NamedTag {
        let dim = |v: u16| Payload::Short(v as i16);
        NamedTag::compound(
            ROOT_NAME,
            vec![
                NamedTag::new("Width", dim(self.width)),
                NamedTag::new("Length", dim(self.length)),
                NamedTag::new("Height", dim(self.height)),
                NamedTag::new("Materials", Payload::String(MATERIALS.to_string())),
                NamedTag::new("Blocks", Payload::ByteArray(self.blocks.clone())),
                NamedTag::new("Data", Payload::ByteArray(self.data.clone())),
                NamedTag::new("Entities", Payload::List(List::empty(TagId::Compound))),
                NamedTag::new("TileEntities", Payload::List(List::empty(TagId::Compound))),
            ],
        )
    }

    /// Reads a schematic back out of a decoded tree.
    ///
    /// # Errors
    ///
    /// [`SchematicError::Malformed`] if a dimension or array is missing,
    /// negative, or the arrays disagree with the dimensions.
    pub fn from_tag(tag: &NamedTag) -> SchematicResult<Self> {
        if tag.payload.as_compound().is_none() {
            return Err(SchematicError::Malformed(format!(
                "root '{}' is not a compound",
                tag.name
            )));
        }

        let dim = |name: &str| -> SchematicResult<u16> {
            let v = tag
                .get(name)
                .and_then(Payload::as_short)
                .ok_or_else(|| SchematicError::Malformed(format!("missing {name}")))?;
            u16::try_from(v).map_err(|_| SchematicError::Malformed(format!("negative {name}: {v}")))
        };
        let bytes = |name: &str| -> SchematicResult<Vec<u8>> {
            tag.get(name)
                .and_then(Payload::as_byte_array)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| SchematicError::Malformed(format!("missing {name}")))
        };

        let (width, height, length) = (dim("Width")?, dim("Height")?, dim("Length")?);
        let (blocks, data) = (bytes("Blocks")?, bytes("Data")?);

        let cells = usize::from(width) * usize::from(height) * usize::from(length);
        if blocks.len() != cells || data.len() != cells {
            return Err(SchematicError::Malformed(format!(
                "{width}x{height}x{length} needs {cells} cells, found {} blocks and {} data",
                blocks.len(),
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            length,
            blocks,
            data,
        })
    }

    /// Encodes the container to `out`.
    ///
    /// # Errors
    ///
    /// Fails on codec or stream errors.
    pub fn write_to<W: Write>(&self, out: W, compression: Compression) -> SchematicResult<()> {
        let tag = self.to_tag();
        match compression {
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(out, flate2::Compression::default());
                meshcraft_nbt::write(&mut encoder, &tag)?;
                encoder.finish()?.flush()?;
            }
            Compression::None => meshcraft_nbt::write(out, &tag)?,
        }
        Ok(())
    }

    /// Decodes a container, gzip-wrapped or raw.
    ///
    /// # Errors
    ///
    /// Fails on codec or stream errors, or a malformed tree.
    pub fn read_from<R: Read>(input: R) -> SchematicResult<Self> {
        Self::from_tag(&read_tree(input)?)
    }

    /// Writes the container to a file.
    ///
    /// # Errors
    ///
    /// See [`Schematic::write_to`].
    pub fn save(&self, path: &Path, compression: Compression) -> SchematicResult<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), compression)?;
        info!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            length = self.length,
            ?compression,
            "saved schematic"
        );
        Ok(())
    }

    /// Reads a container from a file.
    ///
    /// # Errors
    ///
    /// See [`Schematic::read_from`].
    pub fn load(path: &Path) -> SchematicResult<Self> {
        Self::read_from(File::open(path)?)
    }
}

/// Decodes one tag tree, unwrapping gzip if the stream starts with its
/// magic bytes.
///
/// # Errors
///
/// Fails on codec or stream errors.
pub fn read_tree<R: Read>(input: R) -> SchematicResult<NamedTag> {
    let mut input = BufReader::new(input);
    let gzipped = input.fill_buf()?.starts_with(&GZIP_MAGIC);

    let tag = if gzipped {
        meshcraft_nbt::read(GzDecoder::new(input))?
    } else {
        meshcraft_nbt::read(input)?
    };
    Ok(tag)
}

/// Reads the raw tag tree of a container file.
///
/// # Errors
///
/// See [`read_tree`].
pub fn load_tree(path: &Path) -> SchematicResult<NamedTag> {
    read_tree(File::open(path)?)
}

/// Quantizes `volume` and returns the root compound.
///
/// # Errors
///
/// See [`Schematic::from_volume`].
pub fn build_schematic<V: Volume + ?Sized>(volume: &V, palette: &Palette) -> SchematicResult<NamedTag> {
    let mut quiet = meshcraft_core::NoProgress;
    Ok(Schematic::from_volume(volume, palette, &mut quiet)?.to_tag())
}

/// Quantizes `volume` and writes it to `path`.
///
/// # Errors
///
/// See [`Schematic::from_volume`] and [`Schematic::save`].
pub fn save_schematic<V: Volume + ?Sized>(
    volume: &V,
    palette: &Palette,
    path: &Path,
    compression: Compression,
    observer: &mut dyn ProgressObserver,
) -> SchematicResult<Schematic> {
    let schematic = Schematic::from_volume(volume, palette, observer)?;
    schematic.save(path, compression)?;
    Ok(schematic)
}

/// Reads a schematic file.
///
/// # Errors
///
/// See [`Schematic::load`].
pub fn load_schematic(path: &Path) -> SchematicResult<Schematic> {
    Schematic::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshcraft_core::palette::{WOOL, WOOL_BLOCK_ID};
    use meshcraft_core::{NoProgress, Rgba};

    /// Opaque white wherever `x + y + z` is even.
    struct Checker(u32, u32, u32);

    impl Volume for Checker {
        fn width(&self) -> u32 {
            self.0
        }
        fn height(&self) -> u32 {
            self.1
        }
        fn depth(&self) -> u32 {
            self.2
        }
        fn voxel(&self, x: u32, y: u32, z: u32) -> Rgba {
            if (x + y + z) % 2 == 0 {
                Rgba::WHITE
            } else {
                Rgba::TRANSPARENT
            }
        }
    }

    #[test]
    fn test_layout_is_y_z_x() {
        let s = Schematic::from_volume(&Checker(3, 2, 4), &WOOL, &mut NoProgress).unwrap();
        assert_eq!((s.width(), s.height(), s.length()), (3, 2, 4));
        assert_eq!(s.blocks().len(), 24);

        for y in 0..2u16 {
            for z in 0..4u16 {
                for x in 0..3u16 {
                    let i = usize::from(y) * 12 + usize::from(z) * 3 + usize::from(x);
                    let expect = if (x + y + z) % 2 == 0 { WOOL_BLOCK_ID } else { 0 };
                    assert_eq!(s.blocks()[i], expect);
                    assert_eq!(s.block_at(x, y, z).map(|b| b.id), Some(expect));
                }
            }
        }
        assert_eq!(s.non_air_count(), 12);
        assert_eq!(s.block_at(3, 0, 0), None);
    }

    #[test]
    fn test_tag_fields() {
        let s = Schematic::from_volume(&Checker(2, 3, 1), &WOOL, &mut NoProgress).unwrap();
        let tag = s.to_tag();

        assert_eq!(tag.name, ROOT_NAME);
        assert_eq!(tag.get("Width"), Some(&Payload::Short(2)));
        assert_eq!(tag.get("Height"), Some(&Payload::Short(3)));
        assert_eq!(tag.get("Length"), Some(&Payload::Short(1)));
        assert_eq!(tag.get("Materials").and_then(Payload::as_str), Some("Alpha"));
        let entities = tag.get("TileEntities").and_then(Payload::as_list).unwrap();
        assert_eq!(entities.tag, TagId::Compound);
        assert!(entities.is_empty());

        let names: Vec<&str> = tag
            .payload
            .as_compound()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["Width", "Length", "Height", "Materials", "Blocks", "Data", "Entities", "TileEntities"]
        );

        assert_eq!(Schematic::from_tag(&tag).unwrap(), s);
    }

    #[test]
    fn test_dimension_too_large() {
        let err = Schematic::from_volume(&Checker(1, 40_000, 1), &WOOL, &mut NoProgress).unwrap_err();
        assert!(matches!(
            err,
            SchematicError::DimensionTooLarge { axis: "Height", value: 40_000 }
        ));
    }

    #[test]
    fn test_progress_per_layer() {
        let mut seen = Vec::new();
        let mut observer = |stage: Stage, done: usize, total: usize| seen.push((stage, done, total));
        Schematic::from_volume(&Checker(2, 3, 2), &WOOL, &mut observer).unwrap();
        assert_eq!(seen.first(), Some(&(Stage::Writing, 0, 3)));
        assert_eq!(seen.last(), Some(&(Stage::Writing, 3, 3)));
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_stream_round_trip_both_compressions() {
        let s = Schematic::from_volume(&Checker(5, 4, 3), &WOOL, &mut NoProgress).unwrap();
        for compression in [Compression::Gzip, Compression::None] {
            let mut buf = Vec::new();
            s.write_to(&mut buf, compression).unwrap();
            assert_eq!(buf.starts_with(&GZIP_MAGIC), compression == Compression::Gzip);
            assert_eq!(Schematic::read_from(buf.as_slice()).unwrap(), s);
        }
    }

    #[test]
    fn test_malformed_trees() {
        let missing = NamedTag::compound(ROOT_NAME, vec![NamedTag::new("Width", Payload::Short(1))]);
        assert!(matches!(
            Schematic::from_tag(&missing),
            Err(SchematicError::Malformed(_))
        ));

        let mut short = Schematic::from_volume(&Checker(2, 2, 2), &WOOL, &mut NoProgress)
            .unwrap()
            .to_tag();
        if let Payload::Compound(children) = &mut short.payload {
            children[4].payload = Payload::ByteArray(vec![0; 7]);
        }
        let err = Schematic::from_tag(&short).unwrap_err();
        assert!(err.to_string().contains("needs 8 cells"));

        let scalar = NamedTag::new(ROOT_NAME, Payload::Int(0));
        assert!(Schematic::from_tag(&scalar).is_err());
    }
}
