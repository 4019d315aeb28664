//! # Block Palette
//!
//! Maps voxel colors onto a fixed table of block states by nearest RGB
//! distance. Voxels at or below [`ALPHA_CUTOFF`] become air.
//!
//! The built-in [`WOOL`] palette covers the sixteen dyed wool blocks.
//! Custom tables can be loaded from TOML through [`PaletteFile`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{CoreError, CoreResult};

/// Voxels with alpha at or below this value quantize to air.
pub const ALPHA_CUTOFF: u8 = 128;

/// Block id used for every wool entry.
pub const WOOL_BLOCK_ID: u8 = 0x23;

/// A block id plus its 4-bit data value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockState {
    /// Block id.
    pub id: u8,
    /// Block data (variant).
    pub data: u8,
}

impl BlockState {
    /// The empty block.
    pub const AIR: Self = Self::new(0, 0);

    /// Creates a block state.
    #[inline]
    #[must_use]
    pub const fn new(id: u8, data: u8) -> Self {
        Self { id, data }
    }

    /// True for the empty block.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == 0 && self.data == 0
    }
}

/// One palette row: the representative color and the block it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Representative color (`#rrggbb` in files).
    pub color: Rgba,
    /// Block id.
    pub block: u8,
    /// Block data.
    #[serde(default)]
    pub data: u8,
}

impl PaletteEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(color: Rgba, block: u8, data: u8) -> Self {
        Self { color, block, data }
    }

    /// The block state this entry selects.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> BlockState {
        BlockState::new(self.block, self.data)
    }
}

const fn wool(rgb: u32, data: u8) -> PaletteEntry {
    PaletteEntry::new(Rgba::from_rgb(rgb), WOOL_BLOCK_ID, data)
}

/// The sixteen wool colors, in data order.
pub const WOOL_ENTRIES: [PaletteEntry; 16] = [
    wool(0xffffff, 0),
    wool(0xd5712f, 1),
    wool(0xb65abe, 2),
    wool(0x6586c7, 3),
    wool(0xb3a828, 4),
    wool(0x43b63b, 5),
    wool(0xd38ca0, 6),
    wool(0x404040, 7),
    wool(0xaaaaaa, 8),
    wool(0x2e6f8a, 9),
    wool(0x8240ba, 10),
    wool(0x313c94, 11),
    wool(0x573722, 12),
    wool(0x36491c, 13),
    wool(0xa43935, 14),
    wool(0x101010, 15),
];

/// The built-in wool palette.
pub const WOOL: Palette = Palette::from_static(&WOOL_ENTRIES);

/// An ordered, non-empty table of palette entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Cow<'static, [PaletteEntry]>,
}

impl Palette {
    /// Wraps a static table. The table must not be empty.
    #[must_use]
    pub const fn from_static(entries: &'static [PaletteEntry]) -> Self {
        Self {
            entries: Cow::Borrowed(entries),
        }
    }

    /// Builds a palette from owned entries.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyPalette`] if `entries` is empty.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        Ok(Self {
            entries: Cow::Owned(entries),
        })
    }

    /// The entries in priority order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantizes a color to a block state.
    ///
    /// Alpha at or below [`ALPHA_CUTOFF`] yields [`BlockState::AIR`].
    /// Otherwise the entry with the smallest squared RGB distance wins;
    /// ties go to the earlier entry.
    #[must_use]
    pub fn quantize(&self, color: Rgba) -> BlockState {
        if color.a <= ALPHA_CUTOFF {
            return BlockState::AIR;
        }

        self.entries
            .iter()
            .min_by_key(|e| e.color.distance_sq(color))
            .map_or(BlockState::AIR, PaletteEntry::state)
    }
}

impl Default for Palette {
    fn default() -> Self {
        WOOL
    }
}

/// On-disk palette table.
///
/// ```toml
/// [[entries]]
/// color = "#ffffff"
/// block = 35
/// data = 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteFile {
    /// Palette rows in priority order.
    pub entries: Vec<PaletteEntry>,
}

impl TryFrom<PaletteFile> for Palette {
    type Error = CoreError;

    fn try_from(file: PaletteFile) -> CoreResult<Self> {
        Self::from_entries(file.entries)
    }
}

impl From<&Palette> for PaletteFile {
    fn from(palette: &Palette) -> Self {
        Self {
            entries: palette.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_alpha_is_air() {
        assert_eq!(WOOL.quantize(Rgba::new(255, 255, 255, 128)), BlockState::AIR);
        assert_eq!(WOOL.quantize(Rgba::TRANSPARENT), BlockState::AIR);
        assert!(!WOOL.quantize(Rgba::new(255, 255, 255, 129)).is_air());
    }

    #[test]
    fn test_exact_wool_colors() {
        for entry in &WOOL_ENTRIES {
            let block = WOOL.quantize(entry.color);
            assert_eq!(block, BlockState::new(35, entry.data));
        }
    }

    #[test]
    fn test_nearest_color() {
        assert_eq!(WOOL.quantize(Rgba::WHITE), BlockState::new(35, 0));
        assert_eq!(WOOL.quantize(Rgba::new(0, 0, 0, 255)), BlockState::new(35, 15));
        assert_eq!(WOOL.quantize(Rgba::new(200, 50, 50, 255)), BlockState::new(35, 14));
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let palette = Palette::from_entries(vec![
            PaletteEntry::new(Rgba::from_rgb(0x000000), 1, 0),
            PaletteEntry::new(Rgba::from_rgb(0x202020), 2, 0),
        ])
        .unwrap();
        assert_eq!(palette.quantize(Rgba::new(16, 16, 16, 255)).id, 1);
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::from_entries(Vec::new()), Err(CoreError::EmptyPalette));
    }

    #[test]
    fn test_default_is_wool() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette, WOOL);
    }

    #[test]
    fn test_palette_file_conversion() {
        let file = PaletteFile::from(&WOOL);
        assert_eq!(file.entries.len(), 16);
        let palette = Palette::try_from(file).unwrap();
        assert_eq!(palette.entries(), &WOOL_ENTRIES);

        let empty = PaletteFile {
            entries: Vec::new(),
        };
        assert!(Palette::try_from(empty).is_err());
    }
}
