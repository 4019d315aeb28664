//! # Core Error Types
//!
//! Voxelization and quantization never fail; only indexed access and
//! externally supplied data (texel buffers, palette tables) can.

use thiserror::Error;

/// Errors raised by the core data types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A triangle index past the end of a [`TriangleSet`](crate::TriangleSet).
    #[error("triangle index {index} out of bounds (set holds {len})")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of triangles stored.
        len: usize,
    },

    /// A texel buffer whose byte/pixel count disagrees with its dimensions.
    #[error("texel buffer is {width}x{height} but holds {got} pixels")]
    TexelCountMismatch {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Pixels actually supplied.
        got: usize,
    },

    /// A color literal that is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid color literal: {0:?}")]
    InvalidColor(String),

    /// A palette without a single entry.
    #[error("palette must contain at least one entry")]
    EmptyPalette,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::IndexOutOfBounds { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));

        assert_eq!(
            CoreError::EmptyPalette.to_string(),
            "palette must contain at least one entry"
        );
    }
}
