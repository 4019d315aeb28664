//! Wire tag ids.

use crate::error::NbtError;

/// One-byte type id preceding every named value on the wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    /// Compound terminator. Never a value.
    End = 0,
    /// Signed 8-bit integer.
    Byte = 1,
    /// Signed 16-bit integer.
    Short = 2,
    /// Signed 32-bit integer.
    Int = 3,
    /// Signed 64-bit integer.
    Long = 4,
    /// 32-bit float.
    Float = 5,
    /// 64-bit float.
    Double = 6,
    /// Length-prefixed raw bytes.
    ByteArray = 7,
    /// Length-prefixed string.
    String = 8,
    /// Homogeneous sequence of unnamed payloads.
    List = 9,
    /// Heterogeneous sequence of named values.
    Compound = 10,
    /// Length-prefixed 32-bit integers.
    IntArray = 11,
}

impl TagId {
    /// The wire byte.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Decodes a wire byte, including [`TagId::End`].
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            _ => return None,
        })
    }
}

impl TryFrom<u8> for TagId {
    type Error = NbtError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_id(tag).ok_or(NbtError::UnknownTag { tag })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for id in 0..=11u8 {
            assert_eq!(TagId::try_from(id).map(TagId::id).ok(), Some(id));
        }
        assert!(matches!(
            TagId::try_from(12),
            Err(NbtError::UnknownTag { tag: 12 })
        ));
    }
}
