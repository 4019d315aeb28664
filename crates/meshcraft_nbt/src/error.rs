//! # Codec Error Types

use std::io;

use thiserror::Error;

/// Errors raised while encoding or decoding tagged values.
#[derive(Error, Debug)]
pub enum NbtError {
    /// A tag id outside 1..=11 where a value was required.
    #[error("failed to decode value: invalid tag #{tag}")]
    UnknownTag {
        /// The offending tag id.
        tag: u8,
    },

    /// A length prefix below zero.
    #[error("negative length prefix: {length}")]
    NegativeLength {
        /// The decoded length.
        length: i32,
    },

    /// Compounds and lists nested deeper than the decoder allows.
    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },

    /// A string or name too long for its 16-bit length prefix.
    #[error("string of {len} bytes exceeds the 16-bit length prefix")]
    StringTooLong {
        /// Byte length of the string.
        len: usize,
    },

    /// An array or list too long for its 32-bit length prefix.
    #[error("sequence of {len} elements exceeds the 32-bit length prefix")]
    ArrayTooLong {
        /// Element count.
        len: usize,
    },

    /// Underlying stream failure, including truncated input.
    #[error("stream error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for codec operations.
pub type NbtResult<T> = Result<T, NbtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NbtError::UnknownTag { tag: 42 }.to_string(),
            "failed to decode value: invalid tag #42"
        );

        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        let err = NbtError::from(eof);
        assert!(matches!(err, NbtError::Io(_)));
    }
}
