//! # Decoder
//!
//! Reads tagged values back from any [`Read`]. Declared lengths are never
//! used to pre-allocate more than a small bound, so a hostile prefix costs
//! at most the bytes actually present.

use std::io::{self, Read};

use tracing::{debug, trace};

use crate::error::{NbtError, NbtResult};
use crate::tag::TagId;
use crate::value::{List, NamedTag, Payload};

/// Default limit on compound/list nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest up-front reservation for a list, in items.
const MAX_PREALLOC: usize = 1024;

/// Pulls tagged values from a reader.
#[derive(Debug)]
pub struct NbtReader<R> {
    inner: R,
    max_depth: usize,
}

impl<R: Read> NbtReader<R> {
    /// Wraps a reader with the default nesting limit.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads one complete named value.
    ///
    /// # Errors
    ///
    /// [`NbtError::UnknownTag`] for a tag id outside 1..=11 (including a
    /// leading `End`), [`NbtError::NegativeLength`],
    /// [`NbtError::DepthLimitExceeded`], or [`NbtError::Io`] when the
    /// stream fails or ends early.
    pub fn read_named(&mut self) -> NbtResult<NamedTag> {
        let tag = self.read_value_tag()?;
        self.read_named_body(tag, 0)
    }

    fn read_named_body(&mut self, tag: TagId, depth: usize) -> NbtResult<NamedTag> {
        let name = self.read_string()?;
        trace!(name = %name, tag = tag.id(), depth, "decoding value");
        let payload = self.read_payload(tag, depth)?;
        Ok(NamedTag { name, payload })
    }

    fn read_payload(&mut self, tag: TagId, depth: usize) -> NbtResult<Payload> {
        Ok(match tag {
            TagId::End => return Err(NbtError::UnknownTag { tag: 0 }),
            TagId::Byte => Payload::Byte(i8::from_be_bytes(self.fixed()?)),
            TagId::Short => Payload::Short(i16::from_be_bytes(self.fixed()?)),
            TagId::Int => Payload::Int(i32::from_be_bytes(self.fixed()?)),
            TagId::Long => Payload::Long(i64::from_be_bytes(self.fixed()?)),
            TagId::Float => Payload::Float(f32::from_be_bytes(self.fixed()?)),
            TagId::Double => Payload::Double(f64::from_be_bytes(self.fixed()?)),
            TagId::ByteArray => {
                let len = self.read_len()?;
                Payload::ByteArray(self.read_bytes(len)?)
            }
            TagId::String => Payload::String(self.read_string()?),
            TagId::List => Payload::List(self.read_list(depth + 1)?),
            TagId::Compound => Payload::Compound(self.read_compound(depth + 1)?),
            TagId::IntArray => {
                let len = self.read_len()?;
                let bytes = self.read_bytes(len.saturating_mul(4))?;
                Payload::IntArray(
                    bytes
                        .chunks_exact(4)
                        .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                        .collect(),
                )
            }
        })
    }

    fn read_list(&mut self, depth: usize) -> NbtResult<List> {
        self.check_depth(depth)?;
        let tag = TagId::try_from(self.fixed::<1>()?[0])?;
        let len = self.read_len()?;

        let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            items.push(self.read_payload(tag, depth)?);
        }
        Ok(List { tag, items })
    }

    fn read_compound(&mut self, depth: usize) -> NbtResult<Vec<NamedTag>> {
        self.check_depth(depth)?;
        let mut children = Vec::new();
        loop {
            let tag = TagId::try_from(self.fixed::<1>()?[0])?;
            if tag == TagId::End {
                return Ok(children);
            }
            children.push(self.read_named_body(tag, depth)?);
        }
    }

    fn check_depth(&self, depth: usize) -> NbtResult<()> {
        if depth > self.max_depth {
            debug!(depth, limit = self.max_depth, "nesting too deep, aborting decode");
            return Err(NbtError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn read_value_tag(&mut self) -> NbtResult<TagId> {
        let id = self.fixed::<1>()?[0];
        match TagId::try_from(id)? {
            TagId::End => Err(NbtError::UnknownTag { tag: id }),
            tag => Ok(tag),
        }
    }

    fn read_string(&mut self) -> NbtResult<String> {
        let len = i16::from_be_bytes(self.fixed()?);
        if len < 0 {
            return Err(NbtError::NegativeLength {
                length: i32::from(len),
            });
        }
        let bytes = self.read_bytes(len as usize)?;
        Ok(String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
    }

    fn read_len(&mut self) -> NbtResult<usize> {
        let length = i32::from_be_bytes(self.fixed()?);
        usize::try_from(length).map_err(|_| NbtError::NegativeLength { length })
    }

    fn read_bytes(&mut self, len: usize) -> NbtResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC * 64));
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }

    #[inline]
    fn fixed<const N: usize>(&mut self) -> NbtResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Reads one named value from `input`.
///
/// # Errors
///
/// See [`NbtReader::read_named`].
pub fn read<R: Read>(input: R) -> NbtResult<NamedTag> {
    NbtReader::new(input).read_named()
}

/// Decodes one named value from a byte slice. Trailing bytes are ignored.
///
/// # Errors
///
/// See [`NbtReader::read_named`].
pub fn from_bytes(bytes: &[u8]) -> NbtResult<NamedTag> {
    read(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalar() {
        let tag = from_bytes(&[2, 0, 2, b'a', b'b', 0x01, 0x02]).unwrap();
        assert_eq!(tag, NamedTag::new("ab", Payload::Short(0x0102)));
    }

    #[test]
    fn test_leading_end_is_rejected() {
        assert!(matches!(
            from_bytes(&[0]),
            Err(NbtError::UnknownTag { tag: 0 })
        ));
    }

    #[test]
    fn test_unknown_tag_aborts() {
        let bytes = [10, 0, 0, 99, 0, 0];
        assert!(matches!(
            from_bytes(&bytes),
            Err(NbtError::UnknownTag { tag: 99 })
        ));
    }

    #[test]
    fn test_negative_lengths() {
        let bytes = [7, 0, 0, 0xff, 0xff, 0xff, 0xff];
        assert!(matches!(
            from_bytes(&bytes),
            Err(NbtError::NegativeLength { length: -1 })
        ));

        let bytes = [8, 0xff, 0xfe];
        assert!(matches!(
            from_bytes(&bytes),
            Err(NbtError::NegativeLength { length: -2 })
        ));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = [7, 0, 0, 0, 0, 0, 10, 1, 2];
        assert!(matches!(from_bytes(&bytes), Err(NbtError::Io(_))));
        assert!(matches!(from_bytes(&[3, 0, 0, 1]), Err(NbtError::Io(_))));
    }

    #[test]
    fn test_huge_declared_length_fails_cheaply() {
        let bytes = [11, 0, 0, 0x7f, 0xff, 0xff, 0xff, 0, 0, 0, 1];
        assert!(matches!(from_bytes(&bytes), Err(NbtError::Io(_))));
    }

    #[test]
    fn test_list_of_end_with_items_rejected() {
        let bytes = [9, 0, 0, 0, 0, 0, 0, 1];
        assert!(matches!(
            from_bytes(&bytes),
            Err(NbtError::UnknownTag { tag: 0 })
        ));

        let empty = from_bytes(&[9, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(empty.payload, Payload::List(List::empty(TagId::End)));
    }

    #[test]
    fn test_depth_limit() {
        // Three nested compounds.
        let mut bytes = vec![10, 0, 0];
        bytes.extend_from_slice(&[10, 0, 0, 10, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0]);

        let err = NbtReader::new(bytes.as_slice())
            .with_max_depth(2)
            .read_named()
            .unwrap_err();
        assert!(matches!(err, NbtError::DepthLimitExceeded { limit: 2 }));

        let tag = NbtReader::new(bytes.as_slice())
            .with_max_depth(3)
            .read_named()
            .unwrap();
        assert_eq!(tag.tag(), TagId::Compound);
    }

    #[test]
    fn test_lossy_names() {
        let tag = from_bytes(&[1, 0, 2, 0xff, b'a', 7]).unwrap();
        assert_eq!(tag.name, "\u{fffd}a");
        assert_eq!(tag.payload, Payload::Byte(7));
    }
}
