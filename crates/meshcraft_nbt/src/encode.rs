//! # Encoder
//!
//! Writes a [`NamedTag`] as tag id, name, payload. All numbers are
//! big-endian. Compounds close with an `End` byte; lists write the element
//! tag and count followed by bare payloads.

use std::io::Write;

use crate::error::{NbtError, NbtResult};
use crate::tag::TagId;
use crate::value::{List, NamedTag, Payload};

/// Streams tagged values into a writer.
#[derive(Debug)]
pub struct NbtWriter<W> {
    inner: W,
}

impl<W: Write> NbtWriter<W> {
    /// Wraps a writer.
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes a complete named value.
    ///
    /// # Errors
    ///
    /// Fails on stream errors or on strings/arrays too long for their length
    /// prefix. Bytes already written stay written.
    pub fn write_named(&mut self, tag: &NamedTag) -> NbtResult<()> {
        self.write_tag(tag.tag())?;
        self.write_string(&tag.name)?;
        self.write_payload(&tag.payload)
    }

    /// Writes a payload with no tag id or name.
    ///
    /// # Errors
    ///
    /// See [`NbtWriter::write_named`].
    pub fn write_payload(&mut self, payload: &Payload) -> NbtResult<()> {
        match payload {
            Payload::Byte(v) => self.put(&v.to_be_bytes()),
            Payload::Short(v) => self.put(&v.to_be_bytes()),
            Payload::Int(v) => self.put(&v.to_be_bytes()),
            Payload::Long(v) => self.put(&v.to_be_bytes()),
            Payload::Float(v) => self.put(&v.to_be_bytes()),
            Payload::Double(v) => self.put(&v.to_be_bytes()),
            Payload::ByteArray(bytes) => {
                self.write_len(bytes.len())?;
                self.put(bytes)
            }
            Payload::String(s) => self.write_string(s),
            Payload::List(list) => self.write_list(list),
            Payload::Compound(children) => {
                for child in children {
                    self.write_named(child)?;
                }
                self.write_tag(TagId::End)
            }
            Payload::IntArray(values) => {
                self.write_len(values.len())?;
                for v in values {
                    self.put(&v.to_be_bytes())?;
                }
                Ok(())
            }
        }
    }

    /// Flushes the wrapped writer.
    ///
    /// # Errors
    ///
    /// Propagates the writer's flush error.
    pub fn flush(&mut self) -> NbtResult<()> {
        Ok(self.inner.flush()?)
    }

    fn write_list(&mut self, list: &List) -> NbtResult<()> {
        self.write_tag(list.tag)?;
        self.write_len(list.items.len())?;
        for item in &list.items {
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_tag(&mut self, tag: TagId) -> NbtResult<()> {
        self.put(&[tag.id()])
    }

    fn write_string(&mut self, s: &str) -> NbtResult<()> {
        let len = i16::try_from(s.len()).map_err(|_| NbtError::StringTooLong { len: s.len() })?;
        self.put(&len.to_be_bytes())?;
        self.put(s.as_bytes())
    }

    fn write_len(&mut self, len: usize) -> NbtResult<()> {
        let prefix = i32::try_from(len).map_err(|_| NbtError::ArrayTooLong { len })?;
        self.put(&prefix.to_be_bytes())
    }

    #[inline]
    fn put(&mut self, bytes: &[u8]) -> NbtResult<()> {
        Ok(self.inner.write_all(bytes)?)
    }
}

/// Writes `tag` to `out`.
///
/// # Errors
///
/// See [`NbtWriter::write_named`].
pub fn write<W: Write>(out: W, tag: &NamedTag) -> NbtResult<()> {
    let mut writer = NbtWriter::new(out);
    writer.write_named(tag)?;
    writer.flush()
}

/// Encodes `tag` into a new buffer.
///
/// # Errors
///
/// Fails only on over-long strings or arrays.
pub fn to_bytes(tag: &NamedTag) -> NbtResult<Vec<u8>> {
    let mut buf = Vec::new();
    write(&mut buf, tag)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_layout() {
        let bytes = to_bytes(&NamedTag::new("ab", Payload::Short(0x0102))).unwrap();
        assert_eq!(bytes, vec![2, 0, 2, b'a', b'b', 0x01, 0x02]);

        let bytes = to_bytes(&NamedTag::new("", Payload::Int(-2))).unwrap();
        assert_eq!(bytes, vec![3, 0, 0, 0xff, 0xff, 0xff, 0xfe]);
    }

    #[test]
    fn test_compound_layout() {
        let tag = NamedTag::compound("c", vec![NamedTag::new("b", Payload::Byte(-1))]);
        let bytes = to_bytes(&tag).unwrap();
        assert_eq!(bytes, vec![10, 0, 1, b'c', 1, 0, 1, b'b', 0xff, 0]);
    }

    #[test]
    fn test_list_layout() {
        let list = List {
            tag: TagId::Short,
            items: vec![Payload::Short(1), Payload::Short(2)],
        };
        let bytes = to_bytes(&NamedTag::new("", Payload::List(list))).unwrap();
        assert_eq!(bytes, vec![9, 0, 0, 2, 0, 0, 0, 2, 0, 1, 0, 2]);
    }

    #[test]
    fn test_empty_compound_list() {
        let tag = NamedTag::new("E", Payload::List(List::empty(TagId::Compound)));
        let bytes = to_bytes(&tag).unwrap();
        assert_eq!(bytes, vec![9, 0, 1, b'E', 10, 0, 0, 0, 0]);
    }

    #[test]
    fn test_int_array_layout() {
        let tag = NamedTag::new("", Payload::IntArray(vec![1, 256]));
        let bytes = to_bytes(&tag).unwrap();
        assert_eq!(bytes, vec![11, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_string_too_long() {
        let long = "x".repeat(40_000);
        let err = to_bytes(&NamedTag::new("", Payload::String(long))).unwrap_err();
        assert!(matches!(err, NbtError::StringTooLong { len: 40_000 }));
    }
}
