//! # Tagged Value Tree
//!
//! A [`NamedTag`] pairs a name with a [`Payload`]. Composite payloads own
//! their children outright, so dropping the root drops the whole tree.

use crate::tag::TagId;

/// The value carried by a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Signed 8-bit integer.
    Byte(i8),
    /// Signed 16-bit integer.
    Short(i16),
    /// Signed 32-bit integer.
    Int(i32),
    /// Signed 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Raw bytes.
    ByteArray(Vec<u8>),
    /// Text. Non-UTF-8 input is decoded lossily.
    String(String),
    /// Unnamed payloads sharing one tag id.
    List(List),
    /// Named children in insertion order.
    Compound(Vec<NamedTag>),
    /// 32-bit integers.
    IntArray(Vec<i32>),
}

impl Payload {
    /// Tag id written before this payload.
    #[must_use]
    pub const fn tag(&self) -> TagId {
        match self {
            Self::Byte(_) => TagId::Byte,
            Self::Short(_) => TagId::Short,
            Self::Int(_) => TagId::Int,
            Self::Long(_) => TagId::Long,
            Self::Float(_) => TagId::Float,
            Self::Double(_) => TagId::Double,
            Self::ByteArray(_) => TagId::ByteArray,
            Self::String(_) => TagId::String,
            Self::List(_) => TagId::List,
            Self::Compound(_) => TagId::Compound,
            Self::IntArray(_) => TagId::IntArray,
        }
    }

    /// The children of a compound payload.
    #[must_use]
    pub fn as_compound(&self) -> Option<&[NamedTag]> {
        match self {
            Self::Compound(children) => Some(children),
            _ => None,
        }
    }

    /// The bytes of a byte-array payload.
    #[must_use]
    pub fn as_byte_array(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The value of a short payload.
    #[must_use]
    pub const fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// The text of a string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The list inside a list payload.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

/// A homogeneous list.
///
/// Every item is expected to match `tag`; the encoder does not re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Tag shared by all items.
    pub tag: TagId,
    /// Items in order.
    pub items: Vec<Payload>,
}

impl List {
    /// An empty list of the given element tag.
    #[must_use]
    pub const fn empty(tag: TagId) -> Self {
        Self {
            tag,
            items: Vec::new(),
        }
    }

    /// Builds a list, taking the element tag from the first item.
    ///
    /// Returns `None` if `items` is empty or mixes tags.
    #[must_use]
    pub fn of(items: Vec<Payload>) -> Option<Self> {
        let tag = items.first()?.tag();
        items
            .iter()
            .all(|item| item.tag() == tag)
            .then_some(Self { tag, items })
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A named value: the unit written at the top level and inside compounds.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    /// Tag name. List items are unnamed on the wire.
    pub name: String,
    /// The value.
    pub payload: Payload,
}

impl NamedTag {
    /// Creates a named value.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Creates a compound.
    #[must_use]
    pub fn compound(name: impl Into<String>, children: Vec<NamedTag>) -> Self {
        Self::new(name, Payload::Compound(children))
    }

    /// Tag id of the payload.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> TagId {
        self.payload.tag()
    }

    /// First compound child called `name`, if this is a compound.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Payload> {
        self.payload
            .as_compound()?
            .iter()
            .find(|child| child.name == name)
            .map(|child| &child.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_tags() {
        assert_eq!(Payload::Byte(1).tag(), TagId::Byte);
        assert_eq!(Payload::IntArray(vec![]).tag(), TagId::IntArray);
        assert_eq!(Payload::List(List::empty(TagId::Int)).tag(), TagId::List);
    }

    #[test]
    fn test_list_of_rejects_mixed() {
        assert!(List::of(vec![Payload::Int(1), Payload::Int(2)]).is_some());
        assert!(List::of(vec![Payload::Int(1), Payload::Short(2)]).is_none());
        assert!(List::of(Vec::new()).is_none());
    }

    #[test]
    fn test_compound_lookup() {
        let root = NamedTag::compound(
            "root",
            vec![
                NamedTag::new("Width", Payload::Short(4)),
                NamedTag::new("Materials", Payload::String("Alpha".into())),
            ],
        );
        assert_eq!(root.get("Width").and_then(Payload::as_short), Some(4));
        assert_eq!(root.get("Materials").and_then(Payload::as_str), Some("Alpha"));
        assert!(root.get("Height").is_none());
        assert!(NamedTag::new("x", Payload::Int(1)).get("x").is_none());
    }
}
