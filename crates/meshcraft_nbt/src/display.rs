//! Compact debug notation for tagged values.
//!
//! | payload    | shown as            |
//! |------------|---------------------|
//! | byte       | `0x7f`              |
//! | short      | `12S`               |
//! | int        | `12`                |
//! | long       | `12L`               |
//! | float      | `1.5F`              |
//! | double     | `1.5`               |
//! | byte array | `<4-byte array>`    |
//! | string     | `"text"`            |
//! | int array  | `\|1;2;3\|`         |
//! | list       | `[ty=3;=1, =2]`     |
//! | compound   | `(a=1, b=2S)`       |

use std::fmt;

use crate::value::{NamedTag, Payload};

impl fmt::Display for NamedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.payload)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "0x{:02x}", *v as u8),
            Self::Short(v) => write!(f, "{v}S"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v}F"),
            Self::Double(v) => write!(f, "{v}"),
            Self::ByteArray(bytes) => write!(f, "<{}-byte array>", bytes.len()),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::IntArray(values) => {
                f.write_str("|")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("|")
            }
            Self::List(list) => {
                write!(f, "[ty={};", list.tag.id())?;
                for (i, item) in list.items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    // list items are unnamed
                    write!(f, "={item}")?;
                }
                f.write_str("]")
            }
            Self::Compound(children) => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
