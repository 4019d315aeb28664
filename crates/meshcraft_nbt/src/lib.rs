//! # MESHCRAFT NBT
//!
//! Tagged binary values: the container format schematics are stored in.
//!
//! ## Design Principles
//!
//! 1. **Closed tree**: eleven payload kinds in one `enum`, dispatched by `match`
//! 2. **Big-endian**: every multi-byte number on the wire
//! 3. **Stream-agnostic**: any `Read`/`Write`; compression is the caller's job
//! 4. **Bounded decode**: nesting is capped and lengths never drive allocation
//!
//! ## Wire Format
//!
//! ```text
//! named value := tag:u8  name:string  payload
//! string      := len:i16 bytes
//! byte array  := len:i32 bytes
//! int array   := len:i32 i32*
//! list        := tag:u8  len:i32 payload*
//! compound    := named value* 0x00
//! ```
//!
//! ## Example
//!
//! ```rust
//! use meshcraft_nbt::{NamedTag, Payload};
//!
//! let tag = NamedTag::compound("root", vec![
//!     NamedTag::new("Width", Payload::Short(16)),
//!     NamedTag::new("Materials", Payload::String("Alpha".into())),
//! ]);
//!
//! let bytes = meshcraft_nbt::to_bytes(&tag).unwrap();
//! let back = meshcraft_nbt::from_bytes(&bytes).unwrap();
//! assert_eq!(back, tag);
//! assert_eq!(back.to_string(), "root=(Width=16S, Materials=\"Alpha\")");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod decode;
mod display;
pub mod encode;
pub mod error;
pub mod tag;
pub mod value;

pub use decode::{from_bytes, read, NbtReader, DEFAULT_MAX_DEPTH};
pub use encode::{to_bytes, write, NbtWriter};
pub use error::{NbtError, NbtResult};
pub use tag::TagId;
pub use value::{List, NamedTag, Payload};
