//! Endian-aware binary I/O primitives.
//!
//! This module contains everything needed to read and write binary formats whose fields
//! mix byte orders, fixed-width values, strings with various framings, and 7-bit encoded
//! integers. The bundle engine in [`crate::bundle`] is built entirely on top of it.
//!
//! # Key Components
//!
//! - [`endian`] - [`EndianType`], the [`EndianIO`] trait and the buffer conversion functions
//! - [`align`] - Alignment and padding arithmetic
//! - [`hash`] - The 20-byte [`Sha1`] value type
//! - [`analyzer`] - The [`Analyzer`] read hook
//! - [`reader`] - [`EndianReader`], a buffered reader with region views and signature scans
//! - [`writer`] - [`EndianWriter`], the mirror-image writer
//! - [`view`] - [`StreamView`], a bounded read-only window over a seekable stream
//! - [`search`] - Morris-Pratt exact search and wildcard [`SignaturePattern`]s
//!
//! # Examples
//!
//! ```rust
//! use bundlescope::io::{EndianReader, EndianType, EndianWriter};
//! use std::io::Cursor;
//!
//! let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
//! writer
//!     .write_u16(0xCAFE, EndianType::Big)?
//!     .write_cstring("name")?
//!     .write_7bit_encoded_int(300)?;
//!
//! let buffer = writer.into_inner()?.into_inner();
//! let mut reader = EndianReader::new(Cursor::new(buffer));
//! assert_eq!(reader.read_u16(EndianType::Big)?, 0xCAFE);
//! assert_eq!(reader.read_cstring()?, "name");
//! assert_eq!(reader.read_7bit_encoded_int()?, 300);
//! # Ok::<(), bundlescope::Error>(())
//! ```

pub mod align;
pub mod analyzer;
pub mod encoding;
pub mod endian;
pub mod hash;
pub mod reader;
pub mod search;
pub mod view;
pub mod writer;

pub use align::{apply_alignment, calculate_padding};
pub use analyzer::Analyzer;
pub use encoding::TextEncoding;
pub use endian::{decode, decode_at, encode, encode_at, read_at, write_at, EndianIO, EndianType};
pub use hash::Sha1;
pub use reader::{EndianReader, ReaderOptions, RegionRange};
pub use search::{search_in_buffer, SignaturePattern};
pub use view::StreamView;
pub use writer::EndianWriter;
