use std::io::{Read, Seek, Write};

use crate::{
    io::{EndianReader, EndianType, EndianWriter},
    Result,
};

/// An `offset` + `size` pair locating a byte range inside the host binary.
///
/// Encoded as two little-endian `i64` values (16 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileLocation {
    /// Absolute offset within the host binary
    pub offset: i64,
    /// Number of bytes
    pub size: i64,
}

impl FileLocation {
    /// Size of an encoded location in bytes.
    pub const SIZE: usize = 16;

    /// Creates a new location.
    #[must_use]
    pub const fn new(offset: i64, size: i64) -> Self {
        FileLocation { offset, size }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.offset.saturating_add(self.size)
    }

    /// Decodes a location.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the record is truncated and
    /// [`crate::Error::Malformed`] for a negative offset or size.
    pub fn read<S: Read + Seek>(reader: &mut EndianReader<S>) -> Result<Self> {
        let offset = reader.read_i64(EndianType::Little)?;
        let size = reader.read_i64(EndianType::Little)?;

        if offset < 0 || size < 0 {
            return Err(malformed_error!(
                "Invalid file location - offset {}, size {}",
                offset,
                size
            ));
        }

        Ok(FileLocation { offset, size })
    }

    /// Encodes this location.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the writer.
    pub fn write<W: Write + Seek>(&self, writer: &mut EndianWriter<W>) -> Result<()> {
        writer
            .write_i64(self.offset, EndianType::Little)?
            .write_i64(self.size, EndianType::Little)?;
        Ok(())
    }
}
