//! Endian-aware writer, the mirror image of [`crate::io::EndianReader`].
//!
//! [`EndianWriter`] wraps any `Write + Seek` sink. Every write returns `Result<&mut Self>` so
//! that field sequences can be chained with `?`:
//!
//! ```rust
//! use bundlescope::io::{EndianType, EndianWriter};
//! use std::io::Cursor;
//!
//! let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
//! writer
//!     .write_u32(6, EndianType::Little)?
//!     .write_sized_cstring("abc", 8)?
//!     .write_padding(16)?;
//!
//! let data = writer.into_inner()?.into_inner();
//! assert_eq!(data.len(), 16);
//! assert_eq!(&data[4..12], b"abc\0\0\0\0\0");
//! # Ok::<(), bundlescope::Error>(())
//! ```

use std::{
    fmt,
    io::{Seek, SeekFrom, Write},
};

use uguid::Guid;

use crate::{
    io::{
        align::calculate_padding,
        encoding::TextEncoding,
        endian::{EndianIO, EndianType},
        hash::Sha1,
    },
    Error, Result,
};

const ZEROS: [u8; 64] = [0u8; 64];

#[inline]
const fn swap_u16(value: u16) -> u16 {
    (value >> 8) | (value << 8)
}

#[inline]
const fn swap_u32(value: u32) -> u32 {
    ((value & 0x0000_00FF) << 24)
        | ((value & 0x0000_FF00) << 8)
        | ((value & 0x00FF_0000) >> 8)
        | ((value & 0xFF00_0000) >> 24)
}

#[inline]
const fn swap_u64(value: u64) -> u64 {
    ((value & 0x0000_0000_0000_00FF) << 56)
        | ((value & 0x0000_0000_0000_FF00) << 40)
        | ((value & 0x0000_0000_00FF_0000) << 24)
        | ((value & 0x0000_0000_FF00_0000) << 8)
        | ((value & 0x0000_00FF_0000_0000) >> 8)
        | ((value & 0x0000_FF00_0000_0000) >> 24)
        | ((value & 0x00FF_0000_0000_0000) >> 40)
        | ((value & 0xFF00_0000_0000_0000) >> 56)
}

/// An endian-aware writer over a seekable byte sink.
pub struct EndianWriter<W: Write + Seek> {
    stream: Option<W>,
    encoding: TextEncoding,
    keep_stream_open: bool,
}

impl<W: Write + Seek> EndianWriter<W> {
    /// Creates a writer using UTF-8 for string fields.
    pub fn new(stream: W) -> Self {
        EndianWriter {
            stream: Some(stream),
            encoding: TextEncoding::default(),
            keep_stream_open: false,
        }
    }

    /// Sets the encoding used for string fields.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Hands the sink back from [`EndianWriter::dispose`] instead of dropping it.
    #[must_use]
    pub fn with_keep_stream_open(mut self, keep_stream_open: bool) -> Self {
        self.keep_stream_open = keep_stream_open;
        self
    }

    /// Returns the encoding used for string fields.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    fn stream_mut(&mut self) -> Result<&mut W> {
        self.stream.as_mut().ok_or(Error::Disposed)
    }

    /// Returns `true` once the writer has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.stream.is_none()
    }

    /// Flushes and releases the sink.
    ///
    /// The sink is returned if the writer was configured to keep it open and dropped otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] if already disposed, or the flush error.
    pub fn dispose(&mut self) -> Result<Option<W>> {
        let mut stream = self.stream.take().ok_or(Error::Disposed)?;
        stream.flush()?;
        Ok(if self.keep_stream_open {
            Some(stream)
        } else {
            None
        })
    }

    /// Flushes and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] if already disposed, or the flush error.
    pub fn into_inner(mut self) -> Result<W> {
        let mut stream = self.stream.take().ok_or(Error::Disposed)?;
        stream.flush()?;
        Ok(stream)
    }

    /// Flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or the flush error.
    pub fn flush(&mut self) -> Result<()> {
        self.stream_mut()?.flush()?;
        Ok(())
    }

    /// Current position of the sink.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.stream_mut()?.stream_position()?)
    }

    /// Moves the sink cursor.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn set_position(&mut self, position: u64) -> Result<()> {
        self.stream_mut()?.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Current length of the sink.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn length(&mut self) -> Result<u64> {
        let stream = self.stream_mut()?;
        let position = stream.stream_position()?;
        let length = stream.seek(SeekFrom::End(0))?;
        if position != length {
            stream.seek(SeekFrom::Start(position))?;
        }
        Ok(length)
    }

    /// Writes raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.stream_mut()?.write_all(data)?;
        Ok(self)
    }

    /// Writes any [`EndianIO`] value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_value<T: EndianIO>(&mut self, value: T, endian: EndianType) -> Result<&mut Self> {
        self.write_bytes(value.to_bytes(endian).as_ref())
    }

    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_u8(&mut self, value: u8) -> Result<&mut Self> {
        self.write_bytes(&[value])
    }

    /// Writes a single signed byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_i8(&mut self, value: i8) -> Result<&mut Self> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes `1` for `true` and `0` for `false`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_bool(&mut self, value: bool) -> Result<&mut Self> {
        self.write_u8(u8::from(value))
    }

    /// Writes a 16-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_u16(&mut self, value: u16, endian: EndianType) -> Result<&mut Self> {
        let ordered = match endian {
            EndianType::Little => value,
            EndianType::Big => swap_u16(value),
        };
        self.write_bytes(&ordered.to_le_bytes())
    }

    /// Writes a 16-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_i16(&mut self, value: i16, endian: EndianType) -> Result<&mut Self> {
        self.write_u16(value as u16, endian)
    }

    /// Writes a 32-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_u32(&mut self, value: u32, endian: EndianType) -> Result<&mut Self> {
        let ordered = match endian {
            EndianType::Little => value,
            EndianType::Big => swap_u32(value),
        };
        self.write_bytes(&ordered.to_le_bytes())
    }

    /// Writes a 32-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_i32(&mut self, value: i32, endian: EndianType) -> Result<&mut Self> {
        self.write_u32(value as u32, endian)
    }

    /// Writes a 64-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_u64(&mut self, value: u64, endian: EndianType) -> Result<&mut Self> {
        let ordered = match endian {
            EndianType::Little => value,
            EndianType::Big => swap_u64(value),
        };
        self.write_bytes(&ordered.to_le_bytes())
    }

    /// Writes a 64-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_i64(&mut self, value: i64, endian: EndianType) -> Result<&mut Self> {
        self.write_u64(value as u64, endian)
    }

    /// Writes a 32-bit float through its integer bits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_f32(&mut self, value: f32, endian: EndianType) -> Result<&mut Self> {
        self.write_u32(value.to_bits(), endian)
    }

    /// Writes a 64-bit float through its integer bits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_f64(&mut self, value: f64, endian: EndianType) -> Result<&mut Self> {
        self.write_u64(value.to_bits(), endian)
    }

    /// Writes a 16-byte GUID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_guid(&mut self, value: Guid, endian: EndianType) -> Result<&mut Self> {
        self.write_value(value, endian)
    }

    /// Writes the 20 raw bytes of a [`Sha1`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_sha1(&mut self, value: &Sha1) -> Result<&mut Self> {
        self.write_bytes(&value.to_bytes())
    }

    /// Writes a .NET style 7-bit encoded 32-bit integer. Negative values take 5 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_7bit_encoded_int(&mut self, value: i32) -> Result<&mut Self> {
        let mut value = value as u32;
        let mut encoded = [0u8; 5];
        let mut length = 0;
        while value >= 0x80 {
            encoded[length] = (value as u8) | 0x80;
            value >>= 7;
            length += 1;
        }
        encoded[length] = value as u8;
        self.write_bytes(&encoded[..=length])
    }

    /// Writes a .NET style 7-bit encoded 64-bit integer. Negative values take 10 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_7bit_encoded_long(&mut self, value: i64) -> Result<&mut Self> {
        let mut value = value as u64;
        let mut encoded = [0u8; 10];
        let mut length = 0;
        while value >= 0x80 {
            encoded[length] = (value as u8) | 0x80;
            value >>= 7;
            length += 1;
        }
        encoded[length] = value as u8;
        self.write_bytes(&encoded[..=length])
    }

    /// Writes the encoded characters of `text` without any framing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `text` cannot be encoded.
    pub fn write_string_characters(&mut self, text: &str) -> Result<&mut Self> {
        let bytes = self.encoding.encode(text)?;
        self.write_bytes(&bytes)
    }

    /// Writes `text` prefixed with its 7-bit encoded byte length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `text` cannot be encoded or is longer
    /// than `i32::MAX` bytes.
    pub fn write_string(&mut self, text: &str) -> Result<&mut Self> {
        let bytes = self.encoding.encode(text)?;
        let Ok(length) = i32::try_from(bytes.len()) else {
            return Err(Error::InvalidArgument(format!(
                "string of {} bytes is too long",
                bytes.len()
            )));
        };

        self.write_7bit_encoded_int(length)?.write_bytes(&bytes)
    }

    /// Writes `text` followed by a single zero byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `text` cannot be encoded.
    pub fn write_cstring(&mut self, text: &str) -> Result<&mut Self> {
        self.write_string_characters(text)?.write_u8(0)
    }

    /// Writes `text` into a fixed field of `size` bytes, zero-padding the remainder.
    ///
    /// A text of exactly `size` bytes is written without a terminator.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the encoded text exceeds `size` bytes.
    pub fn write_sized_cstring(&mut self, text: &str, size: usize) -> Result<&mut Self> {
        let bytes = self.encoding.encode(text)?;
        if bytes.len() > size {
            return Err(Error::InvalidArgument(format!(
                "string of {} bytes does not fit a field of {} bytes",
                bytes.len(),
                size
            )));
        }

        self.write_bytes(&bytes)?.write_zeros((size - bytes.len()) as u64)
    }

    /// Writes `text` followed by a line feed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `text` cannot be encoded.
    pub fn write_line(&mut self, text: &str) -> Result<&mut Self> {
        self.write_string_characters(text)?.write_u8(b'\n')
    }

    /// Writes `count` zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_zeros(&mut self, count: u64) -> Result<&mut Self> {
        let mut left = count;
        while left > 0 {
            let chunk = left.min(ZEROS.len() as u64) as usize;
            self.write_bytes(&ZEROS[..chunk])?;
            left -= chunk as u64;
        }
        Ok(self)
    }

    /// Writes zero bytes up to the next multiple of `alignment` (a power of two).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn write_padding(&mut self, alignment: i64) -> Result<&mut Self> {
        let position = self.position()? as i64;
        self.write_zeros(calculate_padding(position, alignment) as u64)
    }
}

impl<W: Write + Seek> Drop for EndianWriter<W> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.as_mut() {
            let _ = stream.flush();
        }
    }
}

impl<W: Write + Seek> fmt::Debug for EndianWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndianWriter")
            .field("disposed", &self.stream.is_none())
            .field("encoding", &self.encoding)
            .field("keep_stream_open", &self.keep_stream_open)
            .finish()
    }
}
