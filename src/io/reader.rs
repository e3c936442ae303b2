//! Buffered, endian-aware reader with region views.
//!
//! [`EndianReader`] wraps any `Read + Seek` byte source and provides typed reads in either byte
//! order, string decoding with several framings, 7-bit encoded integers, wildcard signature
//! scans, and a *region view* that makes a sub-window of the source look like the whole source.
//!
//! # Architecture
//!
//! Every typed read goes through one path: the value's fixed byte width is read into an
//! internal scratch buffer with [`EndianReader::read_exactly`], then decoded by
//! [`crate::io::decode`]. Physical reads are routed through the optional
//! [`crate::io::Analyzer`], which sees (and may rewrite) every byte before any decoding happens.
//!
//! # Region Views
//!
//! While a region view is enabled, [`EndianReader::position`], [`EndianReader::length`] and
//! [`EndianReader::set_position`] are translated relative to the region start, and reads are
//! clamped to the region end. [`EndianReader::actual_position`] and
//! [`EndianReader::actual_length`] always report the untranslated values. Region views do not
//! nest: enabling a new view replaces the current one.
//!
//! # Failure Semantics
//!
//! - Partial reads ([`EndianReader::read`], [`EndianReader::read_bytes`]) return fewer bytes at
//!   the end of data instead of failing.
//! - Exact reads fail with [`crate::Error::EndOfData`] when the data ends early.
//! - Every operation after [`EndianReader::dispose`] fails with [`crate::Error::Disposed`].
//!
//! # Examples
//!
//! ```rust
//! use bundlescope::io::{EndianReader, EndianType, RegionRange};
//! use std::io::Cursor;
//!
//! let mut data = vec![0u8; 8];
//! data.extend_from_slice(&[0x00, 0x2A, b'o', b'k', 0x00]);
//!
//! let mut reader = EndianReader::new(Cursor::new(data));
//! reader.enable_region_view(RegionRange::new(8, 5)?)?;
//!
//! assert_eq!(reader.position()?, 0);
//! assert_eq!(reader.length()?, 5);
//! assert_eq!(reader.read_u16(EndianType::Big)?, 42);
//! assert_eq!(reader.read_cstring()?, "ok");
//! assert_eq!(reader.actual_position()?, 13);
//! # Ok::<(), bundlescope::Error>(())
//! ```

use std::{
    fmt,
    io::{self, Read, Seek, SeekFrom, Write},
    mem,
};

use uguid::Guid;

use crate::{
    io::{
        align::apply_alignment,
        analyzer::Analyzer,
        encoding::TextEncoding,
        endian::{decode, read_at, EndianIO, EndianType},
        hash::Sha1,
        search::SignaturePattern,
    },
    Error, Result,
};

/// The smallest internal buffer, large enough for the widest atomic read (a [`Sha1`]).
pub const MIN_BUFFER_SIZE: usize = 20;

/// Default size of the internal buffer.
pub const DEFAULT_BUFFER_SIZE: usize = 0x100;

/// Number of raw bytes decoded per step by the string readers.
const STRING_CHUNK_SIZE: usize = 128;

/// Number of bytes fetched per step by [`EndianReader::scan_signatures`].
const SCAN_CHUNK_SIZE: usize = 0x10_0000;

/// A sub-window of a stream, described by its absolute start and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RegionRange {
    /// Absolute start position within the underlying stream
    pub start: i64,
    /// Number of bytes covered by the region
    pub size: i64,
}

impl RegionRange {
    /// Creates a new region.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `start` or `size` is negative.
    pub fn new(start: i64, size: i64) -> Result<Self> {
        if start < 0 || size < 0 {
            return Err(Error::InvalidArgument(format!(
                "invalid region start {start} / size {size}"
            )));
        }

        Ok(RegionRange { start, size })
    }

    /// Absolute end position (exclusive).
    #[must_use]
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.size)
    }
}

/// Construction options for [`EndianReader`].
pub struct ReaderOptions {
    buffer_size: usize,
    encoding: TextEncoding,
    analyzer: Option<Box<dyn Analyzer>>,
    keep_stream_open: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
            encoding: TextEncoding::default(),
            analyzer: None,
            keep_stream_open: false,
        }
    }
}

impl ReaderOptions {
    /// Sets the initial internal buffer size (clamped to [`MIN_BUFFER_SIZE`]).
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(MIN_BUFFER_SIZE);
        self
    }

    /// Sets the encoding used for string fields.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Attaches a read hook.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Hands the stream back from [`EndianReader::dispose`] instead of dropping it.
    #[must_use]
    pub fn with_keep_stream_open(mut self, keep_stream_open: bool) -> Self {
        self.keep_stream_open = keep_stream_open;
        self
    }
}

impl fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("buffer_size", &self.buffer_size)
            .field("encoding", &self.encoding)
            .field("analyzer", &self.analyzer.is_some())
            .field("keep_stream_open", &self.keep_stream_open)
            .finish()
    }
}

/// A buffered, endian-aware reader over a seekable byte source.
///
/// See the [module documentation](self) for the region view and failure semantics.
pub struct EndianReader<S: Read + Seek> {
    stream: Option<S>,
    buffer: Vec<u8>,
    encoding: TextEncoding,
    region: Option<RegionRange>,
    analyzer: Option<Box<dyn Analyzer>>,
    keep_stream_open: bool,
}

impl<S: Read + Seek> EndianReader<S> {
    /// Creates a reader with default options (UTF-8, no analyzer, stream owned by the reader).
    pub fn new(stream: S) -> Self {
        EndianReader {
            stream: Some(stream),
            buffer: vec![0u8; DEFAULT_BUFFER_SIZE],
            encoding: TextEncoding::default(),
            region: None,
            analyzer: None,
            keep_stream_open: false,
        }
    }

    /// Creates a reader with the provided options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the stream length cannot be determined for the
    /// analyzer's initialization.
    pub fn with_options(stream: S, options: ReaderOptions) -> Result<Self> {
        let mut reader = EndianReader {
            stream: Some(stream),
            buffer: vec![0u8; options.buffer_size.max(MIN_BUFFER_SIZE)],
            encoding: options.encoding,
            region: None,
            analyzer: None,
            keep_stream_open: options.keep_stream_open,
        };

        if let Some(analyzer) = options.analyzer {
            reader.set_analyzer(analyzer)?;
        }

        Ok(reader)
    }

    /// Attaches (or replaces) the read hook and initializes it with the stream length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error from the length query.
    pub fn set_analyzer(&mut self, mut analyzer: Box<dyn Analyzer>) -> Result<()> {
        analyzer.initialize(self.actual_length()?);
        self.analyzer = Some(analyzer);
        Ok(())
    }

    /// Detaches the read hook.
    pub fn take_analyzer(&mut self) -> Option<Box<dyn Analyzer>> {
        self.analyzer.take()
    }

    /// Returns the encoding used for string fields.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Returns `true` once the reader has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.stream.is_none()
    }

    /// Releases the underlying stream.
    ///
    /// The stream is returned if the reader was configured to keep it open and dropped
    /// otherwise. Every later operation on this reader fails with [`crate::Error::Disposed`].
    pub fn dispose(&mut self) -> Option<S> {
        self.region = None;
        let stream = self.stream.take();
        if self.keep_stream_open {
            stream
        } else {
            None
        }
    }

    /// Consumes the reader and returns the underlying stream.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] if the stream was already released.
    pub fn into_inner(mut self) -> Result<S> {
        self.stream.take().ok_or(Error::Disposed)
    }

    fn stream_mut(&mut self) -> Result<&mut S> {
        self.stream.as_mut().ok_or(Error::Disposed)
    }

    /// Absolute position in the underlying stream, ignoring any region view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn actual_position(&mut self) -> Result<u64> {
        Ok(self.stream_mut()?.stream_position()?)
    }

    /// Length of the underlying stream, ignoring any region view.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn actual_length(&mut self) -> Result<u64> {
        let stream = self.stream_mut()?;
        let position = stream.stream_position()?;
        let length = stream.seek(SeekFrom::End(0))?;
        if position != length {
            stream.seek(SeekFrom::Start(position))?;
        }
        Ok(length)
    }

    /// Current position, relative to the region start if a region view is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn position(&mut self) -> Result<i64> {
        let actual = self.actual_position()? as i64;
        Ok(match self.region {
            Some(region) => actual - region.start,
            None => actual,
        })
    }

    /// Moves the cursor, relative to the region start if a region view is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if the resulting absolute position is
    /// negative, [`crate::Error::Disposed`] or an I/O error.
    pub fn set_position(&mut self, position: i64) -> Result<()> {
        let actual = match self.region {
            Some(region) => region.start.checked_add(position),
            None => Some(position),
        };

        let Some(actual) = actual.and_then(|value| u64::try_from(value).ok()) else {
            return Err(Error::InvalidArgument(format!(
                "cannot seek to position {position}"
            )));
        };

        self.stream_mut()?.seek(SeekFrom::Start(actual))?;
        Ok(())
    }

    /// Moves the cursor by `offset` bytes.
    ///
    /// # Errors
    ///
    /// See [`EndianReader::set_position`].
    pub fn skip(&mut self, offset: i64) -> Result<()> {
        let position = self.position()?;
        self.set_position(position.saturating_add(offset))
    }

    /// Length of the data, which is the region size if a region view is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn length(&mut self) -> Result<i64> {
        match self.region {
            Some(region) => {
                self.stream_mut()?;
                Ok(region.size)
            }
            None => Ok(self.actual_length()? as i64),
        }
    }

    /// Number of bytes between the cursor and the end of the data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn remaining(&mut self) -> Result<i64> {
        let length = self.length()?;
        let position = self.position()?;
        Ok((length - position).max(0))
    }

    /// Returns `true` if the reader is open and the cursor is before the end of the data.
    pub fn can_read_data(&mut self) -> bool {
        if self.is_disposed() {
            return false;
        }

        matches!(self.remaining(), Ok(remaining) if remaining > 0)
    }

    /// Enables a region view and moves the cursor to its start.
    ///
    /// A previously enabled view is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn enable_region_view(&mut self, region: RegionRange) -> Result<()> {
        self.stream_mut()?;
        self.region = Some(region);
        self.set_position(0)
    }

    /// Disables the region view. The cursor keeps its absolute position.
    pub fn disable_region_view(&mut self) {
        self.region = None;
    }

    /// Returns the active region view.
    #[must_use]
    pub fn region_view(&self) -> Option<RegionRange> {
        self.region
    }

    /// Returns `true` if a region view is active.
    #[must_use]
    pub fn is_region_view_enabled(&self) -> bool {
        self.region.is_some()
    }

    /// Grows the internal buffer to at least `size` bytes. Never shrinks it.
    pub fn ensure_buffer_size(&mut self, size: usize) {
        if self.buffer.len() < size {
            self.buffer.resize(size, 0);
        }
    }

    /// The internal scratch buffer.
    #[must_use]
    pub fn internal_buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Reads up to `buffer.len()` bytes and returns how many were read.
    ///
    /// Returns 0 at the end of data (or the end of the active region). The analyzer, if any,
    /// is invoked with the filled part of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut limit = buffer.len();
        if self.region.is_some() {
            let remaining = usize::try_from(self.remaining()?).unwrap_or(usize::MAX);
            limit = limit.min(remaining);
        }

        let start = if self.analyzer.is_some() {
            self.actual_position()?
        } else {
            0
        };

        let stream = self.stream.as_mut().ok_or(Error::Disposed)?;
        let mut total = 0;
        while total < limit {
            match stream.read(&mut buffer[total..limit]) {
                Ok(0) => break,
                Ok(read) => total += read,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(Error::FileError(error)),
            }
        }

        if total > 0 {
            if let Some(analyzer) = self.analyzer.as_mut() {
                analyzer.analyze_read_bytes(start, &mut buffer[..total]);
            }
        }

        Ok(total)
    }

    /// Reads exactly `buffer.len()` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if fewer bytes are available.
    pub fn read_exactly(&mut self, buffer: &mut [u8]) -> Result<()> {
        if self.read(buffer)? < buffer.len() {
            return Err(Error::EndOfData);
        }
        Ok(())
    }

    /// Reads exactly `count` bytes into the internal buffer at `offset`, growing it if needed.
    ///
    /// Decode the result with [`EndianReader::buffer_value_at`] or
    /// [`EndianReader::buffer_sha1_at`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if fewer bytes are available.
    pub fn read_in_internal_buffer(&mut self, count: usize, offset: usize) -> Result<()> {
        let Some(end) = offset.checked_add(count) else {
            return Err(out_of_bounds_error!());
        };

        self.ensure_buffer_size(end);
        let mut buffer = mem::take(&mut self.buffer);
        let result = self.read_exactly(&mut buffer[offset..end]);
        self.buffer = buffer;
        result
    }

    /// Decodes a value from the internal buffer at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the value exceeds the internal buffer.
    pub fn buffer_value_at<T: EndianIO>(&self, offset: usize, endian: EndianType) -> Result<T> {
        let mut offset = offset;
        read_at(&self.buffer, &mut offset, endian)
    }

    /// Decodes a [`Sha1`] from the internal buffer at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the hash exceeds the internal buffer.
    pub fn buffer_sha1_at(&self, offset: usize) -> Result<Sha1> {
        match self.buffer.get(offset..) {
            Some(data) if data.len() >= Sha1::STRUCT_SIZE => Ok(Sha1::from_buffer(data)),
            _ => Err(out_of_bounds_error!()),
        }
    }

    /// Reads any [`EndianIO`] value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_value<T: EndianIO>(&mut self, endian: EndianType) -> Result<T> {
        self.read_in_internal_buffer(T::SIZE, 0)?;
        Ok(decode(&self.buffer, endian))
    }

    /// Reads a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] at the end of data.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_value(EndianType::Little)
    }

    /// Reads a single signed byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] at the end of data.
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_value(EndianType::Little)
    }

    /// Reads a byte and interprets any non-zero value as `true`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] at the end of data.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a single byte, returning `None` at the end of data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn read_byte_safe(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        Ok(match self.read(&mut byte)? {
            0 => None,
            _ => Some(byte[0]),
        })
    }

    /// Reads a 16-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_i16(&mut self, endian: EndianType) -> Result<i16> {
        self.read_value(endian)
    }

    /// Reads a 16-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_u16(&mut self, endian: EndianType) -> Result<u16> {
        self.read_value(endian)
    }

    /// Reads a 32-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_i32(&mut self, endian: EndianType) -> Result<i32> {
        self.read_value(endian)
    }

    /// Reads a 32-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_u32(&mut self, endian: EndianType) -> Result<u32> {
        self.read_value(endian)
    }

    /// Reads a 64-bit signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_i64(&mut self, endian: EndianType) -> Result<i64> {
        self.read_value(endian)
    }

    /// Reads a 64-bit unsigned integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_u64(&mut self, endian: EndianType) -> Result<u64> {
        self.read_value(endian)
    }

    /// Reads a 32-bit float.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_f32(&mut self, endian: EndianType) -> Result<f32> {
        self.read_value(endian)
    }

    /// Reads a 64-bit float.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_f64(&mut self, endian: EndianType) -> Result<f64> {
        self.read_value(endian)
    }

    /// Reads a 16-byte GUID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_guid(&mut self, endian: EndianType) -> Result<Guid> {
        self.read_value(endian)
    }

    /// Reads a 20-byte [`Sha1`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the value is truncated.
    pub fn read_sha1(&mut self) -> Result<Sha1> {
        self.read_in_internal_buffer(Sha1::STRUCT_SIZE, 0)?;
        Ok(Sha1::from_buffer(&self.buffer))
    }

    /// Reads up to `count` bytes. The result is shorter at the end of data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let available = usize::try_from(self.remaining()?).unwrap_or(usize::MAX);
        let mut result = vec![0u8; count.min(available)];
        let read = self.read(&mut result)?;
        result.truncate(read);
        Ok(result)
    }

    /// Reads every byte between the cursor and the end of data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn read_until_end(&mut self) -> Result<Vec<u8>> {
        let remaining = usize::try_from(self.remaining()?).unwrap_or(usize::MAX);
        self.read_bytes(remaining)
    }

    /// Moves the cursor forward to the next multiple of `alignment` (a power of two).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error.
    pub fn read_alignment(&mut self, alignment: i64) -> Result<()> {
        let position = self.position()?;
        self.set_position(apply_alignment(position, alignment))
    }

    /// Streams every remaining byte into `sink` and returns how many were copied.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`] or an I/O error from either side.
    pub fn copy_to<W: Write>(&mut self, sink: &mut W) -> Result<u64> {
        let mut buffer = mem::take(&mut self.buffer);
        let mut total = 0u64;
        let result = loop {
            match self.read(&mut buffer) {
                Ok(0) => break Ok(total),
                Ok(read) => {
                    if let Err(error) = sink.write_all(&buffer[..read]) {
                        break Err(Error::FileError(error));
                    }
                    total += read as u64;
                }
                Err(error) => break Err(error),
            }
        };
        self.buffer = buffer;
        result
    }

    /// Streams exactly `length` bytes into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if fewer bytes are available.
    pub fn copy_to_len<W: Write>(&mut self, sink: &mut W, length: u64) -> Result<()> {
        let mut buffer = mem::take(&mut self.buffer);
        let mut left = length;
        let result = loop {
            if left == 0 {
                break Ok(());
            }

            let wanted = usize::try_from(left).map_or(buffer.len(), |left| left.min(buffer.len()));
            match self.read(&mut buffer[..wanted]) {
                Ok(0) => break Err(Error::EndOfData),
                Ok(read) => {
                    if let Err(error) = sink.write_all(&buffer[..read]) {
                        break Err(Error::FileError(error));
                    }
                    left -= read as u64;
                }
                Err(error) => break Err(error),
            }
        };
        self.buffer = buffer;
        result
    }

    /// Reads a .NET style 7-bit encoded 32-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the encoding spans more than 5 bytes or the
    /// fifth byte carries more than the remaining 4 bits, [`crate::Error::EndOfData`] if the
    /// data ends inside the value.
    pub fn read_7bit_encoded_int(&mut self) -> Result<i32> {
        let mut result = 0u32;
        for index in 0..5 {
            let byte = self.read_u8()?;
            if index == 4 && byte > 0x0F {
                return Err(malformed_error!("7-bit encoded int exceeds 32 bits"));
            }

            result |= u32::from(byte & 0x7F) << (index * 7);
            if byte & 0x80 == 0 {
                return Ok(result as i32);
            }
        }

        Err(malformed_error!("7-bit encoded int is longer than 5 bytes"))
    }

    /// Reads a .NET style 7-bit encoded 64-bit integer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the encoding spans more than 10 bytes or the
    /// tenth byte carries more than the remaining bit, [`crate::Error::EndOfData`] if the data
    /// ends inside the value.
    pub fn read_7bit_encoded_long(&mut self) -> Result<i64> {
        let mut result = 0u64;
        for index in 0..10 {
            let byte = self.read_u8()?;
            if index == 9 && byte > 0x01 {
                return Err(malformed_error!("7-bit encoded long exceeds 64 bits"));
            }

            result |= u64::from(byte & 0x7F) << (index * 7);
            if byte & 0x80 == 0 {
                return Ok(result as i64);
            }
        }

        Err(malformed_error!("7-bit encoded long is longer than 10 bytes"))
    }

    /// Reads a zero-terminated string.
    ///
    /// The terminator is consumed but not returned. A string that runs into the end of data
    /// without a terminator is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if no data at all is available, and
    /// [`crate::Error::Malformed`] if the bytes are invalid in the reader's encoding.
    pub fn read_cstring(&mut self) -> Result<String> {
        let mut bytes = Vec::new();

        loop {
            match self.read_byte_safe()? {
                Some(0) => break,
                Some(byte) => bytes.push(byte),
                None if bytes.is_empty() => return Err(Error::EndOfData),
                None => break,
            }
        }

        self.encoding.decode(&bytes)
    }

    /// Reads a string stored in a fixed-size field of `size` bytes, ending at the first zero byte.
    ///
    /// With `adjust_position` the cursor always lands `size` bytes past the field start, even
    /// if the terminator came early. Without it the cursor lands right after the terminator
    /// (or at the field end if there is none).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EndOfData`] if the data ends before a terminator or the field
    /// end was reached.
    pub fn read_sized_cstring(&mut self, size: usize, adjust_position: bool) -> Result<String> {
        let mut bytes = Vec::new();
        let mut consumed = 0usize;

        while consumed < size {
            let Some(byte) = self.read_byte_safe()? else {
                return Err(Error::EndOfData);
            };
            consumed += 1;

            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }

        // Rest of the field is skipped, not read, so the analyzer never sees it
        if adjust_position && consumed < size {
            self.skip((size - consumed) as i64)?;
        }

        self.encoding.decode(&bytes)
    }

    /// Reads a string prefixed with its 7-bit encoded byte length.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for a negative length and
    /// [`crate::Error::EndOfData`] if the string is truncated.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_7bit_encoded_int()?;
        let Ok(length) = usize::try_from(length) else {
            return Err(malformed_error!("Negative string length {}", length));
        };

        let mut bytes = Vec::with_capacity(length.min(0x1000));
        let mut chunk = [0u8; STRING_CHUNK_SIZE];
        while bytes.len() < length {
            let wanted = (length - bytes.len()).min(STRING_CHUNK_SIZE);
            self.read_exactly(&mut chunk[..wanted])?;
            bytes.extend_from_slice(&chunk[..wanted]);
        }

        self.encoding.decode(&bytes)
    }

    /// Reads a line terminated by CR, LF, CRLF or the end of data.
    ///
    /// Returns `None` if no data is left.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Disposed`], an I/O error, or [`crate::Error::Malformed`] if the
    /// bytes are invalid in the reader's encoding.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        if self.remaining()? == 0 {
            return Ok(None);
        }

        let mut bytes = Vec::new();
        while let Some(byte) = self.read_byte_safe()? {
            match byte {
                b'\n' => break,
                b'\r' => {
                    if self.peek_byte()? == Some(b'\n') {
                        self.read_byte_safe()?;
                    }
                    break;
                }
                _ => bytes.push(byte),
            }
        }

        self.encoding.decode(&bytes).map(Some)
    }

    /// Looks at the next byte without consuming it. The analyzer is not invoked.
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        let analyzer = self.analyzer.take();
        let peeked = self.read_byte_safe();
        self.analyzer = analyzer;

        let peeked = peeked?;
        if peeked.is_some() {
            self.skip(-1)?;
        }
        Ok(peeked)
    }

    /// Scans forward from the cursor for a hex byte pattern with `??` wildcards.
    ///
    /// Returns the positions (in the reader's coordinates) of at most `max_count` matches that
    /// start at or before `max_address`. The data is fetched in 1 MiB chunks, overlapping so
    /// that matches crossing a chunk boundary are found. After a match the scan resumes right
    /// behind it. The cursor is restored afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if the pattern cannot be parsed or starts with
    /// a wildcard.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bundlescope::io::EndianReader;
    /// use std::io::Cursor;
    ///
    /// let data = vec![0x00, 0xDE, 0xAD, 0x01, 0xEF, 0xDE, 0xAD, 0x02, 0xEF];
    /// let mut reader = EndianReader::new(Cursor::new(data));
    ///
    /// let hits = reader.scan_signatures("DE AD ?? EF", usize::MAX, None)?;
    /// assert_eq!(hits, vec![1, 5]);
    /// # Ok::<(), bundlescope::Error>(())
    /// ```
    pub fn scan_signatures(
        &mut self,
        pattern: &str,
        max_count: usize,
        max_address: Option<i64>,
    ) -> Result<Vec<i64>> {
        let pattern = SignaturePattern::parse(pattern)?;
        let start = self.position()?;
        let max_address = max_address.unwrap_or(i64::MAX);

        let mut results = Vec::new();
        if max_count == 0 {
            return Ok(results);
        }

        let chunk_size = usize::try_from(self.remaining()?)
            .unwrap_or(usize::MAX)
            .clamp(pattern.len(), SCAN_CHUNK_SIZE.max(pattern.len()));
        let mut chunk = vec![0u8; chunk_size];
        let mut chunk_position = start;

        'scan: loop {
            self.set_position(chunk_position)?;
            let read = self.read(&mut chunk)?;
            if read < pattern.len() {
                break;
            }

            let last = read - pattern.len();
            let mut index = 0;
            while index <= last {
                let address = chunk_position + index as i64;
                if address > max_address {
                    break 'scan;
                }

                if pattern.matches_at(&chunk[index..read]) {
                    results.push(address);
                    if results.len() >= max_count {
                        break 'scan;
                    }
                    index += pattern.len();
                } else {
                    index += 1;
                }
            }

            if read < chunk.len() {
                break;
            }
            chunk_position += index as i64;
        }

        self.set_position(start)?;
        Ok(results)
    }
}

impl<S: Read + Seek> fmt::Debug for EndianReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndianReader")
            .field("disposed", &self.stream.is_none())
            .field("buffer_size", &self.buffer.len())
            .field("encoding", &self.encoding)
            .field("region", &self.region)
            .field("analyzer", &self.analyzer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::io::writer::EndianWriter;

    fn open_reader(data: Vec<u8>) -> EndianReader<Cursor<Vec<u8>>> {
        EndianReader::new(Cursor::new(data))
    }

    fn written(build: impl FnOnce(&mut EndianWriter<Cursor<Vec<u8>>>)) -> Vec<u8> {
        let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
        build(&mut writer);
        writer.into_inner().unwrap().into_inner()
    }

    struct Xor(u8);

    impl Analyzer for Xor {
        fn analyze_read_bytes(&mut self, _position: u64, buffer: &mut [u8]) {
            for byte in buffer.iter_mut() {
                *byte ^= self.0;
            }
        }
    }

    #[test]
    fn primitives() {
        let data = written(|writer| {
            writer
                .write_i16(-2, EndianType::Big)
                .unwrap()
                .write_u32(0xDEAD_BEEF, EndianType::Little)
                .unwrap()
                .write_i64(i64::MIN, EndianType::Big)
                .unwrap()
                .write_f32(30.0, EndianType::Big)
                .unwrap()
                .write_f64(-1.5, EndianType::Little)
                .unwrap()
                .write_bool(true)
                .unwrap();
        });

        let mut reader = open_reader(data);
        assert_eq!(reader.read_i16(EndianType::Big).unwrap(), -2);
        assert_eq!(reader.read_u32(EndianType::Little).unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_i64(EndianType::Big).unwrap(), i64::MIN);
        assert_eq!(reader.read_f32(EndianType::Big).unwrap(), 30.0);
        assert_eq!(reader.read_f64(EndianType::Little).unwrap(), -1.5);
        assert!(reader.read_bool().unwrap());
        assert!(!reader.can_read_data());
        assert!(matches!(reader.read_u8(), Err(Error::EndOfData)));
    }

    #[test]
    fn partial_and_exact_reads() {
        let mut reader = open_reader(vec![1, 2, 3]);
        let mut buffer = [0u8; 8];
        assert_eq!(reader.read(&mut buffer).unwrap(), 3);
        assert_eq!(reader.read(&mut buffer).unwrap(), 0);

        reader.set_position(1).unwrap();
        assert!(matches!(
            reader.read_exactly(&mut buffer[..3]),
            Err(Error::EndOfData)
        ));

        reader.set_position(0).unwrap();
        assert_eq!(reader.read_bytes(10).unwrap(), vec![1, 2, 3]);
        assert_eq!(reader.read_byte_safe().unwrap(), None);
    }

    #[test]
    fn region_view_basic() {
        let mut reader = open_reader(vec![0u8; 200]);
        reader.set_position(100).unwrap();

        reader
            .enable_region_view(RegionRange::new(100, 100).unwrap())
            .unwrap();
        assert!(reader.is_region_view_enabled());
        assert_eq!(reader.position().unwrap(), 0);

        reader.skip(50).unwrap();
        assert_eq!(reader.position().unwrap(), 50);
        reader.skip(50).unwrap();
        assert_eq!(reader.length().unwrap(), 100);

        reader.disable_region_view();
        assert_eq!(reader.position().unwrap(), 200);
        assert_eq!(reader.length().unwrap(), 200);
    }

    #[test]
    fn region_view_strings() {
        const TEXT: &str = "someTestString";

        let data = written(|writer| {
            writer
                .write_bytes(&[0u8; 20])
                .unwrap()
                .write_cstring(TEXT)
                .unwrap()
                .write_cstring(&format!("{TEXT}28"))
                .unwrap()
                .write_sized_cstring(TEXT, 40)
                .unwrap();
        });

        let mut reader = open_reader(data);
        let size = reader.length().unwrap() - 20;
        reader
            .enable_region_view(RegionRange::new(20, size).unwrap())
            .unwrap();

        assert_eq!(reader.actual_position().unwrap(), 20);
        assert_eq!(reader.position().unwrap(), 0);
        assert_eq!(
            reader.length().unwrap(),
            (TEXT.len() * 2 + 2 + 2 + 40) as i64
        );

        assert_eq!(reader.read_cstring().unwrap(), TEXT);
        assert_eq!(reader.read_cstring().unwrap(), format!("{TEXT}28"));
        assert_eq!(reader.read_sized_cstring(40, true).unwrap(), TEXT);
        assert!(!reader.can_read_data());
    }

    #[test]
    fn region_view_clamps_reads() {
        let mut reader = open_reader((0u8..32).collect());
        reader
            .enable_region_view(RegionRange::new(4, 4).unwrap())
            .unwrap();

        assert_eq!(reader.read_until_end().unwrap(), vec![4, 5, 6, 7]);
        assert!(matches!(reader.read_u8(), Err(Error::EndOfData)));
        assert_eq!(reader.actual_position().unwrap(), 8);
    }

    #[test]
    fn region_range_validation() {
        assert!(RegionRange::new(-1, 4).is_err());
        assert!(RegionRange::new(0, -4).is_err());
        assert_eq!(RegionRange::new(8, 4).unwrap().end(), 12);
    }

    #[test]
    fn sized_strings() {
        const SIZE: usize = 32;
        let data = written(|writer| {
            writer
                .write_sized_cstring("first", SIZE)
                .unwrap()
                .write_sized_cstring("second", SIZE)
                .unwrap();
        });

        let mut reader = open_reader(data);
        assert_eq!(reader.read_sized_cstring(SIZE, true).unwrap(), "first");
        assert_eq!(reader.read_sized_cstring(SIZE, true).unwrap(), "second");
        assert_eq!(reader.actual_position().unwrap(), (SIZE * 2) as u64);
    }

    #[test]
    fn sized_string_without_adjustment() {
        let mut reader = open_reader(b"ab\0cdefgh".to_vec());
        assert_eq!(reader.read_sized_cstring(9, false).unwrap(), "ab");
        assert_eq!(reader.position().unwrap(), 3);

        // No terminator inside the field
        let mut reader = open_reader(b"abcdef".to_vec());
        assert_eq!(reader.read_sized_cstring(4, false).unwrap(), "abcd");
        assert_eq!(reader.position().unwrap(), 4);
    }

    #[test]
    fn sized_string_leading_terminator() {
        let mut reader = open_reader(b"\0abcdefg".to_vec());
        assert_eq!(reader.read_sized_cstring(8, true).unwrap(), "");
        assert_eq!(reader.position().unwrap(), 8);
    }

    #[test]
    fn sized_string_larger_than_chunk() {
        let text = "x".repeat(300);
        let data = written(|writer| {
            writer.write_sized_cstring(&text, 400).unwrap();
        });

        let mut reader = open_reader(data);
        assert_eq!(reader.read_sized_cstring(400, true).unwrap(), text);
        assert_eq!(reader.position().unwrap(), 400);
    }

    #[test]
    fn cstring_contract() {
        let mut reader = open_reader(b"\0tail".to_vec());
        assert_eq!(reader.read_cstring().unwrap(), "");
        assert_eq!(reader.position().unwrap(), 1);
        assert_eq!(reader.read_cstring().unwrap(), "tail");

        assert!(matches!(reader.read_cstring(), Err(Error::EndOfData)));
    }

    #[test]
    fn cstring_long() {
        let text = "y".repeat(1000);
        let data = written(|writer| {
            writer.write_cstring(&text).unwrap().write_u8(7).unwrap();
        });

        let mut reader = open_reader(data);
        assert_eq!(reader.read_cstring().unwrap(), text);
        assert_eq!(reader.read_u8().unwrap(), 7);
    }

    #[test]
    fn prefixed_strings() {
        let long = "z".repeat(500);
        let data = written(|writer| {
            writer
                .write_string("")
                .unwrap()
                .write_string("größe")
                .unwrap()
                .write_string(&long)
                .unwrap();
        });

        let mut reader = open_reader(data);
        assert_eq!(reader.read_string().unwrap(), "");
        assert_eq!(reader.read_string().unwrap(), "größe");
        assert_eq!(reader.read_string().unwrap(), long);
    }

    #[test]
    fn prefixed_string_errors() {
        // -1 as a 7-bit encoded int
        let mut reader = open_reader(vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
        assert!(matches!(reader.read_string(), Err(Error::Malformed { .. })));

        let mut reader = open_reader(vec![0x05, b'a', b'b']);
        assert!(matches!(reader.read_string(), Err(Error::EndOfData)));
    }

    #[test]
    fn lines() {
        let mut reader = open_reader(b"one\r\ntwo\nthree\rfour\n\r\nlast".to_vec());
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("one"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("two"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("three"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("four"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn seven_bit_values() {
        let ints = [0, 1, 127, 128, 300, 16_383, 16_384, i32::MAX, -1, i32::MIN];
        let longs = [0, 1, 128, i64::from(u32::MAX) + 1, i64::MAX, -1, i64::MIN];
        let data = written(|writer| {
            for value in ints {
                writer.write_7bit_encoded_int(value).unwrap();
            }
            for value in longs {
                writer.write_7bit_encoded_long(value).unwrap();
            }
        });

        let mut reader = open_reader(data);
        for value in ints {
            assert_eq!(reader.read_7bit_encoded_int().unwrap(), value);
        }
        for value in longs {
            assert_eq!(reader.read_7bit_encoded_long().unwrap(), value);
        }
    }

    #[test]
    fn seven_bit_bounds() {
        let mut reader = open_reader(vec![0xFF; 16]);
        assert!(matches!(
            reader.read_7bit_encoded_int(),
            Err(Error::Malformed { .. })
        ));

        let mut reader = open_reader(vec![0xFF; 16]);
        assert!(matches!(
            reader.read_7bit_encoded_long(),
            Err(Error::Malformed { .. })
        ));

        let mut reader = open_reader(vec![0x80, 0x80]);
        assert!(matches!(
            reader.read_7bit_encoded_int(),
            Err(Error::EndOfData)
        ));
    }

    #[test]
    fn analyzer_transforms_reads() {
        let options = ReaderOptions::default().with_analyzer(Box::new(Xor(0xAA)));
        let mut reader = EndianReader::with_options(
            Cursor::new(vec![0xAA ^ 0x34, 0xAA ^ 0x12, 0xAA ^ b'h', 0xAA ^ b'i', 0xAA]),
            options,
        )
        .unwrap();

        assert_eq!(reader.read_u16(EndianType::Little).unwrap(), 0x1234);
        assert_eq!(reader.read_cstring().unwrap(), "hi");
        assert!(reader.take_analyzer().is_some());
    }

    #[test]
    fn analyzer_receives_positions() {
        struct Recorder(std::rc::Rc<std::cell::RefCell<Vec<(u64, usize)>>>);

        impl Analyzer for Recorder {
            fn initialize(&mut self, length: u64) {
                self.0.borrow_mut().push((length, 0));
            }

            fn analyze_read_bytes(&mut self, position: u64, buffer: &mut [u8]) {
                self.0.borrow_mut().push((position, buffer.len()));
            }
        }

        let calls = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let options = ReaderOptions::default().with_analyzer(Box::new(Recorder(calls.clone())));
        let mut reader = EndianReader::with_options(Cursor::new(vec![0u8; 16]), options).unwrap();

        reader.read_u32(EndianType::Little).unwrap();
        reader.read_u64(EndianType::Little).unwrap();

        assert_eq!(*calls.borrow(), vec![(16, 0), (0, 4), (4, 8)]);
    }

    #[test]
    fn analyzer_sees_string_bytes_once() {
        struct Counter(std::rc::Rc<std::cell::RefCell<Vec<u64>>>);

        impl Analyzer for Counter {
            fn analyze_read_bytes(&mut self, position: u64, buffer: &mut [u8]) {
                let mut seen = self.0.borrow_mut();
                seen.extend((0..buffer.len() as u64).map(|index| position + index));
            }
        }

        let data = b"ab\0cd\rxy\r\nz\0\0\0\0tail".to_vec();
        let length = data.len() as u64;
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let options = ReaderOptions::default().with_analyzer(Box::new(Counter(seen.clone())));
        let mut reader = EndianReader::with_options(Cursor::new(data), options).unwrap();

        assert_eq!(reader.read_cstring().unwrap(), "ab");
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("cd"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("xy"));
        assert_eq!(reader.read_sized_cstring(4, false).unwrap(), "z");
        assert_eq!(reader.position().unwrap(), 12);
        assert_eq!(reader.read_sized_cstring(3, true).unwrap(), "");
        assert_eq!(reader.position().unwrap(), 15);
        assert_eq!(reader.read_cstring().unwrap(), "tail");

        // Every position once, except the two padding bytes skipped by the sized field
        let expected: Vec<u64> = (0..length).filter(|&at| at != 13 && at != 14).collect();
        assert_eq!(*seen.borrow(), expected);
    }

    #[test]
    fn internal_buffer_access() {
        let data = written(|writer| {
            writer
                .write_u32(0x0102_0304, EndianType::Big)
                .unwrap()
                .write_sha1(&Sha1::from_words(1, 2, 3, 4, 5))
                .unwrap();
        });

        let mut reader = open_reader(data);
        reader.read_in_internal_buffer(24, 8).unwrap();
        assert!(reader.internal_buffer().len() >= 32);
        assert_eq!(
            reader.buffer_value_at::<u32>(8, EndianType::Big).unwrap(),
            0x0102_0304
        );
        assert_eq!(
            reader.buffer_sha1_at(12).unwrap(),
            Sha1::from_words(1, 2, 3, 4, 5)
        );
        assert!(reader
            .buffer_value_at::<u64>(reader.internal_buffer().len() - 4, EndianType::Big)
            .is_err());
    }

    #[test]
    fn buffer_never_shrinks() {
        let options = ReaderOptions::default().with_buffer_size(4);
        let mut reader = EndianReader::with_options(Cursor::new(Vec::new()), options).unwrap();
        assert_eq!(reader.internal_buffer().len(), MIN_BUFFER_SIZE);

        reader.ensure_buffer_size(64);
        assert_eq!(reader.internal_buffer().len(), 64);
        reader.ensure_buffer_size(32);
        assert_eq!(reader.internal_buffer().len(), 64);
    }

    #[test]
    fn alignment_and_copy() {
        let mut reader = open_reader((0u8..64).collect());
        reader.set_position(3).unwrap();
        reader.read_alignment(16).unwrap();
        assert_eq!(reader.position().unwrap(), 16);

        let mut sink = Vec::new();
        reader.copy_to_len(&mut sink, 8).unwrap();
        assert_eq!(sink, (16u8..24).collect::<Vec<_>>());

        let mut rest = Vec::new();
        assert_eq!(reader.copy_to(&mut rest).unwrap(), 40);
        assert!(matches!(
            reader.copy_to_len(&mut rest, 1),
            Err(Error::EndOfData)
        ));
    }

    #[test]
    fn dispose() {
        let mut reader = open_reader(vec![1, 2, 3]);
        assert!(reader.dispose().is_none());
        assert!(reader.is_disposed());
        assert!(!reader.can_read_data());
        assert!(matches!(reader.read_u8(), Err(Error::Disposed)));
        assert!(matches!(reader.position(), Err(Error::Disposed)));
        assert!(matches!(reader.read_line(), Err(Error::Disposed)));

        let options = ReaderOptions::default().with_keep_stream_open(true);
        let mut reader = EndianReader::with_options(Cursor::new(vec![1, 2, 3]), options).unwrap();
        reader.read_u8().unwrap();
        let stream = reader.dispose().unwrap();
        assert_eq!(stream.position(), 1);
    }

    #[test]
    fn scan_across_chunk_boundary() {
        let mut data = vec![0u8; SCAN_CHUNK_SIZE + 16];
        let at = SCAN_CHUNK_SIZE - 2;
        data[at..at + 4].copy_from_slice(&[0x4D, 0x5A, 0x90, 0x00]);
        data[10..14].copy_from_slice(&[0x4D, 0x5A, 0x11, 0x00]);

        let mut reader = open_reader(data);
        let hits = reader.scan_signatures("4D 5A ?? 00", usize::MAX, None).unwrap();
        assert_eq!(hits, vec![10, at as i64]);
        assert_eq!(reader.position().unwrap(), 0);

        let hits = reader.scan_signatures("4D5A??00", 1, None).unwrap();
        assert_eq!(hits, vec![10]);

        let hits = reader.scan_signatures("4D5A??00", 10, Some(9)).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn scan_respects_cursor_and_region() {
        let mut data = vec![0u8; 64];
        data[5] = 0xAB;
        data[40] = 0xAB;

        let mut reader = open_reader(data);
        reader.set_position(10).unwrap();
        assert_eq!(
            reader.scan_signatures("AB", usize::MAX, None).unwrap(),
            vec![40]
        );

        reader
            .enable_region_view(RegionRange::new(32, 16).unwrap())
            .unwrap();
        assert_eq!(
            reader.scan_signatures("AB", usize::MAX, None).unwrap(),
            vec![8]
        );
    }

    #[test]
    fn scan_rejects_leading_wildcard() {
        let mut reader = open_reader(vec![0u8; 8]);
        assert!(matches!(
            reader.scan_signatures("?? 00", 1, None),
            Err(Error::InvalidPattern(_))
        ));
    }
}
