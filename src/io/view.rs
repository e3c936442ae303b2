//! A bounded, read-only window over a seekable stream.
//!
//! [`StreamView`] exposes `[offset, offset + length)` of a base stream as a stream of its own,
//! starting at position 0. The bundle engine uses it to hand out the bytes of a modified entry
//! without copying them.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::{Error, Result};

/// A read-only view of `[offset, offset + length)` of a base stream.
///
/// Reads are clamped to the window, seeks outside of it fail with
/// [`std::io::ErrorKind::InvalidInput`] and writes always fail with
/// [`std::io::ErrorKind::Unsupported`].
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::StreamView;
/// use std::io::{Cursor, Read};
///
/// let base = Cursor::new(b"headerPAYLOADtrailer".to_vec());
/// let mut view = StreamView::new(base, 6, 7)?;
///
/// let mut payload = String::new();
/// view.read_to_string(&mut payload)?;
/// assert_eq!(payload, "PAYLOAD");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StreamView<S: Read + Seek> {
    base: S,
    offset: u64,
    length: u64,
    position: u64,
}

impl<S: Read + Seek> StreamView<S> {
    /// Creates a view and seeks `base` to `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `offset` or `length` is negative or the
    /// window exceeds the base stream, or an I/O error from the base stream.
    pub fn new(mut base: S, offset: i64, length: i64) -> Result<Self> {
        let (Ok(offset), Ok(length)) = (u64::try_from(offset), u64::try_from(length)) else {
            return Err(Error::InvalidArgument(format!(
                "invalid stream view offset {offset} / length {length}"
            )));
        };

        let base_length = base.seek(SeekFrom::End(0))?;
        match offset.checked_add(length) {
            Some(end) if end <= base_length => {}
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "stream view {offset}+{length} exceeds base stream of {base_length} bytes"
                )))
            }
        }

        base.seek(SeekFrom::Start(offset))?;

        Ok(StreamView {
            base,
            offset,
            length,
            position: 0,
        })
    }

    /// Start of the window within the base stream.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Size of the window.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Returns `true` if the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Releases the view and returns the base stream.
    pub fn into_inner(self) -> S {
        self.base
    }
}

impl<S: Read + Seek> Read for StreamView<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.length - self.position;
        let wanted = usize::try_from(remaining).map_or(buf.len(), |left| left.min(buf.len()));
        if wanted == 0 {
            return Ok(0);
        }

        self.base
            .seek(SeekFrom::Start(self.offset + self.position))?;
        let read = self.base.read(&mut buf[..wanted])?;
        self.position += read as u64;
        Ok(read)
    }
}

impl<S: Read + Seek> Seek for StreamView<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(position) => i128::from(position),
            SeekFrom::Current(delta) => i128::from(self.position) + i128::from(delta),
            SeekFrom::End(delta) => i128::from(self.length) + i128::from(delta),
        };

        if target < 0 || target > i128::from(self.length) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("seek to {target} outside of a {} byte view", self.length),
            ));
        }

        let target = target as u64;
        self.base.seek(SeekFrom::Start(self.offset + target))?;
        self.position = target;
        Ok(target)
    }
}

impl<S: Read + Seek> Write for StreamView<S> {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::Unsupported))
    }
}
