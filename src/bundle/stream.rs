use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::io::StreamView;

/// The bytes of one bundle entry, as returned by [`crate::SingleFileBundle::get_stream`].
///
/// Entries with a pending replacement are served as a [`StreamView`] over the replacement
/// buffer. Entries read from the host binary are copied (or inflated) into an owned buffer,
/// so the stream never outlives a borrow of the mapping.
#[derive(Debug)]
pub enum EntryStream<'a> {
    /// Window over an in-memory replacement
    Modified(StreamView<&'a mut Cursor<Vec<u8>>>),
    /// Plain bytes read from the host binary
    Buffered(Cursor<Vec<u8>>),
}

impl EntryStream<'_> {
    /// Number of plain bytes in the stream.
    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            EntryStream::Modified(view) => view.len(),
            EntryStream::Buffered(cursor) => cursor.get_ref().len() as u64,
        }
    }

    /// Returns `true` if the entry holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the remaining bytes into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the underlying stream.
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        match self {
            EntryStream::Buffered(cursor) if cursor.position() == 0 => return Ok(cursor.into_inner()),
            EntryStream::Buffered(mut cursor) => cursor.read_to_end(&mut data)?,
            EntryStream::Modified(mut view) => view.read_to_end(&mut data)?,
        };
        Ok(data)
    }
}

impl Read for EntryStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            EntryStream::Modified(view) => view.read(buf),
            EntryStream::Buffered(cursor) => cursor.read(buf),
        }
    }
}

impl Seek for EntryStream<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            EntryStream::Modified(view) => view.seek(pos),
            EntryStream::Buffered(cursor) => cursor.seek(pos),
        }
    }
}
