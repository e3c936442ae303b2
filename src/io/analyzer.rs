//! Read hooks for [`crate::io::EndianReader`].
//!
//! An [`Analyzer`] observes every physical read the reader performs and may rewrite the
//! freshly filled bytes in place. This allows transforms such as decryption to sit underneath
//! all typed reads without the reader knowing about them.

/// A hook invoked after every physical read.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::{Analyzer, EndianReader, ReaderOptions};
/// use std::io::Cursor;
///
/// struct Xor(u8);
///
/// impl Analyzer for Xor {
///     fn analyze_read_bytes(&mut self, _position: u64, buffer: &mut [u8]) {
///         buffer.iter_mut().for_each(|byte| *byte ^= self.0);
///     }
/// }
///
/// let options = ReaderOptions::default().with_analyzer(Box::new(Xor(0xFF)));
/// let mut reader = EndianReader::with_options(Cursor::new(vec![0xFE, 0xFF]), options)?;
/// assert_eq!(reader.read_u8()?, 0x01);
/// # Ok::<(), bundlescope::Error>(())
/// ```
pub trait Analyzer {
    /// Called once when the analyzer is attached, with the length of the underlying stream.
    fn initialize(&mut self, _length: u64) {}

    /// Called after bytes were read from the stream.
    ///
    /// `position` is the absolute stream position of `buffer[0]` and `buffer` holds exactly
    /// the bytes that were read.
    fn analyze_read_bytes(&mut self, position: u64, buffer: &mut [u8]);
}
