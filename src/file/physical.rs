//! Physical file backend for memory-mapped I/O.
//!
//! This module provides the [`crate::file::Physical`] backend that implements the
//! [`crate::file::Backend`] trait for host binaries on disk. The file is mapped read-only, so
//! the signature search scans the mapping directly and pages are only loaded as they are
//! touched. Entry bytes are read straight from the mapping as well.
//!
//! A mapped host binary cannot be rewritten in place: [`crate::SingleFileBundle::save`] refuses
//! to target the file it was discovered in.

use super::{checked_slice, Backend};
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A host binary backend that uses memory-mapped I/O.
///
/// # Examples
///
/// ```rust,no_run
/// use bundlescope::file::{Backend, Physical};
///
/// let physical = Physical::new("app.exe")?;
/// println!("Host binary size: {} bytes", physical.len());
/// # Ok::<(), bundlescope::Error>(())
/// ```
#[derive(Debug)]
pub struct Physical {
    /// Memory-mapped file data
    data: Mmap,
}

impl Physical {
    /// Create a new physical file backend by memory-mapping the specified file.
    ///
    /// # Arguments
    /// * `path` - Path to the host binary on disk.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = match fs::File::open(path) {
            Ok(file) => file,
            Err(error) => return Err(FileError(error)),
        };

        Self::from_std_file(&file)
    }

    /// Creates a new physical file backend from an opened [`std::fs::File`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Error`] if memory mapping fails.
    pub fn from_std_file(file: &fs::File) -> Result<Physical> {
        // The mapping is read-only; concurrent truncation of the file by another process is
        // outside of what this crate can guard against.
        let mmap = unsafe { Mmap::map(file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        checked_slice(&self.data, offset, len)
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn physical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut content = vec![0u8; 4096];
        content[..2].copy_from_slice(b"MZ");
        content[12..17].copy_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0xB8]);
        file.write_all(&content).unwrap();
        file.flush().unwrap();

        let physical = Physical::new(file.path()).unwrap();

        assert_eq!(physical.len(), 4096);
        assert_eq!(physical.data()[0], 0x4D);
        assert_eq!(physical.data()[1], 0x5A);
        assert_eq!(
            physical.data_slice(12, 5).unwrap(),
            &[0xFF, 0xFF, 0x00, 0x00, 0xB8]
        );

        assert!(physical
            .data_slice(u32::MAX as usize, u32::MAX as usize)
            .is_err());
        assert!(physical.data_slice(0, 4097).is_err());
        assert!(matches!(
            physical.data_slice(usize::MAX, 1),
            Err(crate::Error::OutOfBounds { .. })
        ));

        let len = physical.len();
        assert_eq!(physical.data_slice(len - 1, 1).unwrap().len(), 1);
        assert_eq!(physical.data_slice(len, 0).unwrap().len(), 0);
        assert!(physical.data_slice(len, 1).is_err());
    }

    #[test]
    fn physical_invalid_file_path() {
        let result = Physical::new("/nonexistent/path/to/app.exe");
        match result {
            Err(FileError(io_error)) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected FileError, got {other:?}"),
        }
    }

    #[test]
    fn physical_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let physical = Physical::new(file.path()).unwrap();
        assert_eq!(physical.len(), 0);
        assert!(physical.is_empty());
        assert!(physical.data_slice(0, 1).is_err());
        assert!(physical.data_slice(1, 0).is_err());
        let empty_slice: &[u8] = &[];
        assert_eq!(physical.data_slice(0, 0).unwrap(), empty_slice);
    }

    #[test]
    fn physical_from_std_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAA, 0xBB, 0xCC]).unwrap();
        file.flush().unwrap();

        let std_file = fs::File::open(file.path()).unwrap();
        let physical = Physical::from_std_file(&std_file).unwrap();
        assert_eq!(physical.data(), &[0xAA, 0xBB, 0xCC]);
    }
}
