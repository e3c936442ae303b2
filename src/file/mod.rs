//! Host binary data sources.
//!
//! A single-file bundle lives inside an arbitrary host executable (PE, ELF or Mach-O apphost).
//! This module abstracts over where the bytes of that host come from, so that discovery and
//! entry access in [`crate::bundle`] work on a plain byte slice.
//!
//! # Key Components
//!
//! - [`Backend`] - Trait for read-only byte sources with bounds-checked slicing
//! - [`Physical`] - Memory-mapped file on disk
//! - [`Memory`] - Owned in-memory buffer
//!
//! # Examples
//!
//! ```rust
//! use bundlescope::file::{Backend, Memory};
//!
//! let backend = Memory::new(vec![0x4D, 0x5A, 0x90, 0x00]);
//! assert_eq!(backend.data_slice(0, 2)?, b"MZ");
//! assert!(backend.data_slice(2, 4).is_err());
//! # Ok::<(), bundlescope::Error>(())
//! ```

mod memory;
mod physical;

pub use memory::Memory;
pub use physical::Physical;

use crate::Result;

/// Backend trait for host binary data sources.
///
/// Implementations provide immutable access to the complete host binary. The bundle engine
/// only ever reads through this trait, rewriting always produces a new output.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// # Arguments
    ///
    /// * `offset` - The starting offset within the data.
    /// * `len` - The length of the slice in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the data source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounds-checked slicing shared by the backends.
fn checked_slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let Some(offset_end) = offset.checked_add(len) else {
        return Err(out_of_bounds_error!());
    };

    if offset_end > data.len() {
        return Err(out_of_bounds_error!());
    }

    Ok(&data[offset..offset_end])
}
