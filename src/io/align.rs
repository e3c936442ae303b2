//! Alignment and padding arithmetic.
//!
//! Shared by [`crate::io::EndianReader::read_alignment`], [`crate::io::EndianWriter::write_padding`]
//! and the bundle rewrite pipeline, which aligns assembly entries to 4096 or 64 byte boundaries.
//!
//! Both functions require `alignment` to be a positive power of two. Other values produce
//! meaningless results; they are caught by a debug assertion.

/// Rounds `position` up to the next multiple of `alignment`.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::apply_alignment;
///
/// assert_eq!(apply_alignment(0, 64), 0);
/// assert_eq!(apply_alignment(1, 64), 64);
/// assert_eq!(apply_alignment(4096, 4096), 4096);
/// ```
#[inline]
#[must_use]
pub const fn apply_alignment(position: i64, alignment: i64) -> i64 {
    debug_assert!(alignment > 0 && alignment & (alignment - 1) == 0);
    position.wrapping_add(alignment - 1) & alignment.wrapping_neg()
}

/// Returns the number of bytes required to move `position` to the next multiple of `alignment`.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::calculate_padding;
///
/// assert_eq!(calculate_padding(0, 16), 0);
/// assert_eq!(calculate_padding(5, 16), 11);
/// assert_eq!(calculate_padding(17, 16), 15);
/// ```
#[inline]
#[must_use]
pub const fn calculate_padding(position: i64, alignment: i64) -> i64 {
    debug_assert!(alignment > 0 && alignment & (alignment - 1) == 0);
    position.wrapping_neg() & (alignment - 1)
}
