//! Endian-aware conversion between byte buffers and fixed-width values.
//!
//! This module is the conversion layer underneath [`crate::io::EndianReader`] and
//! [`crate::io::EndianWriter`]. Every supported type implements [`EndianIO`], which knows the
//! fixed byte width of the type and how to compose or decompose it in either byte order.
//!
//! # Key Components
//!
//! - [`EndianType`] - Byte order selector (little or big endian)
//! - [`EndianIO`] - Trait implemented for all fixed-width primitives and [`uguid::Guid`]
//! - [`decode`] / [`decode_at`] - Contract-checked conversion from a buffer (no `Result`)
//! - [`encode`] / [`encode_at`] - Contract-checked conversion into a buffer (no `Result`)
//! - [`read_at`] / [`write_at`] - Bounds-checked, auto-advancing variants returning [`crate::Result`]
//!
//! # Conversion Rules
//!
//! - Little-endian values are copied out of the buffer as-is, without per-byte shuffling.
//! - Big-endian integers are composed from the bytes in reversed order.
//! - Big-endian floats are converted as integers of the same width and then reinterpreted,
//!   so NaN payloads and rounding are identical to the integer path.
//! - A [`uguid::Guid`] is 16 bytes laid out as 4+2+2+8. Under big endian only the first three
//!   sub-fields are reversed, the trailing 8 bytes are copied verbatim.
//!
//! # Contract
//!
//! [`decode`], [`decode_at`], [`encode`] and [`encode_at`] expect the caller to guarantee that
//! `offset + size_of::<T>() <= data.len()`. A violation is a programming error: it is asserted
//! in debug builds and panics on the slice access in release builds. Use [`read_at`] and
//! [`write_at`] when the buffer length is untrusted.
//!
//! # Examples
//!
//! ```rust
//! use bundlescope::io::{decode, encode, EndianType};
//!
//! let mut data = [0u8; 4];
//! encode(&mut data, 0x1234_5678u32, EndianType::Big);
//! assert_eq!(data, [0x12, 0x34, 0x56, 0x78]);
//!
//! let value: u32 = decode(&data, EndianType::Little);
//! assert_eq!(value, 0x7856_3412);
//! ```

use uguid::Guid;

use crate::Result;

/// Byte ordering type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndianType {
    /// Bytes are stored with the least significant byte first.
    #[default]
    Little,
    /// Bytes are stored with the most significant byte first.
    Big,
}

impl EndianType {
    /// Returns the byte order of the machine this code runs on.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            EndianType::Big
        } else {
            EndianType::Little
        }
    }
}

/// Trait for types that can be converted from and to a fixed number of bytes in either byte order.
///
/// Implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `f32`, `f64` and
/// [`uguid::Guid`].
pub trait EndianIO: Sized + Copy {
    /// The byte array type holding one encoded value.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Number of bytes of one encoded value.
    const SIZE: usize;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;

    /// Read T in the requested byte order
    #[inline]
    fn from_bytes(bytes: Self::Bytes, endian: EndianType) -> Self {
        match endian {
            EndianType::Little => Self::from_le_bytes(bytes),
            EndianType::Big => Self::from_be_bytes(bytes),
        }
    }

    /// Write T in the requested byte order
    #[inline]
    fn to_bytes(self, endian: EndianType) -> Self::Bytes {
        match endian {
            EndianType::Little => self.to_le_bytes(),
            EndianType::Big => self.to_be_bytes(),
        }
    }
}

macro_rules! impl_endian_io_int {
    ($($ty:ty),*) => {
        $(
            impl EndianIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                #[inline]
                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                #[inline]
                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                #[inline]
                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_endian_io_int!(u8, i8, u16, i16, u32, i32, u64, i64);

// Big-endian floats go through the integer path of the same width
impl EndianIO for f32 {
    type Bytes = [u8; 4];

    const SIZE: usize = 4;

    #[inline]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        f32::from_le_bytes(bytes)
    }

    #[inline]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        f32::from_bits(<u32 as EndianIO>::from_be_bytes(bytes))
    }

    #[inline]
    fn to_le_bytes(self) -> Self::Bytes {
        f32::to_le_bytes(self)
    }

    #[inline]
    fn to_be_bytes(self) -> Self::Bytes {
        <u32 as EndianIO>::to_be_bytes(self.to_bits())
    }
}

impl EndianIO for f64 {
    type Bytes = [u8; 8];

    const SIZE: usize = 8;

    #[inline]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        f64::from_le_bytes(bytes)
    }

    #[inline]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        f64::from_bits(<u64 as EndianIO>::from_be_bytes(bytes))
    }

    #[inline]
    fn to_le_bytes(self) -> Self::Bytes {
        f64::to_le_bytes(self)
    }

    #[inline]
    fn to_be_bytes(self) -> Self::Bytes {
        <u64 as EndianIO>::to_be_bytes(self.to_bits())
    }
}

/// Reverses the first three GUID sub-fields (4+2+2 bytes), leaving the last 8 bytes untouched.
#[inline]
fn swap_guid_fields(mut bytes: [u8; 16]) -> [u8; 16] {
    bytes[0..4].reverse();
    bytes[4..6].reverse();
    bytes[6..8].reverse();
    bytes
}

impl EndianIO for Guid {
    type Bytes = [u8; 16];

    const SIZE: usize = 16;

    #[inline]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        Guid::from_bytes(bytes)
    }

    #[inline]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        Guid::from_bytes(swap_guid_fields(bytes))
    }

    #[inline]
    fn to_le_bytes(self) -> Self::Bytes {
        self.to_bytes()
    }

    #[inline]
    fn to_be_bytes(self) -> Self::Bytes {
        swap_guid_fields(self.to_bytes())
    }
}

/// Converts the first `size_of::<T>()` bytes of `data` into a `T`.
///
/// # Panics
///
/// Panics if `data` is shorter than the width of `T` (caller contract).
#[inline]
#[must_use]
pub fn decode<T: EndianIO>(data: &[u8], endian: EndianType) -> T {
    decode_at(data, 0, endian)
}

/// Converts the bytes at `offset` of `data` into a `T`.
///
/// # Panics
///
/// Panics if `offset + size_of::<T>()` exceeds `data.len()` (caller contract).
#[inline]
#[must_use]
pub fn decode_at<T: EndianIO>(data: &[u8], offset: usize, endian: EndianType) -> T {
    debug_assert!(
        offset + T::SIZE <= data.len(),
        "decode of {} bytes at offset {} exceeds buffer of {} bytes",
        T::SIZE,
        offset,
        data.len()
    );

    let Ok(bytes) = <T::Bytes as TryFrom<&[u8]>>::try_from(&data[offset..offset + T::SIZE]) else {
        unreachable!("slice length always matches the type width");
    };

    T::from_bytes(bytes, endian)
}

/// Writes `value` to the start of `data`.
///
/// # Panics
///
/// Panics if `data` is shorter than the width of `T` (caller contract).
#[inline]
pub fn encode<T: EndianIO>(data: &mut [u8], value: T, endian: EndianType) {
    encode_at(data, 0, value, endian);
}

/// Writes `value` at `offset` of `data`.
///
/// # Panics
///
/// Panics if `offset + size_of::<T>()` exceeds `data.len()` (caller contract).
#[inline]
pub fn encode_at<T: EndianIO>(data: &mut [u8], offset: usize, value: T, endian: EndianType) {
    debug_assert!(
        offset + T::SIZE <= data.len(),
        "encode of {} bytes at offset {} exceeds buffer of {} bytes",
        T::SIZE,
        offset,
        data.len()
    );

    data[offset..offset + T::SIZE].copy_from_slice(value.to_bytes(endian).as_ref());
}

/// Safely reads a value of type `T` at a specific offset and advances the offset.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::{read_at, EndianType};
///
/// let data = [0x01, 0x00, 0x00, 0x02];
/// let mut offset = 0;
///
/// let first: u16 = read_at(&data, &mut offset, EndianType::Little)?;
/// let second: u16 = read_at(&data, &mut offset, EndianType::Big)?;
/// assert_eq!((first, second), (1, 2));
/// assert_eq!(offset, 4);
/// # Ok::<(), bundlescope::Error>(())
/// ```
pub fn read_at<T: EndianIO>(data: &[u8], offset: &mut usize, endian: EndianType) -> Result<T> {
    let Some(end) = offset.checked_add(T::SIZE) else {
        return Err(out_of_bounds_error!());
    };

    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    let value = decode_at(data, *offset, endian);
    *offset = end;

    Ok(value)
}

/// Safely writes a value of type `T` at a specific offset and advances the offset.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too small.
pub fn write_at<T: EndianIO>(
    data: &mut [u8],
    offset: &mut usize,
    value: T,
    endian: EndianType,
) -> Result<()> {
    let Some(end) = offset.checked_add(T::SIZE) else {
        return Err(out_of_bounds_error!());
    };

    if end > data.len() {
        return Err(out_of_bounds_error!());
    }

    encode_at(data, *offset, value, endian);
    *offset = end;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    fn round_trip<T: EndianIO + PartialEq + std::fmt::Debug>(values: &[T]) {
        let mut buffer = vec![0u8; T::SIZE + 3];
        for &value in values {
            for endian in [EndianType::Little, EndianType::Big] {
                encode(&mut buffer, value, endian);
                assert_eq!(decode::<T>(&buffer, endian), value, "{endian:?}");

                encode_at(&mut buffer, 3, value, endian);
                assert_eq!(decode_at::<T>(&buffer, 3, endian), value, "{endian:?}");
            }
        }
    }

    #[test]
    fn decode_le_values() {
        assert_eq!(decode::<u8>(&TEST_BUFFER, EndianType::Little), 0x01);
        assert_eq!(decode::<u16>(&TEST_BUFFER, EndianType::Little), 0x0201);
        assert_eq!(decode::<i32>(&TEST_BUFFER, EndianType::Little), 0x0403_0201);
        assert_eq!(
            decode::<u64>(&TEST_BUFFER, EndianType::Little),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn decode_be_values() {
        assert_eq!(decode::<i8>(&TEST_BUFFER, EndianType::Big), 0x01);
        assert_eq!(decode::<i16>(&TEST_BUFFER, EndianType::Big), 0x0102);
        assert_eq!(decode::<u32>(&TEST_BUFFER, EndianType::Big), 0x0102_0304);
        assert_eq!(
            decode::<i64>(&TEST_BUFFER, EndianType::Big),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn decode_with_offset() {
        assert_eq!(decode_at::<u16>(&TEST_BUFFER, 6, EndianType::Little), 0x0807);
        assert_eq!(decode_at::<u32>(&TEST_BUFFER, 2, EndianType::Big), 0x0304_0506);
    }

    #[test]
    fn integer_boundaries_round_trip() {
        round_trip(&[i16::MIN, -1, 0, 1, i16::MAX]);
        round_trip(&[u16::MIN, 0x00FF, u16::MAX]);
        round_trip(&[i32::MIN, -12345, 0, i32::MAX]);
        round_trip(&[u32::MIN, 0x1234_5678, u32::MAX]);
        round_trip(&[i64::MIN, -1, 0, i64::MAX]);
        round_trip(&[u64::MIN, 0x0102_0304_0506_0708, u64::MAX]);
    }

    #[test]
    fn float_boundaries_round_trip() {
        round_trip(&[
            0.0f32,
            -0.0,
            30.0,
            f32::MIN,
            f32::MAX,
            f32::EPSILON,
            f32::INFINITY,
            f32::NEG_INFINITY,
        ]);
        round_trip(&[
            0.0f64,
            30.0,
            f64::MIN,
            f64::MAX,
            f64::MIN_POSITIVE,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ]);
    }

    #[test]
    fn float_nan_preserves_bits() {
        let mut buffer = [0u8; 8];
        let nan = f32::from_bits(0x7FC0_1234);
        encode(&mut buffer, nan, EndianType::Big);
        assert_eq!(decode::<f32>(&buffer, EndianType::Big).to_bits(), 0x7FC0_1234);

        let nan = f64::from_bits(0x7FF8_0000_0000_BEEF);
        encode(&mut buffer, nan, EndianType::Big);
        assert_eq!(
            decode::<f64>(&buffer, EndianType::Big).to_bits(),
            0x7FF8_0000_0000_BEEF
        );
    }

    #[test]
    fn float_big_endian_matches_integer_layout() {
        let mut buffer = [0u8; 4];
        encode(&mut buffer, 30.0f32, EndianType::Big);
        assert_eq!(buffer, 30.0f32.to_bits().to_be_bytes());
    }

    #[test]
    fn guid_big_endian_reorders_first_three_fields() {
        let raw: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
            0x0E, 0x0F,
        ];

        let little: Guid = decode(&raw, EndianType::Little);
        let big: Guid = decode(&raw, EndianType::Big);

        assert_eq!(little.to_bytes(), raw);
        assert_eq!(
            big.to_bytes(),
            [
                0x03, 0x02, 0x01, 0x00, 0x05, 0x04, 0x07, 0x06, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
                0x0E, 0x0F
            ]
        );
        // The trailing 8 bytes never move
        assert_eq!(big.to_bytes()[8..], raw[8..]);

        let mut encoded = [0u8; 16];
        encode(&mut encoded, big, EndianType::Big);
        assert_eq!(encoded, raw);
    }

    #[test]
    fn guid_round_trip() {
        let guid = uguid::guid!("01234567-89ab-cdef-0123-456789abcdef");
        round_trip(&[guid, Guid::ZERO]);
    }

    #[test]
    fn read_at_sequential() {
        let mut offset = 0;
        let first: u16 = read_at(&TEST_BUFFER, &mut offset, EndianType::Little).unwrap();
        let second: u16 = read_at(&TEST_BUFFER, &mut offset, EndianType::Big).unwrap();
        let third: u32 = read_at(&TEST_BUFFER, &mut offset, EndianType::Little).unwrap();

        assert_eq!(first, 0x0201);
        assert_eq!(second, 0x0304);
        assert_eq!(third, 0x0807_0605);
        assert_eq!(offset, 8);
    }

    #[test]
    fn write_at_sequential() {
        let mut buffer = [0u8; 6];
        let mut offset = 0;
        write_at(&mut buffer, &mut offset, 0x1234u16, EndianType::Big).unwrap();
        write_at(&mut buffer, &mut offset, 0x5678_9ABCu32, EndianType::Little).unwrap();

        assert_eq!(buffer, [0x12, 0x34, 0xBC, 0x9A, 0x78, 0x56]);
        assert_eq!(offset, 6);
    }

    #[test]
    fn checked_errors() {
        let mut offset = 6;
        let result = read_at::<u32>(&TEST_BUFFER, &mut offset, EndianType::Little);
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
        assert_eq!(offset, 6);

        let mut offset = usize::MAX;
        let result = read_at::<u8>(&TEST_BUFFER, &mut offset, EndianType::Little);
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));

        let mut buffer = [0u8; 2];
        let mut offset = 0;
        let result = write_at(&mut buffer, &mut offset, 1u32, EndianType::Big);
        assert!(matches!(result, Err(Error::OutOfBounds { .. })));
    }

    #[test]
    #[should_panic]
    fn decode_contract_violation_panics() {
        let _ = decode_at::<u64>(&TEST_BUFFER, 4, EndianType::Little);
    }
}
