//! The 20-byte [`Sha1`] hash value type.
//!
//! A [`Sha1`] holds five 32-bit words composed in little-endian order from the 20 raw bytes.
//! It is a plain value: no identity, cheap to copy, compared word by word. The textual form is
//! exactly 40 hexadecimal characters (the raw bytes in order), formatted in upper case.

use std::{fmt, str::FromStr};

use sha1::{Digest, Sha1 as Sha1Hasher};

use crate::{
    io::endian::{decode_at, encode_at, EndianType},
    Error, Result,
};

/// A 20-byte hash value stored as five 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sha1 {
    /// Bytes 0..4
    pub a: u32,
    /// Bytes 4..8
    pub b: u32,
    /// Bytes 8..12
    pub c: u32,
    /// Bytes 12..16
    pub d: u32,
    /// Bytes 16..20
    pub e: u32,
}

impl Sha1 {
    /// The all-zero hash.
    pub const ZERO: Sha1 = Sha1 {
        a: 0,
        b: 0,
        c: 0,
        d: 0,
        e: 0,
    };

    /// Size of the encoded value in bytes.
    pub const STRUCT_SIZE: usize = 20;

    /// Creates a hash from its five words.
    #[must_use]
    pub const fn from_words(a: u32, b: u32, c: u32, d: u32, e: u32) -> Self {
        Sha1 { a, b, c, d, e }
    }

    /// Creates a hash from the first 20 bytes of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `data` holds fewer than 20 bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::STRUCT_SIZE {
            return Err(Error::InvalidArgument(format!(
                "a hash requires {} bytes, got {}",
                Self::STRUCT_SIZE,
                data.len()
            )));
        }

        Ok(Self::from_buffer(data))
    }

    /// Unchecked variant of [`Sha1::from_bytes`] used by the reader on its scratch buffer.
    pub(crate) fn from_buffer(data: &[u8]) -> Self {
        Sha1 {
            a: decode_at(data, 0, EndianType::Little),
            b: decode_at(data, 4, EndianType::Little),
            c: decode_at(data, 8, EndianType::Little),
            d: decode_at(data, 12, EndianType::Little),
            e: decode_at(data, 16, EndianType::Little),
        }
    }

    /// Returns the 20 raw bytes of this hash.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut bytes = [0u8; 20];
        encode_at(&mut bytes, 0, self.a, EndianType::Little);
        encode_at(&mut bytes, 4, self.b, EndianType::Little);
        encode_at(&mut bytes, 8, self.c, EndianType::Little);
        encode_at(&mut bytes, 12, self.d, EndianType::Little);
        encode_at(&mut bytes, 16, self.e, EndianType::Little);
        bytes
    }

    /// Computes the SHA-1 digest of `data`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bundlescope::io::Sha1;
    ///
    /// let hash = Sha1::compute(b"abc");
    /// assert_eq!(hash.to_string(), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    /// ```
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let digest = Sha1Hasher::digest(data);
        Self::from_buffer(digest.as_slice())
    }

    /// Returns `true` if every word is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FromStr for Sha1 {
    type Err = Error;

    /// Parses exactly 40 hexadecimal characters.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != Self::STRUCT_SIZE * 2 {
            return Err(Error::InvalidArgument(format!(
                "a hash string requires 40 hex characters, got {}",
                s.len()
            )));
        }

        if let Some(invalid) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Error::InvalidArgument(format!(
                "invalid character '{invalid}' in hash string"
            )));
        }

        let mut bytes = [0u8; 20];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            *byte = hex_digit(pair[0]) << 4 | hex_digit(pair[1]);
        }

        Ok(Self::from_buffer(&bytes))
    }
}

fn hex_digit(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

impl fmt::Display for Sha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Sha1 {
    fn from(bytes: [u8; 20]) -> Self {
        Self::from_buffer(&bytes)
    }
}
