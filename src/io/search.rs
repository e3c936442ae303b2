//! Byte-pattern search.
//!
//! Two flavours are provided:
//!
//! - [`search_in_buffer`] - exact Morris-Pratt search, linear in haystack plus needle length.
//!   Used to locate the fixed bundle signature in a memory-mapped host binary.
//! - [`SignaturePattern`] - hex patterns with `??` single-byte wildcards, matched by a plain
//!   forward scan (wildcards make skip tables unsound). Used by
//!   [`crate::io::EndianReader::scan_signatures`].

use crate::{Error, Result};

/// Builds the Morris-Pratt failure table for `needle` (at least two entries).
fn build_table(needle: &[u8]) -> Vec<isize> {
    let mut table = vec![0isize; needle.len().max(2)];
    let mut position = 2;
    let mut candidate = 0usize;

    table[0] = -1;
    table[1] = 0;

    while position < needle.len() {
        if needle[position - 1] == needle[candidate] {
            candidate += 1;
            table[position] = candidate as isize;
            position += 1;
        } else if candidate > 0 {
            candidate = table[candidate] as usize;
        } else {
            table[position] = 0;
            position += 1;
        }
    }

    table
}

/// Returns the offset of the first occurrence of `needle` in `haystack`.
///
/// An empty needle matches at offset 0.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::search_in_buffer;
///
/// assert_eq!(search_in_buffer(b"abcabd", b"abd"), Some(3));
/// assert_eq!(search_in_buffer(b"abcabd", b"abe"), None);
/// ```
#[must_use]
pub fn search_in_buffer(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }

    if needle.len() > haystack.len() {
        return None;
    }

    let table = build_table(needle);
    let mut i = 0usize;
    let mut j = 0usize;

    while i + j < haystack.len() {
        if needle[j] == haystack[i + j] {
            j += 1;
            if j == needle.len() {
                return Some(i);
            }
        } else {
            // table[0] == -1 moves the window by one on a mismatch at the first byte
            i = (i as isize + j as isize - table[j]) as usize;
            j = table[j].max(0) as usize;
        }
    }

    None
}

/// A byte pattern with single-byte wildcards.
///
/// Parsed from hex text such as `"4D 5A ?? 00"`. Whitespace is ignored, `??` matches any byte.
/// The pattern must not start with a wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePattern {
    bytes: Vec<Option<u8>>,
}

impl SignaturePattern {
    /// Parses a hex pattern.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if the pattern is empty, starts with a
    /// wildcard, has an odd number of digits or contains invalid hex.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bundlescope::io::SignaturePattern;
    ///
    /// let pattern = SignaturePattern::parse("4D 5A ?? 00")?;
    /// assert_eq!(pattern.len(), 4);
    /// assert!(pattern.matches_at(&[0x4D, 0x5A, 0x90, 0x00]));
    /// assert!(SignaturePattern::parse("?? 5A").is_err());
    /// # Ok::<(), bundlescope::Error>(())
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        let compact: Vec<u8> = pattern
            .bytes()
            .filter(|byte| !byte.is_ascii_whitespace())
            .collect();

        if compact.is_empty() {
            return Err(Error::InvalidPattern("pattern is empty".to_string()));
        }

        if compact[0] == b'?' {
            return Err(Error::InvalidPattern(format!(
                "'{pattern}' starts with a wildcard"
            )));
        }

        if compact.len() % 2 != 0 {
            return Err(Error::InvalidPattern(format!(
                "'{pattern}' has an odd number of digits"
            )));
        }

        let bytes = compact
            .chunks_exact(2)
            .map(|pair| match pair {
                [b'?', b'?'] => Ok(None),
                [high, low] => match (hex_value(*high), hex_value(*low)) {
                    (Some(high), Some(low)) => Ok(Some(high << 4 | low)),
                    _ => Err(Error::InvalidPattern(format!(
                        "'{pattern}' contains invalid hex digits"
                    ))),
                },
                _ => Err(Error::InvalidPattern(format!("'{pattern}' is malformed"))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SignaturePattern { bytes })
    }

    /// Number of bytes covered by the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`, parsing rejects empty patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The first byte, which is never a wildcard.
    #[must_use]
    pub fn first_byte(&self) -> u8 {
        self.bytes.first().copied().flatten().unwrap_or_default()
    }

    /// Returns `true` if `data` starts with this pattern.
    #[must_use]
    pub fn matches_at(&self, data: &[u8]) -> bool {
        if data.len() < self.bytes.len() || data[0] != self.first_byte() {
            return false;
        }

        self.bytes
            .iter()
            .zip(data)
            .all(|(expected, actual)| expected.map_or(true, |expected| expected == *actual))
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
