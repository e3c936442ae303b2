//! Text encodings used by the reader and writer for string fields.

use crate::{Error, Result};

/// The character encoding applied to string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8, as used by all bundle manifest strings.
    #[default]
    Utf8,
    /// ISO-8859-1, one byte per character.
    Latin1,
}

impl TextEncoding {
    /// Decodes `bytes` into a string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if `bytes` are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::Utf8 => match std::str::from_utf8(bytes) {
                Ok(text) => Ok(text.to_string()),
                Err(error) => Err(malformed_error!("Invalid UTF-8 string data - {}", error)),
            },
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&byte| char::from(byte)).collect()),
        }
    }

    /// Encodes `text` into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if a character cannot be represented.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        Error::InvalidArgument(format!("'{c}' cannot be encoded as Latin-1"))
                    })
                })
                .collect(),
        }
    }

    /// Returns the number of bytes `text` occupies in this encoding.
    #[must_use]
    pub fn byte_count(self, text: &str) -> usize {
        match self {
            TextEncoding::Utf8 => text.len(),
            TextEncoding::Latin1 => text.chars().count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8() {
        let bytes = TextEncoding::Utf8.encode("größe").unwrap();
        assert_eq!(bytes.len(), 7);
        assert_eq!(TextEncoding::Utf8.byte_count("größe"), 7);
        assert_eq!(TextEncoding::Utf8.decode(&bytes).unwrap(), "größe");

        assert!(matches!(
            TextEncoding::Utf8.decode(&[0xC3]),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn latin1() {
        let bytes = TextEncoding::Latin1.encode("größe").unwrap();
        assert_eq!(bytes, [b'g', b'r', 0xF6, 0xDF, b'e']);
        assert_eq!(TextEncoding::Latin1.decode(&bytes).unwrap(), "größe");

        assert!(TextEncoding::Latin1.encode("€").is_err());
    }
}
