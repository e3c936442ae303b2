use std::{
    fmt,
    io::{Cursor, Read, Seek, Write},
};

use strum::{EnumCount, EnumIter};

use crate::{
    bundle::location::FileLocation,
    io::{EndianReader, EndianType, EndianWriter},
    Result,
};

/// Kind of a packaged file, stored as one byte in every entry record.
///
/// Type bytes introduced by newer bundlers are kept as [`FileType::Other`] so the entry
/// survives a rewrite unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, EnumCount)]
pub enum FileType {
    /// Type not known to the bundler
    #[default]
    Unknown,
    /// Managed IL assembly
    Assembly,
    /// Native library
    NativeBinary,
    /// `.deps.json` configuration file
    DepsJson,
    /// `.runtimeconfig.json` configuration file
    RuntimeConfigJson,
    /// PDB symbol file
    Symbols,
    /// Any type byte above 5
    Other(u8),
}

impl FileType {
    /// Returns `false` for the JSON configuration files, which the host reads uncompressed.
    #[must_use]
    pub fn should_compress(self) -> bool {
        !matches!(self, FileType::DepsJson | FileType::RuntimeConfigJson)
    }
}

impl From<u8> for FileType {
    fn from(value: u8) -> Self {
        match value {
            0 => FileType::Unknown,
            1 => FileType::Assembly,
            2 => FileType::NativeBinary,
            3 => FileType::DepsJson,
            4 => FileType::RuntimeConfigJson,
            5 => FileType::Symbols,
            other => FileType::Other(other),
        }
    }
}

impl From<FileType> for u8 {
    fn from(value: FileType) -> Self {
        match value {
            FileType::Unknown => 0,
            FileType::Assembly => 1,
            FileType::NativeBinary => 2,
            FileType::DepsJson => 3,
            FileType::RuntimeConfigJson => 4,
            FileType::Symbols => 5,
            FileType::Other(value) => value,
        }
    }
}

/// Pending in-memory replacement of an entry's bytes.
///
/// Owned exclusively by its [`FileEntry`]. The replacement only reaches disk when the bundle
/// is saved.
#[derive(Debug, Clone)]
pub struct ModifiedFileEntryMeta {
    data: Cursor<Vec<u8>>,
    location: FileLocation,
}

impl ModifiedFileEntryMeta {
    /// Wraps `data` as the replacement, covering the whole buffer.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        let location = FileLocation::new(0, data.len() as i64);
        ModifiedFileEntryMeta {
            data: Cursor::new(data),
            location,
        }
    }

    /// Range of the replacement bytes within [`ModifiedFileEntryMeta::data`].
    #[must_use]
    pub fn location(&self) -> FileLocation {
        self.location
    }

    /// The replacement buffer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.get_ref()
    }

    pub(crate) fn stream_mut(&mut self) -> &mut Cursor<Vec<u8>> {
        &mut self.data
    }

    /// Returns the replacement buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data.into_inner()
    }
}

/// Metadata of one packaged file.
///
/// Entries are decoded in manifest order, which is also the order they are rewritten in.
#[derive(Debug, Clone, Default)]
pub struct FileEntry {
    /// Where the (possibly compressed) bytes live in the host binary; `size` is uncompressed
    pub location: FileLocation,
    /// Stored size if compressed, `0` otherwise (only present for bundle version 6+)
    pub compressed_size: i64,
    /// Kind of file
    pub file_type: FileType,
    /// Path relative to the application directory, using `/` as separator
    pub relative_path: String,
    /// Offset at which this record was decoded
    pub metadata_offset: i64,
    modified: Option<ModifiedFileEntryMeta>,
}

impl FileEntry {
    /// Separator used in [`FileEntry::relative_path`].
    pub const DIRECTORY_SEPARATOR: char = '/';

    /// Creates an entry that has not been read from a manifest.
    #[must_use]
    pub fn new(location: FileLocation, file_type: FileType, relative_path: &str) -> Self {
        FileEntry {
            location,
            file_type,
            relative_path: relative_path.to_string(),
            ..Default::default()
        }
    }

    /// Number of bytes the entry occupies in the host binary.
    #[must_use]
    pub fn actual_size(&self) -> i64 {
        if self.compressed_size > 0 {
            self.compressed_size
        } else {
            self.location.size
        }
    }

    /// Returns `true` if the stored bytes are DEFLATE compressed.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.compressed_size > 0
    }

    /// Decodes one entry record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for a negative compressed size and
    /// [`crate::Error::EndOfData`] if the record is truncated.
    pub fn read<S: Read + Seek>(reader: &mut EndianReader<S>, major_version: u32) -> Result<Self> {
        let metadata_offset = reader.position()?;
        let location = FileLocation::read(reader)?;

        let compressed_size = if major_version >= 6 {
            reader.read_i64(EndianType::Little)?
        } else {
            0
        };

        if compressed_size < 0 {
            return Err(malformed_error!(
                "Negative compressed size {} at offset {}",
                compressed_size,
                metadata_offset
            ));
        }

        let file_type = FileType::from(reader.read_u8()?);
        let relative_path = reader.read_string()?;

        Ok(FileEntry {
            location,
            compressed_size,
            file_type,
            relative_path,
            metadata_offset,
            modified: None,
        })
    }

    /// Encodes this entry with its current location and compressed size.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the writer.
    pub fn write<W: Write + Seek>(
        &self,
        writer: &mut EndianWriter<W>,
        major_version: u32,
    ) -> Result<()> {
        self.write_with(writer, self.location, self.compressed_size, major_version)
    }

    /// Encodes this entry with an overridden location and compressed size.
    ///
    /// The compressed size is only written for bundle version 6 and later.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the writer.
    pub fn write_with<W: Write + Seek>(
        &self,
        writer: &mut EndianWriter<W>,
        location: FileLocation,
        compressed_size: i64,
        major_version: u32,
    ) -> Result<()> {
        location.write(writer)?;

        if major_version >= 6 {
            writer.write_i64(compressed_size, EndianType::Little)?;
        }

        writer
            .write_u8(self.file_type.into())?
            .write_string(&self.relative_path)?;
        Ok(())
    }

    /// Attaches `data` as the new content of this entry, replacing any earlier replacement.
    pub fn modify(&mut self, data: Vec<u8>) {
        self.modified = Some(ModifiedFileEntryMeta::new(data));
    }

    /// Removes a pending replacement.
    pub fn discard_modification(&mut self) -> Option<ModifiedFileEntryMeta> {
        self.modified.take()
    }

    /// Returns the pending replacement, if any.
    #[must_use]
    pub fn modified(&self) -> Option<&ModifiedFileEntryMeta> {
        self.modified.as_ref()
    }

    pub(crate) fn modified_mut(&mut self) -> Option<&mut ModifiedFileEntryMeta> {
        self.modified.as_mut()
    }

    /// Returns `true` if a replacement is pending.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified.is_some()
    }
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path)
    }
}
