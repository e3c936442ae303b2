use std::io::{Read, Seek, Write};

use bitflags::bitflags;

use crate::{
    bundle::{entry::FileEntry, location::FileLocation},
    io::{EndianReader, EndianType, EndianWriter},
    Result,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Flags stored in the bundle header (version 2 and later)
    pub struct HeaderFlags: u64 {
        /// The host extracts all files to disk, like .NET Core 3.x bundles did
        const NETCOREAPP3_COMPAT_MODE = 0x0001;
    }
}

/// The bundle header followed by the table of packaged files.
///
/// ## Layout
///
/// | Field                | Type              | Present      |
/// |----------------------|-------------------|--------------|
/// | major version        | `u32`             | always       |
/// | minor version        | `u32`             | always       |
/// | entry count          | `i32`             | always       |
/// | bundle id            | prefixed string   | always       |
/// | deps.json            | [`FileLocation`]  | major >= 2   |
/// | runtimeconfig.json   | [`FileLocation`]  | major >= 2   |
/// | flags                | `u64`             | major >= 2   |
/// | entries              | [`FileEntry`] * n | always       |
///
/// All integers are little-endian.
#[derive(Debug, Clone, Default)]
pub struct BundleManifest {
    /// Major format version
    pub major_version: u32,
    /// Minor format version
    pub minor_version: u32,
    /// Bundle identifier, the host uses it to name its extraction directory
    pub bundle_id: String,
    /// Location of the `.deps.json` entry, zero if there is none
    pub deps_json_location: FileLocation,
    /// Location of the `.runtimeconfig.json` entry, zero if there is none
    pub runtime_config_json_location: FileLocation,
    /// Header flags
    pub flags: HeaderFlags,
    entries: Vec<FileEntry>,
    deps_json_entry: Option<usize>,
    runtime_config_entry: Option<usize>,
}

impl BundleManifest {
    /// Number of leading base64 characters of the bundle hash dropped from the bundle id.
    pub const BUNDLE_ID_LENGTH: usize = 12;

    /// Creates an empty manifest with zero configuration file locations and no flags.
    #[must_use]
    pub fn new(major_version: u32, minor_version: u32, bundle_id: &str) -> Self {
        BundleManifest {
            major_version,
            minor_version,
            bundle_id: bundle_id.to_string(),
            ..Default::default()
        }
    }

    /// Decodes a manifest at the reader's position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] for invalid values and [`crate::Error::EndOfData`]
    /// if the manifest is truncated.
    pub fn read<S: Read + Seek>(reader: &mut EndianReader<S>) -> Result<Self> {
        let mut manifest = BundleManifest::default();
        manifest.decode(reader)?;
        Ok(manifest)
    }

    /// Decodes a manifest into `self`, replacing all entries.
    ///
    /// # Errors
    ///
    /// See [`BundleManifest::read`].
    pub fn decode<S: Read + Seek>(&mut self, reader: &mut EndianReader<S>) -> Result<()> {
        self.entries.clear();
        self.deps_json_entry = None;
        self.runtime_config_entry = None;

        self.major_version = reader.read_u32(EndianType::Little)?;
        self.minor_version = reader.read_u32(EndianType::Little)?;
        let count = reader.read_i32(EndianType::Little)?;
        self.bundle_id = reader.read_string()?;

        let Ok(count) = usize::try_from(count) else {
            return Err(malformed_error!("Negative bundle entry count {}", count));
        };

        if self.major_version >= 2 {
            self.deps_json_location = FileLocation::read(reader)?;
            self.runtime_config_json_location = FileLocation::read(reader)?;
            self.flags = HeaderFlags::from_bits_retain(reader.read_u64(EndianType::Little)?);
        } else {
            self.deps_json_location = FileLocation::default();
            self.runtime_config_json_location = FileLocation::default();
            self.flags = HeaderFlags::empty();
        }

        // Every record holds at least 18 bytes, so a corrupt count cannot force a huge allocation
        let remaining = usize::try_from(reader.remaining()?).unwrap_or(usize::MAX);
        self.entries.reserve(count.min(remaining / 18));

        for index in 0..count {
            let entry = FileEntry::read(reader, self.major_version)?;

            if self.major_version >= 2 {
                if self.deps_json_entry.is_none() && entry.location == self.deps_json_location {
                    self.deps_json_entry = Some(index);
                }
                if self.runtime_config_entry.is_none()
                    && entry.location == self.runtime_config_json_location
                {
                    self.runtime_config_entry = Some(index);
                }
            }

            self.entries.push(entry);
        }

        Ok(())
    }

    /// Encodes the header with explicit id and configuration file locations, without entries.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if there are more than `i32::MAX` entries, or an
    /// I/O error from the writer.
    pub fn write_header<W: Write + Seek>(
        &self,
        writer: &mut EndianWriter<W>,
        bundle_id: &str,
        deps_json_location: FileLocation,
        runtime_config_json_location: FileLocation,
    ) -> Result<()> {
        let Ok(count) = i32::try_from(self.entries.len()) else {
            return Err(malformed_error!("Too many bundle entries - {}", self.entries.len()));
        };

        writer
            .write_u32(self.major_version, EndianType::Little)?
            .write_u32(self.minor_version, EndianType::Little)?
            .write_i32(count, EndianType::Little)?
            .write_string(bundle_id)?;

        if self.major_version >= 2 {
            deps_json_location.write(writer)?;
            runtime_config_json_location.write(writer)?;
            writer.write_u64(self.flags.bits(), EndianType::Little)?;
        }

        Ok(())
    }

    /// Encodes the complete manifest as it currently is.
    ///
    /// # Errors
    ///
    /// See [`BundleManifest::write_header`].
    pub fn write<W: Write + Seek>(&self, writer: &mut EndianWriter<W>) -> Result<()> {
        self.write_header(
            writer,
            &self.bundle_id,
            self.deps_json_location,
            self.runtime_config_json_location,
        )?;

        for entry in &self.entries {
            entry.write(writer, self.major_version)?;
        }

        Ok(())
    }

    /// All entries in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Mutable access to the entries.
    pub fn entries_mut(&mut self) -> &mut [FileEntry] {
        &mut self.entries
    }

    /// Appends an entry.
    pub fn push_entry(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Returns the index of the entry with the given relative path.
    #[must_use]
    pub fn entry_index(&self, relative_path: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.relative_path == relative_path)
    }

    /// Returns the entry with the given relative path.
    #[must_use]
    pub fn find_entry(&self, relative_path: &str) -> Option<&FileEntry> {
        self.entry_index(relative_path)
            .and_then(|index| self.entries.get(index))
    }

    /// The entry whose location matched the header's `.deps.json` location.
    #[must_use]
    pub fn deps_json_entry(&self) -> Option<&FileEntry> {
        self.deps_json_entry
            .and_then(|index| self.entries.get(index))
    }

    /// The entry whose location matched the header's `.runtimeconfig.json` location.
    #[must_use]
    pub fn runtime_config_entry(&self) -> Option<&FileEntry> {
        self.runtime_config_entry
            .and_then(|index| self.entries.get(index))
    }
}
