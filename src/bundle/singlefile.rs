//! Discovery and rewriting of single-file bundles.
//!
//! [`SingleFileBundle`] is one open host binary that carries a bundle. It owns the host bytes
//! through a [`crate::file::Backend`] and the decoded [`BundleManifest`]. Entry replacements
//! are held in memory until [`SingleFileBundle::save`] writes a complete new host binary.
//!
//! # Save pipeline
//!
//! 1. The host bytes before the first entry are copied unchanged.
//! 2. Every entry is written in manifest order. Compressible entries are DEFLATE compressed
//!    when enabled, assemblies are aligned for the target platform, and the SHA-256 digest of
//!    the plain bytes is folded into the bundle hash.
//! 3. The manifest follows, carrying the new bundle id and entry locations.
//! 4. The manifest offset in front of the signature is patched to point at the new manifest.

use std::{
    borrow::Cow,
    fmt, fs,
    io::{BufWriter, Cursor, Read, Seek, Write},
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};
use log::{debug, trace, warn};
use sha2::{Digest, Sha256};

use crate::{
    bundle::{
        entry::{FileEntry, FileType},
        location::FileLocation,
        manifest::BundleManifest,
        options::BundlerOptions,
        stream::EntryStream,
        target::TargetInfo,
    },
    file::{Backend, Memory, Physical},
    io::{calculate_padding, read_at, search_in_buffer, EndianReader, EndianType, EndianWriter, StreamView},
    Error, Result,
};

/// The 32 bytes the SDK embeds in every apphost that carries a bundle.
///
/// It is the SHA-256 of ".net core bundle". The 8 bytes in front of it hold the manifest
/// offset, which is zero in an apphost without a bundle.
pub const BUNDLE_SIGNATURE: [u8; 32] = [
    0x8b, 0x12, 0x02, 0xb9, 0x6a, 0x61, 0x20, 0x38, 0x72, 0x7b, 0x93, 0x02, 0x14, 0xd7, 0xa0, 0x32,
    0x13, 0xf5, 0xb9, 0xe6, 0xef, 0xae, 0x33, 0x18, 0xee, 0x3b, 0x2d, 0xce, 0x24, 0xb3, 0x6a, 0xae,
];

/// A host binary carrying a .NET single-file bundle.
///
/// # Examples
///
/// ```rust,no_run
/// use bundlescope::SingleFileBundle;
/// use std::io::Read;
///
/// let mut bundle = SingleFileBundle::from_file("app.exe")?.ok_or(bundlescope::Error::Empty)?;
/// let index = bundle.entry_index("app.deps.json").ok_or(bundlescope::Error::Empty)?;
///
/// let mut deps = String::new();
/// bundle.get_stream(index)?.read_to_string(&mut deps)?;
/// println!("{deps}");
/// # Ok::<(), bundlescope::Error>(())
/// ```
pub struct SingleFileBundle {
    backend: Box<dyn Backend>,
    path: Option<PathBuf>,
    signature_offset: usize,
    manifest_offset: i64,
    bundle_offset: i64,
    is_bundle_last_data: bool,
    manifest: BundleManifest,
}

impl SingleFileBundle {
    /// Memory-maps `path` and decodes the bundle inside it.
    ///
    /// Returns `Ok(None)` if the file carries no bundle signature.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileError`] if the file cannot be opened, or
    /// [`crate::Error::Malformed`] / [`crate::Error::EndOfData`] if the signature is present
    /// but the manifest cannot be decoded.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let backend = Physical::new(path)?;
        Self::load(Box::new(backend), Some(path.to_path_buf()))
    }

    /// Decodes the bundle inside an in-memory host binary.
    ///
    /// # Errors
    ///
    /// See [`SingleFileBundle::from_file`].
    pub fn from_mem(data: Vec<u8>) -> Result<Option<Self>> {
        Self::load(Box::new(Memory::new(data)), None)
    }

    fn load(backend: Box<dyn Backend>, path: Option<PathBuf>) -> Result<Option<Self>> {
        let data = backend.data();

        let Some(signature_offset) = search_in_buffer(data, &BUNDLE_SIGNATURE) else {
            debug!("No bundle signature in {} byte host binary", data.len());
            return Ok(None);
        };

        if signature_offset < 8 {
            return Err(malformed_error!(
                "Bundle signature at {} leaves no room for the manifest offset",
                signature_offset
            ));
        }

        let mut offset = signature_offset - 8;
        let manifest_offset: i64 = read_at(data, &mut offset, EndianType::Little)?;
        if manifest_offset <= 0 || manifest_offset >= data.len() as i64 {
            return Err(malformed_error!(
                "Invalid manifest offset {} in {} byte host binary",
                manifest_offset,
                data.len()
            ));
        }

        let mut reader = EndianReader::new(Cursor::new(data));
        reader.set_position(manifest_offset)?;
        let manifest = BundleManifest::read(&mut reader)?;
        let manifest_end = reader.position()?;

        let (bundle_offset, offset_max) = match manifest.entries() {
            [] => (manifest_offset, manifest_offset),
            entries => entries.iter().fold((i64::MAX, i64::MIN), |(min, max), entry| {
                (
                    min.min(entry.location.offset),
                    max.max(entry.location.offset.saturating_add(entry.actual_size())),
                )
            }),
        };

        let is_bundle_last_data = manifest_end == data.len() as i64 && offset_max == manifest_offset;

        debug!(
            "Bundle v{}.{} '{}': signature at {:#x}, manifest at {:#x}, {} entries starting at {:#x}",
            manifest.major_version,
            manifest.minor_version,
            manifest.bundle_id,
            signature_offset,
            manifest_offset,
            manifest.entries().len(),
            bundle_offset
        );

        Ok(Some(SingleFileBundle {
            backend,
            path,
            signature_offset,
            manifest_offset,
            bundle_offset,
            is_bundle_last_data,
            manifest,
        }))
    }

    /// The decoded manifest.
    #[must_use]
    pub fn manifest(&self) -> &BundleManifest {
        &self.manifest
    }

    /// Mutable access to the manifest, e.g. to change the version or flags before saving.
    pub fn manifest_mut(&mut self) -> &mut BundleManifest {
        &mut self.manifest
    }

    /// Path of the host binary, `None` for in-memory bundles.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Offset of [`BUNDLE_SIGNATURE`] in the host binary.
    #[must_use]
    pub fn signature_offset(&self) -> usize {
        self.signature_offset
    }

    /// Offset of the manifest in the host binary.
    #[must_use]
    pub fn manifest_offset(&self) -> i64 {
        self.manifest_offset
    }

    /// Offset of the first entry, everything before it belongs to the apphost.
    #[must_use]
    pub fn bundle_offset(&self) -> i64 {
        self.bundle_offset
    }

    /// Returns `true` if the entries and the manifest are the last data in the host binary,
    /// i.e. nothing (like a signature) was appended after bundling.
    #[must_use]
    pub fn is_bundle_last_data(&self) -> bool {
        self.is_bundle_last_data
    }

    /// The raw host binary.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// Returns the index of the entry with the given relative path.
    #[must_use]
    pub fn entry_index(&self, relative_path: &str) -> Option<usize> {
        self.manifest.entry_index(relative_path)
    }

    /// Returns the entry with the given relative path.
    #[must_use]
    pub fn find_entry(&self, relative_path: &str) -> Option<&FileEntry> {
        self.manifest.find_entry(relative_path)
    }

    fn entry_at(&self, index: usize) -> Result<&FileEntry> {
        self.manifest.entry(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Entry index {index} out of range, bundle has {} entries",
                self.manifest.entries().len()
            ))
        })
    }

    /// Opens the plain bytes of an entry.
    ///
    /// A pending replacement is served directly. Otherwise the stored bytes are copied out
    /// of the host binary, inflating them first if the entry is compressed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a bad index,
    /// [`crate::Error::OutOfBounds`] if the entry lies outside of the host binary, or
    /// [`crate::Error::Malformed`] if the compressed data does not inflate to the declared size.
    pub fn get_stream(&mut self, index: usize) -> Result<EntryStream<'_>> {
        self.entry_at(index)?;

        if self.manifest.entries()[index].is_modified() {
            let Some(modified) = self.manifest.entries_mut()[index].modified_mut() else {
                return Err(Error::Error("replacement disappeared".to_string()));
            };

            let location = modified.location();
            let view = StreamView::new(modified.stream_mut(), location.offset, location.size)?;
            return Ok(EntryStream::Modified(view));
        }

        let data = self.stored_bytes(&self.manifest.entries()[index])?.into_owned();
        Ok(EntryStream::Buffered(Cursor::new(data)))
    }

    /// Returns a copy of the plain bytes of an entry.
    ///
    /// # Errors
    ///
    /// See [`SingleFileBundle::get_stream`].
    pub fn read_entry(&self, index: usize) -> Result<Vec<u8>> {
        let entry = self.entry_at(index)?;
        Ok(self.plain_bytes(entry)?.into_owned())
    }

    /// Replaces the content of an entry. The host binary is untouched until the next save.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a bad index.
    pub fn modify_file_entry(&mut self, index: usize, data: Vec<u8>) -> Result<()> {
        self.entry_at(index)?;
        self.manifest.entries_mut()[index].modify(data);
        Ok(())
    }

    fn plain_bytes<'a>(&'a self, entry: &'a FileEntry) -> Result<Cow<'a, [u8]>> {
        match entry.modified() {
            Some(modified) => Ok(Cow::Borrowed(modified.data())),
            None => self.stored_bytes(entry),
        }
    }

    fn stored_bytes(&self, entry: &FileEntry) -> Result<Cow<'_, [u8]>> {
        let (Ok(offset), Ok(size)) = (
            usize::try_from(entry.location.offset),
            usize::try_from(entry.location.size),
        ) else {
            return Err(malformed_error!("Invalid location of '{}'", entry.relative_path));
        };

        if !entry.is_compressed() {
            return Ok(Cow::Borrowed(self.backend.data_slice(offset, size)?));
        }

        let Ok(compressed_size) = usize::try_from(entry.compressed_size) else {
            return Err(out_of_bounds_error!());
        };
        let compressed = self.backend.data_slice(offset, compressed_size)?;

        // The declared size is untrusted, growth is bounded by take()
        let mut data = Vec::with_capacity(size.min(compressed_size.saturating_mul(4)));
        DeflateDecoder::new(compressed)
            .take(size as u64)
            .read_to_end(&mut data)?;

        if data.len() != size {
            return Err(malformed_error!(
                "'{}' inflated to {} bytes, expected {}",
                entry.relative_path,
                data.len(),
                size
            ));
        }

        Ok(Cow::Owned(data))
    }

    /// Writes a new host binary with all pending replacements to `path`.
    ///
    /// The output is not written atomically; a failure leaves a partial file behind.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `path` is the file this bundle was
    /// loaded from (it is still mapped), otherwise see [`SingleFileBundle::save_to`].
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        target: TargetInfo,
        options: &BundlerOptions,
    ) -> Result<()> {
        let path = path.as_ref();

        if let Some(source) = &self.path {
            if let (Ok(source), Ok(destination)) = (fs::canonicalize(source), fs::canonicalize(path)) {
                if source == destination {
                    return Err(Error::InvalidArgument(format!(
                        "Cannot overwrite the mapped source binary {}",
                        path.display()
                    )));
                }
            }
        }

        let file = fs::File::create(path)?;
        let mut sink = self.save_to(BufWriter::new(file), target, options)?;
        sink.flush()?;
        Ok(())
    }

    /// Writes a new host binary with all pending replacements to `sink` and returns it.
    ///
    /// Offsets in the output are relative to the sink position at the time of the call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Malformed`] if the signature lies inside the bundle data or an
    /// entry cannot be read, or an I/O error from the sink.
    pub fn save_to<W: Write + Seek>(
        &self,
        sink: W,
        target: TargetInfo,
        options: &BundlerOptions,
    ) -> Result<W> {
        let Ok(bundle_offset) = usize::try_from(self.bundle_offset) else {
            return Err(malformed_error!("Invalid bundle offset {}", self.bundle_offset));
        };

        if self.signature_offset + BUNDLE_SIGNATURE.len() > bundle_offset {
            return Err(malformed_error!(
                "Bundle signature at {:#x} overlaps bundle data at {:#x}",
                self.signature_offset,
                bundle_offset
            ));
        }

        if !self.is_bundle_last_data {
            warn!("Dropping data appended after the bundle manifest");
        }

        let alignment = target.assembly_alignment();
        let major_version = self.manifest.major_version;
        let compress = options.use_compression && major_version >= 6;

        let mut writer = EndianWriter::new(sink);
        let base = writer.position()?;
        writer.write_bytes(self.backend.data_slice(0, bundle_offset)?)?;

        let mut table = EndianWriter::new(Cursor::new(Vec::new()));
        let mut bundle_hash = Sha256::new();
        let mut deps_json_location = None;
        let mut runtime_config_json_location = None;

        for entry in self.manifest.entries() {
            let data = self.plain_bytes(entry)?;
            bundle_hash.update(Sha256::digest(&data));

            let mut compressed_size = 0i64;
            let mut offset = (writer.position()? - base) as i64;

            let compressed = if compress && entry.file_type.should_compress() {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
                encoder.write_all(&data)?;
                let compressed = encoder.finish()?;

                options
                    .accepts_compressed(compressed.len() as u64, data.len() as u64)
                    .then_some(compressed)
            } else {
                None
            };

            if let Some(compressed) = compressed {
                compressed_size = compressed.len() as i64;
                writer.write_bytes(&compressed)?;
            } else {
                if entry.file_type == FileType::Assembly && alignment != 1 {
                    writer.write_zeros(calculate_padding(offset, alignment) as u64)?;
                    offset = (writer.position()? - base) as i64;
                }
                writer.write_bytes(&data)?;
            }

            let location = FileLocation::new(offset, data.len() as i64);
            trace!(
                "{} at {:#x}: {} bytes{}",
                entry.relative_path,
                offset,
                data.len(),
                if compressed_size > 0 {
                    format!(", {compressed_size} compressed")
                } else {
                    String::new()
                }
            );

            match entry.file_type {
                FileType::DepsJson if deps_json_location.is_none() => {
                    deps_json_location = Some(location);
                }
                FileType::RuntimeConfigJson if runtime_config_json_location.is_none() => {
                    runtime_config_json_location = Some(location);
                }
                _ => {}
            }

            entry.write_with(&mut table, location, compressed_size, major_version)?;
        }

        let bundle_id = Self::bundle_id(&bundle_hash.finalize());
        let manifest_offset = (writer.position()? - base) as i64;

        self.manifest.write_header(
            &mut writer,
            &bundle_id,
            deps_json_location.unwrap_or_default(),
            runtime_config_json_location.unwrap_or_default(),
        )?;
        writer.write_bytes(table.into_inner()?.get_ref())?;

        let end = writer.position()?;
        writer.set_position(base + (self.signature_offset - 8) as u64)?;
        writer.write_i64(manifest_offset, EndianType::Little)?;
        writer.set_position(end)?;

        debug!(
            "Saved bundle '{}': {} entries, manifest at {:#x}, {} bytes",
            bundle_id,
            self.manifest.entries().len(),
            manifest_offset,
            end - base
        );

        writer.into_inner()
    }

    /// Derives the on-disk bundle id from the bundle hash.
    fn bundle_id(hash: &[u8]) -> String {
        STANDARD.encode(hash)[BundleManifest::BUNDLE_ID_LENGTH..].replace('/', "_")
    }
}

impl fmt::Debug for SingleFileBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFileBundle")
            .field("path", &self.path)
            .field("len", &self.backend.len())
            .field("signature_offset", &self.signature_offset)
            .field("manifest_offset", &self.manifest_offset)
            .field("bundle_offset", &self.bundle_offset)
            .field("is_bundle_last_data", &self.is_bundle_last_data)
            .field("manifest", &self.manifest)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, SeekFrom};

    use super::*;

    const HOST_PREFIX: usize = 0x40;

    /// Apphost stand-in: prefix, manifest offset, signature, then the bundle.
    fn build(major_version: u32, files: &[(&str, FileType, &[u8])]) -> Vec<u8> {
        let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
        writer
            .write_bytes(b"MZ")
            .unwrap()
            .write_zeros(HOST_PREFIX as u64 - 2)
            .unwrap()
            .write_i64(0, EndianType::Little)
            .unwrap()
            .write_bytes(&BUNDLE_SIGNATURE)
            .unwrap()
            .write_zeros(8)
            .unwrap();

        let mut manifest = BundleManifest::new(major_version, 0, "original");

        for (path, file_type, data) in files {
            let offset = writer.position().unwrap() as i64;
            writer.write_bytes(data).unwrap();
            let location = FileLocation::new(offset, data.len() as i64);
            match file_type {
                FileType::DepsJson => manifest.deps_json_location = location,
                FileType::RuntimeConfigJson => manifest.runtime_config_json_location = location,
                _ => {}
            }
            manifest.push_entry(FileEntry::new(location, *file_type, path));
        }

        let manifest_offset = writer.position().unwrap() as i64;
        manifest.write(&mut writer).unwrap();
        writer.set_position(HOST_PREFIX as u64).unwrap();
        writer.write_i64(manifest_offset, EndianType::Little).unwrap();
        writer.into_inner().unwrap().into_inner()
    }

    fn sample() -> Vec<u8> {
        build(
            6,
            &[
                ("App.dll", FileType::Assembly, &[0xAB; 300]),
                ("App.deps.json", FileType::DepsJson, b"{\"deps\":{}}"),
                ("App.runtimeconfig.json", FileType::RuntimeConfigJson, b"{}"),
            ],
        )
    }

    #[test]
    fn discovery() {
        let bundle = SingleFileBundle::from_mem(sample()).unwrap().unwrap();

        assert_eq!(bundle.signature_offset(), HOST_PREFIX + 8);
        assert_eq!(bundle.bundle_offset(), (HOST_PREFIX + 8 + 32 + 8) as i64);
        assert_eq!(bundle.manifest_offset(), bundle.bundle_offset() + 300 + 11 + 2);
        assert!(bundle.is_bundle_last_data());
        assert!(bundle.path().is_none());

        let manifest = bundle.manifest();
        assert_eq!(manifest.entries().len(), 3);
        assert_eq!(manifest.bundle_id, "original");
        assert_eq!(
            manifest.deps_json_entry().unwrap().relative_path,
            "App.deps.json"
        );
        assert_eq!(bundle.entry_index("App.runtimeconfig.json"), Some(2));
        assert_eq!(bundle.read_entry(1).unwrap(), b"{\"deps\":{}}");
    }

    #[test]
    fn trailing_data() {
        let mut data = sample();
        data.extend_from_slice(&[0u8; 16]);

        let bundle = SingleFileBundle::from_mem(data).unwrap().unwrap();
        assert!(!bundle.is_bundle_last_data());
    }

    #[test]
    fn no_signature() {
        assert!(SingleFileBundle::from_mem(vec![0u8; 256]).unwrap().is_none());
        assert!(SingleFileBundle::from_mem(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn invalid_manifest_offset() {
        let mut data = sample();
        data[HOST_PREFIX..HOST_PREFIX + 8].copy_from_slice(&(-1i64).to_le_bytes());
        assert!(matches!(
            SingleFileBundle::from_mem(data),
            Err(Error::Malformed { .. })
        ));

        let mut data = BUNDLE_SIGNATURE.to_vec();
        data.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            SingleFileBundle::from_mem(data),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn streams() {
        let mut bundle = SingleFileBundle::from_mem(sample()).unwrap().unwrap();

        let stream = bundle.get_stream(0).unwrap();
        assert_eq!(stream.len(), 300);
        assert!(matches!(stream, EntryStream::Buffered(_)));

        bundle.modify_file_entry(0, vec![1, 2, 3]).unwrap();
        let mut stream = bundle.get_stream(0).unwrap();
        assert!(matches!(stream, EntryStream::Modified(_)));
        stream.seek(SeekFrom::Start(1)).unwrap();
        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, [2, 3]);

        assert!(matches!(
            bundle.get_stream(3),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            bundle.modify_file_entry(3, Vec::new()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn save_layout() {
        let bundle = SingleFileBundle::from_mem(sample()).unwrap().unwrap();
        let options = BundlerOptions::default().with_compression(false);
        let output = bundle
            .save_to(Cursor::new(Vec::new()), TargetInfo::Other, &options)
            .unwrap()
            .into_inner();

        let saved = SingleFileBundle::from_mem(output).unwrap().unwrap();
        let assembly = &saved.manifest().entries()[0];
        assert_eq!(assembly.location.offset % 64, 0);
        assert!(assembly.location.offset >= saved.bundle_offset());
        assert!(!assembly.is_compressed());
        assert!(saved.is_bundle_last_data());

        // Header locations follow the configuration files
        let manifest = saved.manifest();
        assert_eq!(
            manifest.runtime_config_json_location,
            manifest.entries()[2].location
        );
        assert_eq!(manifest.bundle_id.len(), 44 - BundleManifest::BUNDLE_ID_LENGTH);
        assert!(!manifest.bundle_id.contains('/'));
        assert_eq!(saved.read_entry(0).unwrap(), vec![0xAB; 300]);
    }

    #[test]
    fn save_compresses() {
        let bundle = SingleFileBundle::from_mem(sample()).unwrap().unwrap();
        let output = bundle
            .save_to(
                Cursor::new(Vec::new()),
                TargetInfo::Unknown,
                &BundlerOptions::default(),
            )
            .unwrap()
            .into_inner();

        let saved = SingleFileBundle::from_mem(output).unwrap().unwrap();
        let entries = saved.manifest().entries();
        assert!(entries[0].is_compressed());
        assert!(!entries[1].is_compressed());
        assert!(!entries[2].is_compressed());
        assert_eq!(saved.read_entry(0).unwrap(), vec![0xAB; 300]);
    }

    #[test]
    fn save_before_v6_stores_raw() {
        let data = build(2, &[("App.dll", FileType::Assembly, &[0u8; 512])]);
        let bundle = SingleFileBundle::from_mem(data).unwrap().unwrap();
        let options = BundlerOptions::default().with_force_compression(true);
        let output = bundle
            .save_to(Cursor::new(Vec::new()), TargetInfo::Unknown, &options)
            .unwrap()
            .into_inner();

        let saved = SingleFileBundle::from_mem(output).unwrap().unwrap();
        assert!(!saved.manifest().entries()[0].is_compressed());
        assert_eq!(saved.read_entry(0).unwrap(), vec![0u8; 512]);
    }

    #[test]
    fn corrupt_compressed_entry() {
        let bundle = SingleFileBundle::from_mem(sample()).unwrap().unwrap();
        let mut output = bundle
            .save_to(
                Cursor::new(Vec::new()),
                TargetInfo::Unknown,
                &BundlerOptions::default(),
            )
            .unwrap()
            .into_inner();

        let saved = SingleFileBundle::from_mem(output.clone()).unwrap().unwrap();
        let metadata = saved.manifest().entries()[0].metadata_offset as usize;

        // Declare a larger plain size than the stream inflates to
        output[metadata + 8..metadata + 16].copy_from_slice(&301i64.to_le_bytes());
        let saved = SingleFileBundle::from_mem(output.clone()).unwrap().unwrap();
        assert!(matches!(saved.read_entry(0), Err(Error::Malformed { .. })));

        // A declared size far beyond memory is rejected without allocating it
        output[metadata + 8..metadata + 16].copy_from_slice(&(1i64 << 46).to_le_bytes());
        let mut saved = SingleFileBundle::from_mem(output).unwrap().unwrap();
        assert!(saved.manifest().entries()[0].is_compressed());
        assert!(matches!(saved.read_entry(0), Err(Error::Malformed { .. })));
        assert!(matches!(saved.get_stream(0), Err(Error::Malformed { .. })));
    }

    #[test]
    fn bundle_id_format() {
        let id = SingleFileBundle::bundle_id(&[0xFF; 32]);
        assert_eq!(id, format!("{}8=", "_".repeat(30)));
    }
}
