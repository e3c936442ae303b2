//! Synthetic host binaries for the integration tests.

#![allow(dead_code)]

use bundlescope::{bundle::BUNDLE_SIGNATURE, prelude::*};
use std::io::Cursor;

/// Size of the fake apphost in front of the manifest offset field.
pub const HOST_PREFIX: usize = 0x200;

/// Builds an apphost with a bundle appended the way the SDK lays it out.
pub struct BundleBuilder {
    major_version: u32,
    minor_version: u32,
    files: Vec<(String, FileType, Vec<u8>)>,
    trailer: Vec<u8>,
}

impl BundleBuilder {
    pub fn new(major_version: u32) -> Self {
        BundleBuilder {
            major_version,
            minor_version: 0,
            files: Vec::new(),
            trailer: Vec::new(),
        }
    }

    pub fn file(mut self, path: &str, file_type: FileType, data: &[u8]) -> Self {
        self.files.push((path.to_string(), file_type, data.to_vec()));
        self
    }

    /// Data appended after the manifest, like an Authenticode signature.
    pub fn trailer(mut self, data: &[u8]) -> Self {
        self.trailer = data.to_vec();
        self
    }

    pub fn build(self) -> Result<Vec<u8>> {
        let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
        writer
            .write_bytes(b"MZ")?
            .write_zeros(HOST_PREFIX as u64 - 2)?
            .write_i64(0, EndianType::Little)?
            .write_bytes(&BUNDLE_SIGNATURE)?
            .write_bytes(b"apphost code after the signature")?;

        let mut manifest =
            BundleManifest::new(self.major_version, self.minor_version, "synthetic");

        for (path, file_type, data) in &self.files {
            let offset = writer.position()? as i64;
            writer.write_bytes(data)?;

            let location = FileLocation::new(offset, data.len() as i64);
            match file_type {
                FileType::DepsJson => manifest.deps_json_location = location,
                FileType::RuntimeConfigJson => manifest.runtime_config_json_location = location,
                _ => {}
            }
            manifest.push_entry(FileEntry::new(location, *file_type, path));
        }

        let manifest_offset = writer.position()? as i64;
        manifest.write(&mut writer)?;
        writer.write_bytes(&self.trailer)?;

        writer.set_position(HOST_PREFIX as u64)?;
        writer.write_i64(manifest_offset, EndianType::Little)?;

        Ok(writer.into_inner()?.into_inner())
    }
}

/// Deterministic bytes that DEFLATE cannot shrink.
pub fn noise(length: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    (0..length)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// A typical framework-dependent application.
pub fn sample_app(major_version: u32) -> BundleBuilder {
    BundleBuilder::new(major_version)
        .file("App.dll", FileType::Assembly, &[0x4D; 4000])
        .file("Library.dll", FileType::Assembly, &noise(3000, 7))
        .file("libnative.so", FileType::NativeBinary, &noise(1500, 11))
        .file("App.pdb", FileType::Symbols, b"symbols symbols symbols symbols symbols")
        .file(
            "App.deps.json",
            FileType::DepsJson,
            br#"{"runtimeTarget":{"name":".NETCoreApp,Version=v8.0"}}"#,
        )
        .file(
            "App.runtimeconfig.json",
            FileType::RuntimeConfigJson,
            br#"{"runtimeOptions":{"tfm":"net8.0"}}"#,
        )
}
