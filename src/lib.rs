// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![warn(missing_docs)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # bundlescope
//!
//! [![Crates.io](https://img.shields.io/crates/v/bundlescope.svg)](https://crates.io/crates/bundlescope)
//! [![Documentation](https://docs.rs/bundlescope/badge.svg)](https://docs.rs/bundlescope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/bundlescope/blob/main/LICENSE-APACHE)
//!
//! An endian-aware binary reader/writer and a rewriting engine for .NET single-file
//! application bundles, built in pure Rust.
//!
//! A single-file bundle is an apphost executable with all managed assemblies, native
//! libraries and configuration files appended to it. A fixed 32-byte signature inside the
//! host points at a manifest describing every packaged file. `bundlescope` locates that
//! manifest, exposes every entry as a readable stream (transparently inflating compressed
//! entries), lets callers replace entry contents in memory, and writes a new bundle with
//! correct offsets, alignment, compression and a deterministic bundle identifier.
//!
//! ## Features
//!
//! - **Endian-aware primitives** - Little and big endian conversion of integers, floats and GUIDs
//! - **Buffered reader** - Exact/partial reads, C strings, prefixed strings, lines, 7-bit varints
//! - **Region views** - Treat a sub-window of a stream as if it was the whole stream
//! - **Read hooks** - Observe or transform every physical read in place
//! - **Signature search** - Linear-time exact search and wildcard byte-pattern scans
//! - **Bundle rewriting** - Decode, modify and re-assemble single-file bundles byte-exactly
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bundlescope = "0.1"
//! ```
//!
//! ### Inspecting a Bundle
//!
//! ```rust,no_run
//! use bundlescope::SingleFileBundle;
//!
//! let Some(bundle) = SingleFileBundle::from_file("app.exe")? else {
//!     println!("Not a single-file bundle");
//!     return Ok(());
//! };
//!
//! let manifest = bundle.manifest();
//! println!("Bundle {} v{}.{}", manifest.bundle_id, manifest.major_version, manifest.minor_version);
//! for entry in manifest.entries() {
//!     println!("{:?} {} ({} bytes)", entry.file_type, entry.relative_path, entry.location.size);
//! }
//! # Ok::<(), bundlescope::Error>(())
//! ```
//!
//! ### Replacing an Entry
//!
//! ```rust,no_run
//! use bundlescope::{BundlerOptions, SingleFileBundle, TargetInfo};
//!
//! let mut bundle = SingleFileBundle::from_file("app.exe")?.ok_or(bundlescope::Error::Empty)?;
//!
//! let index = bundle
//!     .entry_index("app.runtimeconfig.json")
//!     .ok_or(bundlescope::Error::Empty)?;
//! bundle.modify_file_entry(index, br#"{"runtimeOptions":{}}"#.to_vec())?;
//!
//! bundle.save("patched.exe", TargetInfo::Windows, &BundlerOptions::default())?;
//! # Ok::<(), bundlescope::Error>(())
//! ```
//!
//! ### Reading Binary Data
//!
//! ```rust
//! use bundlescope::io::{EndianReader, EndianType};
//! use std::io::Cursor;
//!
//! let data = vec![0x00, 0x00, 0x00, 0x2A, 0x05, b'h', b'e', b'l', b'l', b'o'];
//! let mut reader = EndianReader::new(Cursor::new(data));
//!
//! assert_eq!(reader.read_u32(EndianType::Big)?, 42);
//! assert_eq!(reader.read_string()?, "hello");
//! # Ok::<(), bundlescope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io`] - Endian conversion, alignment math, hash values, reader, writer, stream views, search
//! - [`file`] - Memory-mapped and in-memory backends for host binaries
//! - [`bundle`] - Manifest model, discovery and the rewrite pipeline
//! - [`model`] - Field-descriptor driven, version-gated record reading and writing
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). A host binary without a bundle
//! signature is not an error: discovery returns `Ok(None)`.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
pub mod prelude;

/// Endian-aware binary reading, writing and searching.
///
/// The building blocks used by the bundle engine, usable on their own for any binary format:
/// [`io::EndianReader`] and [`io::EndianWriter`] for cursor based access, [`io::decode`] and
/// [`io::encode`] for raw buffers, [`io::StreamView`] for bounded sub-streams, and
/// [`io::search_in_buffer`] / [`io::SignaturePattern`] for byte-pattern search.
pub mod io;

/// Host binary data sources.
pub mod file;

/// .NET single-file bundle model, discovery and rewriting.
pub mod bundle;

/// Field-descriptor based binary record models.
pub mod model;

/// `bundlescope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bundlescope` Error type
///
/// The main error type for all operations in this crate.
pub use error::Error;

pub use bundle::{
    BundleManifest, BundlerOptions, FileEntry, FileLocation, FileType, HeaderFlags,
    SingleFileBundle, TargetInfo,
};
pub use io::{EndianReader, EndianType, EndianWriter, Sha1};
