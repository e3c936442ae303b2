//! .NET single-file bundle model, discovery and rewriting.
//!
//! A single-file bundle is produced by the .NET SDK (`PublishSingleFile`) by appending every
//! managed assembly, native library and configuration file of an application to the apphost
//! executable, followed by a manifest. The apphost contains a fixed 32-byte signature; the 8
//! bytes before it hold the file offset of the manifest.
//!
//! # Layout
//!
//! ```text
//! +----------------------+
//! | apphost              |  <- contains [manifest offset: i64][BUNDLE_SIGNATURE]
//! +----------------------+  <- bundle offset
//! | entry data           |  assemblies aligned per TargetInfo, optionally DEFLATE compressed
//! +----------------------+  <- manifest offset
//! | BundleManifest       |  header + FileEntry records
//! +----------------------+
//! ```
//!
//! # Key Components
//!
//! - [`SingleFileBundle`] - Discovery, entry access, modification and saving
//! - [`BundleManifest`] / [`FileEntry`] / [`FileLocation`] - The on-disk model
//! - [`TargetInfo`] / [`BundlerOptions`] - Platform alignment and compression settings
//! - [`EntryStream`] - Readable, seekable plain bytes of one entry
//!
//! # Examples
//!
//! ```rust,no_run
//! use bundlescope::{BundlerOptions, SingleFileBundle, TargetInfo};
//!
//! let bundle = SingleFileBundle::from_file("app")?.ok_or(bundlescope::Error::Empty)?;
//! let target = TargetInfo::detect(bundle.data())?;
//!
//! // Re-pack without compression
//! let options = BundlerOptions::default().with_compression(false);
//! bundle.save("app.uncompressed", target, &options)?;
//! # Ok::<(), bundlescope::Error>(())
//! ```

mod entry;
mod location;
mod manifest;
mod options;
mod singlefile;
mod stream;
mod target;

pub use entry::{FileEntry, FileType, ModifiedFileEntryMeta};
pub use location::FileLocation;
pub use manifest::{BundleManifest, HeaderFlags};
pub use options::BundlerOptions;
pub use singlefile::{SingleFileBundle, BUNDLE_SIGNATURE};
pub use stream::EntryStream;
pub use target::TargetInfo;
