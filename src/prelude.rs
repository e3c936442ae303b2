//! # bundlescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bundlescope library. Import this module to get quick access to the essential
//! types for binary reading, writing and bundle rewriting.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bundlescope operations
pub use crate::Error;

/// The result type used throughout bundlescope
pub use crate::Result;

// ================================================================================================
// Binary I/O
// ================================================================================================

/// Byte order selection and conversion
pub use crate::io::{decode, decode_at, encode, encode_at, EndianIO, EndianType};

/// Buffered reader, writer and their helpers
pub use crate::io::{
    Analyzer, EndianReader, EndianWriter, ReaderOptions, RegionRange, StreamView, TextEncoding,
};

/// Fixed-size hash value
pub use crate::io::Sha1;

/// Alignment arithmetic
pub use crate::io::{apply_alignment, calculate_padding};

/// Byte-pattern search
pub use crate::io::{search_in_buffer, SignaturePattern};

// ================================================================================================
// Single-File Bundles
// ================================================================================================

/// Bundle session and its manifest model
pub use crate::bundle::{
    BundleManifest, EntryStream, FileEntry, FileLocation, FileType, HeaderFlags,
    ModifiedFileEntryMeta, SingleFileBundle,
};

/// Rewrite configuration
pub use crate::bundle::{BundlerOptions, TargetInfo};

// ================================================================================================
// Binary Models
// ================================================================================================

/// Field-descriptor based record models
pub use crate::model::{BinaryModel, FieldDescriptor, FieldKind, FieldValue, ModelRecord};
