//! Field-descriptor based binary record models.
//!
//! Fixed binary headers are often versioned: a field is added in one revision and dropped in
//! a later one. A [`BinaryModel`] is an explicit, ordered list of [`FieldDescriptor`]s, each
//! with a wire type, byte order and an optional version range. The model reads and writes
//! [`ModelRecord`]s through [`crate::io::EndianReader`] / [`crate::io::EndianWriter`],
//! skipping fields that do not exist in its current version.
//!
//! # Key Components
//!
//! - [`FieldKind`] / [`FieldValue`] - Wire types and the values they decode to
//! - [`FieldDescriptor`] - Name, kind, endianness, version range and position of a field
//! - [`BinaryModel`] / [`BinaryModelBuilder`] - Validated field lists with a current version
//! - [`ModelRecord`] - Named values of one decoded instance

mod binary;
mod field;
mod record;

pub use binary::{BinaryModel, BinaryModelBuilder};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use record::ModelRecord;
