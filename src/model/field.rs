use std::fmt;

use strum::{EnumCount, EnumIter};
use uguid::Guid;

use crate::io::{EndianType, Sha1};

/// Wire type of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum FieldKind {
    /// `u8`
    U8,
    /// `i8`
    I8,
    /// One byte, non-zero is `true`
    Bool,
    /// `u16`
    U16,
    /// `i16`
    I16,
    /// `u32`
    U32,
    /// `i32`
    I32,
    /// `u64`
    U64,
    /// `i64`
    I64,
    /// IEEE 754 single precision
    F32,
    /// IEEE 754 double precision
    F64,
    /// 16 byte GUID
    Guid,
    /// 20 byte hash
    Sha1,
    /// 7-bit encoded `i32`
    VarInt,
    /// 7-bit encoded `i64`
    VarLong,
    /// 7-bit length prefixed string
    String,
    /// Zero terminated string
    CString,
    /// Zero padded string in a fixed-size field
    SizedCString(usize),
    /// Fixed number of raw bytes
    Bytes(usize),
}

impl FieldKind {
    /// Encoded size, `None` if it depends on the value.
    #[must_use]
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            FieldKind::U8 | FieldKind::I8 | FieldKind::Bool => Some(1),
            FieldKind::U16 | FieldKind::I16 => Some(2),
            FieldKind::U32 | FieldKind::I32 | FieldKind::F32 => Some(4),
            FieldKind::U64 | FieldKind::I64 | FieldKind::F64 => Some(8),
            FieldKind::Guid => Some(16),
            FieldKind::Sha1 => Some(Sha1::STRUCT_SIZE),
            FieldKind::SizedCString(size) | FieldKind::Bytes(size) => Some(size),
            FieldKind::VarInt | FieldKind::VarLong | FieldKind::String | FieldKind::CString => None,
        }
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// `u8`
    U8(u8),
    /// `i8`
    I8(i8),
    /// Boolean
    Bool(bool),
    /// `u16`
    U16(u16),
    /// `i16`
    I16(i16),
    /// `u32`
    U32(u32),
    /// `i32`, also used for [`FieldKind::VarInt`]
    I32(i32),
    /// `u64`
    U64(u64),
    /// `i64`, also used for [`FieldKind::VarLong`]
    I64(i64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// GUID
    Guid(Guid),
    /// 20 byte hash
    Sha1(Sha1),
    /// Any of the string kinds
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Returns `true` if this value can be written as `kind`.
    #[must_use]
    pub fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (self, kind),
            (FieldValue::U8(_), FieldKind::U8)
                | (FieldValue::I8(_), FieldKind::I8)
                | (FieldValue::Bool(_), FieldKind::Bool)
                | (FieldValue::U16(_), FieldKind::U16)
                | (FieldValue::I16(_), FieldKind::I16)
                | (FieldValue::U32(_), FieldKind::U32)
                | (FieldValue::I32(_), FieldKind::I32 | FieldKind::VarInt)
                | (FieldValue::U64(_), FieldKind::U64)
                | (FieldValue::I64(_), FieldKind::I64 | FieldKind::VarLong)
                | (FieldValue::F32(_), FieldKind::F32)
                | (FieldValue::F64(_), FieldKind::F64)
                | (FieldValue::Guid(_), FieldKind::Guid)
                | (FieldValue::Sha1(_), FieldKind::Sha1)
                | (
                    FieldValue::String(_),
                    FieldKind::String | FieldKind::CString | FieldKind::SizedCString(_)
                )
                | (FieldValue::Bytes(_), FieldKind::Bytes(_))
        )
    }
}

/// Describes one field of a [`crate::model::BinaryModel`].
///
/// Fields are ordered by `index`. A field only exists in versions within
/// `[min_version, max_version]`; unset bounds are open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name used to address the value in a [`crate::model::ModelRecord`]
    pub name: String,
    /// Wire type
    pub kind: FieldKind,
    /// Byte order of numeric kinds
    pub endian: EndianType,
    /// First version containing the field
    pub min_version: Option<u32>,
    /// Last version containing the field
    pub max_version: Option<u32>,
    /// Position in the record, assigned in declaration order if not set
    pub index: Option<u32>,
}

impl FieldDescriptor {
    /// Creates a little-endian field present in every version.
    #[must_use]
    pub fn new(name: &str, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.to_string(),
            kind,
            endian: EndianType::Little,
            min_version: None,
            max_version: None,
            index: None,
        }
    }

    /// Sets the byte order.
    #[must_use]
    pub fn with_endian(mut self, endian: EndianType) -> Self {
        self.endian = endian;
        self
    }

    /// Sets the first version containing the field.
    #[must_use]
    pub fn with_min_version(mut self, version: u32) -> Self {
        self.min_version = Some(version);
        self
    }

    /// Sets the last version containing the field.
    #[must_use]
    pub fn with_max_version(mut self, version: u32) -> Self {
        self.max_version = Some(version);
        self
    }

    /// Sets the position in the record.
    #[must_use]
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns `true` if the field exists in `version`.
    #[must_use]
    pub fn is_present(&self, version: u32) -> bool {
        self.min_version.map_or(true, |min| version >= min)
            && self.max_version.map_or(true, |max| version <= max)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.name, self.kind)
    }
}
