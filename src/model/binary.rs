use std::{
    collections::HashSet,
    io::{Read, Seek, Write},
};

use crate::{
    io::{EndianReader, EndianWriter},
    model::{
        field::{FieldDescriptor, FieldKind, FieldValue},
        record::ModelRecord,
    },
    Error, Result,
};

/// An ordered list of field descriptors with a current version.
///
/// Reading and writing only touch the fields present in the current version.
///
/// # Examples
///
/// ```rust
/// use bundlescope::io::{EndianReader, EndianType, EndianWriter};
/// use bundlescope::model::{BinaryModel, FieldDescriptor, FieldKind, FieldValue, ModelRecord};
/// use std::io::Cursor;
///
/// let model = BinaryModel::builder(1)
///     .field(FieldDescriptor::new("magic", FieldKind::U32).with_endian(EndianType::Big))
///     .field(FieldDescriptor::new("name", FieldKind::String))
///     .field(FieldDescriptor::new("flags", FieldKind::U16).with_min_version(2))
///     .build()?;
///
/// let record = ModelRecord::new()
///     .with("magic", FieldValue::U32(0xCAFE_BABE))
///     .with("name", FieldValue::String("app".to_string()));
///
/// let mut writer = EndianWriter::new(Cursor::new(Vec::new()));
/// model.write(&mut writer, &record)?;
///
/// let mut reader = EndianReader::new(writer.into_inner()?);
/// reader.set_position(0)?;
/// assert_eq!(model.read(&mut reader)?, record);
/// # Ok::<(), bundlescope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinaryModel {
    version: u32,
    fields: Vec<FieldDescriptor>,
}

/// Builder for [`BinaryModel`].
#[derive(Debug, Clone)]
pub struct BinaryModelBuilder {
    version: u32,
    fields: Vec<FieldDescriptor>,
}

impl BinaryModelBuilder {
    /// Appends a field. Fields without an explicit index follow the previous field.
    #[must_use]
    pub fn field(mut self, mut field: FieldDescriptor) -> Self {
        if field.index.is_none() {
            let next = self
                .fields
                .iter()
                .filter_map(|field| field.index)
                .max()
                .map_or(0, |index| index + 1);
            field.index = Some(next);
        }
        self.fields.push(field);
        self
    }

    /// Validates the fields and orders them by index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for duplicate names or indices, or a field
    /// whose `min_version` exceeds its `max_version`.
    pub fn build(mut self) -> Result<BinaryModel> {
        let mut names = HashSet::new();
        let mut indices = HashSet::new();

        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate field name '{}'",
                    field.name
                )));
            }

            if let Some(index) = field.index {
                if !indices.insert(index) {
                    return Err(Error::InvalidArgument(format!(
                        "duplicate field index {index} on '{}'",
                        field.name
                    )));
                }
            }

            if let (Some(min), Some(max)) = (field.min_version, field.max_version) {
                if min > max {
                    return Err(Error::InvalidArgument(format!(
                        "field '{}' has min version {min} above max version {max}",
                        field.name
                    )));
                }
            }
        }

        self.fields.sort_by_key(|field| field.index);

        Ok(BinaryModel {
            version: self.version,
            fields: self.fields,
        })
    }
}

impl BinaryModel {
    /// Starts a model read and written as `current_version`.
    #[must_use]
    pub fn builder(current_version: u32) -> BinaryModelBuilder {
        BinaryModelBuilder {
            version: current_version,
            fields: Vec::new(),
        }
    }

    /// The version fields are filtered by.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Returns a copy of this model for another version.
    #[must_use]
    pub fn with_version(&self, version: u32) -> Self {
        BinaryModel {
            version,
            fields: self.fields.clone(),
        }
    }

    /// All fields ordered by index, regardless of version.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Fields present in the current version.
    pub fn active_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |field| field.is_present(self.version))
    }

    /// Encoded size of a record in `version`, `None` if any present field is dynamic.
    #[must_use]
    pub fn type_size(&self, version: u32) -> Option<usize> {
        self.fields
            .iter()
            .filter(|field| field.is_present(version))
            .map(|field| field.kind.fixed_size())
            .sum()
    }

    /// Reads one record.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying reads.
    pub fn read<S: Read + Seek>(&self, reader: &mut EndianReader<S>) -> Result<ModelRecord> {
        let mut record = ModelRecord::new();

        for field in self.active_fields() {
            let endian = field.endian;
            let value = match field.kind {
                FieldKind::U8 => FieldValue::U8(reader.read_u8()?),
                FieldKind::I8 => FieldValue::I8(reader.read_i8()?),
                FieldKind::Bool => FieldValue::Bool(reader.read_bool()?),
                FieldKind::U16 => FieldValue::U16(reader.read_u16(endian)?),
                FieldKind::I16 => FieldValue::I16(reader.read_i16(endian)?),
                FieldKind::U32 => FieldValue::U32(reader.read_u32(endian)?),
                FieldKind::I32 => FieldValue::I32(reader.read_i32(endian)?),
                FieldKind::U64 => FieldValue::U64(reader.read_u64(endian)?),
                FieldKind::I64 => FieldValue::I64(reader.read_i64(endian)?),
                FieldKind::F32 => FieldValue::F32(reader.read_f32(endian)?),
                FieldKind::F64 => FieldValue::F64(reader.read_f64(endian)?),
                FieldKind::Guid => FieldValue::Guid(reader.read_guid(endian)?),
                FieldKind::Sha1 => FieldValue::Sha1(reader.read_sha1()?),
                FieldKind::VarInt => FieldValue::I32(reader.read_7bit_encoded_int()?),
                FieldKind::VarLong => FieldValue::I64(reader.read_7bit_encoded_long()?),
                FieldKind::String => FieldValue::String(reader.read_string()?),
                FieldKind::CString => FieldValue::String(reader.read_cstring()?),
                FieldKind::SizedCString(size) => {
                    FieldValue::String(reader.read_sized_cstring(size, true)?)
                }
                FieldKind::Bytes(size) => {
                    let mut data = vec![0u8; size];
                    reader.read_exactly(&mut data)?;
                    FieldValue::Bytes(data)
                }
            };

            record.set(&field.name, value);
        }

        Ok(record)
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if a present field is missing from the
    /// record, holds a value of the wrong kind, or a fixed-size byte field has the wrong
    /// length, or any error of the underlying writes.
    pub fn write<W: Write + Seek>(
        &self,
        writer: &mut EndianWriter<W>,
        record: &ModelRecord,
    ) -> Result<()> {
        for field in self.active_fields() {
            let Some(value) = record.get(&field.name) else {
                return Err(Error::InvalidArgument(format!(
                    "record has no value for field '{}'",
                    field.name
                )));
            };

            if !value.fits(field.kind) {
                return Err(Error::InvalidArgument(format!(
                    "value {value:?} does not fit field {field}"
                )));
            }

            let endian = field.endian;
            match (value, field.kind) {
                (FieldValue::U8(value), _) => writer.write_u8(*value)?,
                (FieldValue::I8(value), _) => writer.write_i8(*value)?,
                (FieldValue::Bool(value), _) => writer.write_bool(*value)?,
                (FieldValue::U16(value), _) => writer.write_u16(*value, endian)?,
                (FieldValue::I16(value), _) => writer.write_i16(*value, endian)?,
                (FieldValue::U32(value), _) => writer.write_u32(*value, endian)?,
                (FieldValue::I32(value), FieldKind::VarInt) => {
                    writer.write_7bit_encoded_int(*value)?
                }
                (FieldValue::I32(value), _) => writer.write_i32(*value, endian)?,
                (FieldValue::U64(value), _) => writer.write_u64(*value, endian)?,
                (FieldValue::I64(value), FieldKind::VarLong) => {
                    writer.write_7bit_encoded_long(*value)?
                }
                (FieldValue::I64(value), _) => writer.write_i64(*value, endian)?,
                (FieldValue::F32(value), _) => writer.write_f32(*value, endian)?,
                (FieldValue::F64(value), _) => writer.write_f64(*value, endian)?,
                (FieldValue::Guid(value), _) => writer.write_guid(*value, endian)?,
                (FieldValue::Sha1(value), _) => writer.write_sha1(value)?,
                (FieldValue::String(text), FieldKind::CString) => writer.write_cstring(text)?,
                (FieldValue::String(text), FieldKind::SizedCString(size)) => {
                    writer.write_sized_cstring(text, size)?
                }
                (FieldValue::String(text), _) => writer.write_string(text)?,
                (FieldValue::Bytes(data), FieldKind::Bytes(size)) => {
                    if data.len() != size {
                        return Err(Error::InvalidArgument(format!(
                            "field '{}' holds {} bytes, expected {size}",
                            field.name,
                            data.len()
                        )));
                    }
                    writer.write_bytes(data)?
                }
                (FieldValue::Bytes(data), _) => writer.write_bytes(data)?,
            };
        }

        Ok(())
    }
}
