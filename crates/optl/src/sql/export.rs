//! Kind classification for SQL export.
//!
//! [`KindSerializer`] walks a value through the serde data model and accepts
//! only the shapes that have a storage representation. Newtype wrappers and
//! `Some(_)` are transparent, so `struct UserId(i64)` exports as an integer.
//!
//! Types whose kind the data model cannot show are recognised by identity
//! first: date-times serialize as strings, and an empty byte container looks
//! the same as any other empty sequence.

use std::any::{Any, type_name};

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use serde::Serialize;
use serde::ser::{self, Impossible, Serializer};

use super::SqlValue;
use crate::error::{OptionalError, Result};

/// Convert `value` into its storage representation.
pub(crate) fn export<T>(value: &T) -> Result<SqlValue>
where
    T: Serialize + 'static,
{
    let type_name = type_name::<T>();
    if let Some(exported) = by_identity(value, type_name) {
        return exported;
    }

    match value.serialize(KindSerializer::new(type_name))? {
        Exported::Value(value) => Ok(value),
        Exported::Byte(_) => Err(OptionalError::unsupported(type_name, "u8")),
    }
}

fn by_identity(value: &dyn Any, type_name: &str) -> Option<Result<SqlValue>> {
    if let Some(dt) = value.downcast_ref::<DateTime<Utc>>() {
        return Some(Ok(SqlValue::DateTime(dt.fixed_offset())));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<FixedOffset>>() {
        return Some(Ok(SqlValue::DateTime(*dt)));
    }
    if let Some(dt) = value.downcast_ref::<DateTime<Local>>() {
        return Some(Ok(SqlValue::DateTime(dt.fixed_offset())));
    }
    // No offset, so no instant to store.
    if value.is::<NaiveDateTime>() {
        return Some(Err(OptionalError::unsupported(type_name, "naive_datetime")));
    }

    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return Some(Ok(SqlValue::Bytes(bytes.clone())));
    }
    if let Some(bytes) = value.downcast_ref::<Box<[u8]>>() {
        return Some(Ok(SqlValue::Bytes(bytes.to_vec())));
    }
    if let Some(bytes) = value.downcast_ref::<&'static [u8]>() {
        return Some(Ok(SqlValue::Bytes(bytes.to_vec())));
    }
    None
}

/// Intermediate result: a lone `u8` is only valid inside a byte sequence.
enum Exported {
    Value(SqlValue),
    Byte(u8),
}

#[derive(Clone, Copy)]
struct KindSerializer {
    type_name: &'static str,
    /// Serializing an element of a byte sequence.
    element: bool,
}

impl KindSerializer {
    const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            element: false,
        }
    }

    fn unsupported<T>(self, kind: &str) -> Result<T> {
        Err(OptionalError::unsupported(self.type_name, kind))
    }

    fn int(value: i64) -> Result<Exported> {
        Ok(Exported::Value(SqlValue::Int(value)))
    }

    fn float(value: f64) -> Result<Exported> {
        if !value.is_finite() {
            return Err(OptionalError::non_finite(value));
        }
        Ok(Exported::Value(SqlValue::Float(value)))
    }
}

impl Serializer for KindSerializer {
    type Ok = Exported;
    type Error = OptionalError;

    type SerializeSeq = ByteSeq;
    type SerializeTuple = ByteSeq;
    type SerializeTupleStruct = Impossible<Exported, OptionalError>;
    type SerializeTupleVariant = Impossible<Exported, OptionalError>;
    type SerializeMap = Impossible<Exported, OptionalError>;
    type SerializeStruct = Impossible<Exported, OptionalError>;
    type SerializeStructVariant = Impossible<Exported, OptionalError>;

    fn serialize_bool(self, v: bool) -> Result<Exported> {
        Ok(Exported::Value(SqlValue::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Exported> {
        Self::int(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Exported> {
        Self::int(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Exported> {
        Self::int(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Exported> {
        Self::int(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Exported> {
        let narrowed = i64::try_from(v).map_err(|_| {
            OptionalError::Conversion(format!("{v} does not fit in a 64-bit integer"))
        })?;
        Self::int(narrowed)
    }

    fn serialize_u8(self, v: u8) -> Result<Exported> {
        Ok(Exported::Byte(v))
    }

    // Unsigned scalars have no storage kind of their own.
    fn serialize_u16(self, _v: u16) -> Result<Exported> {
        self.unsupported("u16")
    }

    fn serialize_u32(self, _v: u32) -> Result<Exported> {
        self.unsupported("u32")
    }

    fn serialize_u64(self, _v: u64) -> Result<Exported> {
        self.unsupported("u64")
    }

    fn serialize_u128(self, _v: u128) -> Result<Exported> {
        self.unsupported("u128")
    }

    fn serialize_f32(self, v: f32) -> Result<Exported> {
        Self::float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Exported> {
        Self::float(v)
    }

    fn serialize_char(self, _v: char) -> Result<Exported> {
        self.unsupported("char")
    }

    fn serialize_str(self, v: &str) -> Result<Exported> {
        Ok(Exported::Value(SqlValue::Text(v.to_owned())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Exported> {
        Ok(Exported::Value(SqlValue::Bytes(v.to_vec())))
    }

    // `Option<u8>` is not a byte, so optional elements reject the sequence.
    fn serialize_none(self) -> Result<Exported> {
        if self.element {
            return self.unsupported("option");
        }
        Ok(Exported::Value(SqlValue::Null))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Exported>
    where
        T: ?Sized + Serialize,
    {
        if self.element {
            return self.unsupported("option");
        }
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Exported> {
        self.unsupported("unit")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Exported> {
        self.unsupported("unit_struct")
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Exported> {
        self.unsupported("unit_variant")
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Exported>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Exported>
    where
        T: ?Sized + Serialize,
    {
        self.unsupported("newtype_variant")
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ByteSeq> {
        Ok(ByteSeq::new(self, "seq", len.unwrap_or_default()))
    }

    fn serialize_tuple(self, len: usize) -> Result<ByteSeq> {
        Ok(ByteSeq::new(self, "tuple", len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.unsupported("tuple_struct")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.unsupported("tuple_variant")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.unsupported("map")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.unsupported("struct")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.unsupported("struct_variant")
    }
}

/// Collects a non-empty sequence whose every element is a `u8`.
///
/// An empty sequence shows no element type, so it is rejected unless
/// [`by_identity`] already recognised the container as bytes.
struct ByteSeq {
    parent: KindSerializer,
    kind: &'static str,
    bytes: Vec<u8>,
}

impl ByteSeq {
    fn new(parent: KindSerializer, kind: &'static str, len: usize) -> Self {
        Self {
            parent,
            kind,
            bytes: Vec::with_capacity(len),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let element = KindSerializer {
            element: true,
            ..self.parent
        };
        match value.serialize(element) {
            Ok(Exported::Byte(b)) => {
                self.bytes.push(b);
                Ok(())
            }
            _ => self.parent.unsupported(self.kind),
        }
    }

    fn finish(self) -> Result<Exported> {
        if self.bytes.is_empty() {
            return self.parent.unsupported(self.kind);
        }
        Ok(Exported::Value(SqlValue::Bytes(self.bytes)))
    }
}

impl ser::SerializeSeq for ByteSeq {
    type Ok = Exported;
    type Error = OptionalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Exported> {
        self.finish()
    }
}

impl ser::SerializeTuple for ByteSeq {
    type Ok = Exported;
    type Error = OptionalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Exported> {
        self.finish()
    }
}
