//! Non-finite float detection.
//!
//! `serde_json` writes NaN and ±infinity as `null`, which would turn a present
//! value into an absent one. [`ensure_finite`] walks a value through the serde
//! data model first and rejects any non-finite float it meets, at any depth.

use serde::Serialize;
use serde::ser::{
    SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
    SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::error::{OptionalError, Result};

/// Fails with [`OptionalError::Conversion`] if `value` contains a NaN or
/// infinite float.
pub(crate) fn ensure_finite<V>(value: &V) -> Result<()>
where
    V: Serialize + ?Sized,
{
    value.serialize(FiniteCheck)
}

#[derive(Clone, Copy)]
struct FiniteCheck;

impl FiniteCheck {
    fn float(v: f64) -> Result<()> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(OptionalError::non_finite(v))
        }
    }
}

impl Serializer for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<()> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<()> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<()> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<()> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        Self::float(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        Self::float(v)
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
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
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self> {
        Ok(self)
    }
}

impl SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    // Float keys are rejected by serde_json itself.
    fn serialize_key<T>(&mut self, _key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = OptionalError;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
