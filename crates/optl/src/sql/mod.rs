//! SQL adapter.
//!
//! [`Valuer`] and [`Scanner`] are the two hooks a database access layer needs
//! from a value-like type: produce a storable value, and populate from a
//! retrieved one. [`Optional`] implements both.
//!
//! Export is strict: only the kinds listed on [`SqlValue`] are accepted, and
//! anything else fails with [`OptionalError::UnsupportedType`]. Import is
//! permissive: any source that converts into `T` through JSON is accepted.
//!
//! | Rust type                                   | [`SqlValue`]   |
//! |---------------------------------------------|----------------|
//! | `i8`, `i16`, `i32`, `i64`                   | `Int`          |
//! | `f32`, `f64`                                | `Float`        |
//! | `bool`                                      | `Bool`         |
//! | `&str`, `String`                            | `Text`         |
//! | `Vec<u8>`, `Box<[u8]>`, `&'static [u8]`     | `Bytes`        |
//! | non-empty `[u8; N]`, serde byte buffers     | `Bytes`        |
//! | `DateTime<Utc>`, `DateTime<FixedOffset>`,   | `DateTime`     |
//! | `DateTime<Local>`                           |                |
//! | absent                                      | `Null`         |
//!
//! `NaiveDateTime` has no offset and is rejected; so are NaN and infinite
//! floats, on both export and import.

mod export;
#[cfg(feature = "sqlx")]
mod driver;

use std::any::type_name;

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

use crate::error::{OptionalError, Result};
use crate::finite::ensure_finite;
use crate::optional::Optional;

/// A storable value, as handed to or received from a SQL binding layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Text.
    Text(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Date-time with offset.
    DateTime(DateTime<FixedOffset>),
}

impl SqlValue {
    /// Returns `true` for the null marker.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the storage kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::DateTime(_) => "datetime",
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Text(v) => serializer.serialize_str(v),
            // A sequence of numbers, so it decodes back into `Vec<u8>`.
            Self::Bytes(v) => serializer.collect_seq(v),
            Self::DateTime(v) => v.serialize(serializer),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v.fixed_offset())
    }
}

impl From<DateTime<Local>> for SqlValue {
    fn from(v: DateTime<Local>) -> Self {
        Self::DateTime(v.fixed_offset())
    }
}

impl<V: Into<SqlValue>> From<Option<V>> for SqlValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Produces a storable value.
pub trait Valuer {
    /// Convert `self` into its storage representation.
    fn sql_value(&self) -> Result<SqlValue>;
}

/// Populates `self` from a retrieved value.
pub trait Scanner {
    /// Replace the contents of `self` with `src`; a null source clears it.
    fn scan<V>(&mut self, src: &V) -> Result<()>
    where
        V: Serialize + ?Sized;
}

impl<T> Optional<T>
where
    T: Serialize + 'static,
{
    /// Export the value for a SQL binding layer; `SqlValue::Null` when absent.
    pub fn sql_value(&self) -> Result<SqlValue> {
        let Some(value) = self.as_option() else {
            return Ok(SqlValue::Null);
        };

        match export::export(value) {
            Ok(exported) => {
                tracing::trace!(
                    type_name = type_name::<T>(),
                    kind = exported.kind(),
                    "exported sql value"
                );
                Ok(exported)
            }
            Err(err) => {
                let kind = if let OptionalError::UnsupportedType { kind, .. } = &err {
                    Some(kind.as_str())
                } else {
                    None
                };
                tracing::debug!(
                    type_name = type_name::<T>(),
                    kind,
                    error = %err,
                    "sql export rejected value"
                );
                Err(err)
            }
        }
    }
}

impl<T> Optional<T>
where
    T: DeserializeOwned,
{
    /// Populate from a value returned by a SQL binding layer.
    ///
    /// The source is converted through JSON, so it may be any serializable
    /// value: a [`SqlValue`], a primitive, `Option<_>`. A null source leaves
    /// the receiver absent, and so does a failed conversion. A NaN or
    /// infinite float source is a conversion error, not a null.
    pub fn scan<V>(&mut self, src: &V) -> Result<()>
    where
        V: Serialize + ?Sized,
    {
        self.reset();

        ensure_finite(src).inspect_err(|err| {
            tracing::debug!(type_name = type_name::<T>(), error = %err, "sql scan failed");
        })?;
        let raw = serde_json::to_value(src)?;
        if raw.is_null() {
            return Ok(());
        }

        let value = serde_json::from_value::<T>(raw).map_err(|err| {
            tracing::debug!(type_name = type_name::<T>(), error = %err, "sql scan failed");
            OptionalError::from(err)
        })?;
        tracing::trace!(type_name = type_name::<T>(), "scanned sql value");
        self.set(value);
        Ok(())
    }
}

impl<T> Valuer for Optional<T>
where
    T: Serialize + 'static,
{
    fn sql_value(&self) -> Result<SqlValue> {
        Optional::sql_value(self)
    }
}

impl<T> Scanner for Optional<T>
where
    T: DeserializeOwned,
{
    fn scan<V>(&mut self, src: &V) -> Result<()>
    where
        V: Serialize + ?Sized,
    {
        Optional::scan(self, src)
    }
}
