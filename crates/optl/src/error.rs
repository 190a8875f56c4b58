//! Error types for the JSON and SQL adapters.
//!
//! Misuse of [`Optional::get`](crate::Optional::get) on an absent value is a
//! programmer error and panics; everything listed here is recoverable and is
//! returned to the caller.

use std::fmt::Display;

use thiserror::Error;

/// Errors returned by the serialization adapters of [`Optional`](crate::Optional).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OptionalError {
    /// The wrapped type has no SQL storage representation.
    #[error("sql value type '{type_name}' of kind '{kind}' not supported")]
    UnsupportedType {
        /// Fully qualified Rust type name of the wrapped value.
        type_name: String,
        /// Serde data-model kind the value presented (`"struct"`, `"seq"`, ...).
        kind: String,
    },

    /// JSON encoding or decoding failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// A value could not be converted into its storage representation.
    #[error("conversion: {0}")]
    Conversion(String),
}

impl OptionalError {
    /// Create an unsupported-type error.
    pub fn unsupported(type_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            kind: kind.into(),
        }
    }

    /// Create a conversion error for a NaN or infinite float.
    pub fn non_finite(value: f64) -> Self {
        Self::Conversion(format!("non-finite float {value} has no JSON or SQL representation"))
    }

    /// Returns `true` if the error reports a type with no storage representation.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}

impl serde::ser::Error for OptionalError {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Conversion(msg.to_string())
    }
}

/// Result type used throughout the crate.
pub type Result<T, E = OptionalError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_display() {
        let err = OptionalError::unsupported("alloc::vec::Vec<i32>", "seq");
        assert_eq!(
            err.to_string(),
            "sql value type 'alloc::vec::Vec<i32>' of kind 'seq' not supported"
        );
        assert!(err.is_unsupported());
    }

    #[test]
    fn from_serde_error() {
        let serde_err = serde_json::from_str::<i32>("\"nope\"").unwrap_err();
        let err = OptionalError::from(serde_err);
        assert!(err.to_string().starts_with("json:"));
        assert!(!err.is_unsupported());
    }

    #[test]
    fn non_finite_is_conversion() {
        let err = OptionalError::non_finite(f64::NAN);
        assert!(matches!(err, OptionalError::Conversion(_)));
        assert_eq!(
            err.to_string(),
            "conversion: non-finite float NaN has no JSON or SQL representation"
        );
    }

    #[test]
    fn custom_ser_error_is_conversion() {
        let err = <OptionalError as serde::ser::Error>::custom("boom");
        assert_eq!(err.to_string(), "conversion: boom");
    }
}
