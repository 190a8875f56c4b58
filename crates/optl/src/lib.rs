#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # optl
//!
//! An explicit optional value, [`Optional<T>`], that replaces null pointers
//! and sentinel values with a present/absent flag, plus the adapters that let
//! it cross the two boundaries optional fields usually meet:
//!
//! - [`json`] – `serde` hooks: present serializes as the payload, absent as
//!   `null`; a `null` or missing field deserializes as absent.
//! - [`sql`] – [`Valuer`]/[`Scanner`] hooks that export to a fixed set of
//!   storage kinds ([`SqlValue`]) and import from any driver value. With the
//!   `sqlx` feature, `Optional<T>` also binds and decodes directly in `sqlx`
//!   queries.
//!
//! ## Usage
//!
//! ```rust
//! use optl::{Optional, SqlValue};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Profile {
//!     nickname: Optional<String>,
//!     age: Optional<i32>,
//! }
//!
//! let profile: Profile = serde_json::from_str(r#"{"nickname":"neb"}"#).unwrap();
//! assert_eq!(profile.nickname.as_ref().get(), "neb");
//! assert!(profile.age.is_empty());
//!
//! assert_eq!(profile.age.sql_value().unwrap(), SqlValue::Null);
//! ```

pub mod error;
mod finite;
pub mod json;
pub mod optional;
pub mod sql;

pub use error::{OptionalError, Result};
pub use optional::Optional;
pub use sql::{Scanner, SqlValue, Valuer};

/// Common imports.
pub mod prelude {
    pub use crate::{Optional, OptionalError, Scanner, SqlValue, Valuer};
}
