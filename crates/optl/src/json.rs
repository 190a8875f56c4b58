//! JSON adapter.
//!
//! A present optional serializes exactly like its payload; an absent one
//! serializes as `null`. Deserialization maps `null` (and a missing struct
//! field) back to absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::finite::ensure_finite;
use crate::optional::Optional;

const NULL: &[u8] = b"null";

impl<T: Serialize> Serialize for Optional<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_option() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Optional<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `deserialize_option` is also what serde_derive calls for a missing
        // field, so an absent key yields an absent optional.
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Optional<T> {
    /// Encode as JSON bytes; `null` when absent.
    ///
    /// A NaN or infinite float anywhere in the payload is an error rather than
    /// a `null`, so a present value never marshals as absent.
    pub fn marshal_json(&self) -> Result<Vec<u8>> {
        ensure_finite(self)?;
        Ok(serde_json::to_vec(self)?)
    }
}

impl<T: DeserializeOwned> Optional<T> {
    /// Decode JSON bytes into the receiver.
    ///
    /// The receiver is reset to absent before decoding, so a `null` input or
    /// a decoding error never leaves a previous value behind.
    pub fn unmarshal_json(&mut self, data: &[u8]) -> Result<()> {
        self.reset();

        if data.trim_ascii() == NULL {
            return Ok(());
        }

        let value: T = serde_json::from_slice(data)?;
        self.set(value);
        Ok(())
    }
}
