//! `sqlx` integration.
//!
//! `Optional<T>` binds and decodes exactly like `Option<T>` for any database
//! `T` supports: absent binds as `NULL`, and `NULL` decodes as absent.

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode, Type};

use crate::optional::Optional;

impl<T, DB> Type<DB> for Optional<T>
where
    T: Type<DB>,
    DB: Database,
{
    fn type_info() -> DB::TypeInfo {
        <Option<T> as Type<DB>>::type_info()
    }

    fn compatible(ty: &DB::TypeInfo) -> bool {
        <Option<T> as Type<DB>>::compatible(ty)
    }
}

impl<'q, T, DB> Encode<'q, DB> for Optional<T>
where
    T: Encode<'q, DB>,
    DB: Database,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self.as_option() {
            Some(value) => <T as Encode<'q, DB>>::encode_by_ref(value, buf),
            None => Ok(IsNull::Yes),
        }
    }

    fn produces(&self) -> Option<DB::TypeInfo> {
        self.as_option().and_then(<T as Encode<'q, DB>>::produces)
    }

    fn size_hint(&self) -> usize {
        self.as_option().map_or(0, <T as Encode<'q, DB>>::size_hint)
    }
}

impl<'r, T, DB> Decode<'r, DB> for Optional<T>
where
    T: Decode<'r, DB>,
    DB: Database,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        <Option<T> as Decode<'r, DB>>::decode(value).map(Self::from)
    }
}
