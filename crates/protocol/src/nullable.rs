//! Serde helpers for fields where an explicit `null` differs from absence.
//!
//! Use with `#[serde(default, skip_serializing_if = "Option::is_none", with = "crate::nullable")]`
//! on an `Option<Option<T>>`: `None` is omitted, `Some(None)` is sent as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
