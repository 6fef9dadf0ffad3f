//! Helpers for partial-update payloads.
//!
//! Patch fields are `Option<T>`: absent means "keep the stored value".
//! Nullable fields are `Option<Option<T>>` read through [`nullable`], so
//! an explicit JSON `null` (`Some(None)`) clears the value while an absent
//! key (`None`) leaves it untouched.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key into `Some(value)`, keeping `null` as
/// `Some(None)`. Pair with `#[serde(default)]` so missing keys stay `None`.
///
/// # Errors
///
/// Propagates the inner deserializer's error.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
