//! Serde adapters for statistics that are NaN when undefined.
//!
//! JSON has no NaN literal, so these write NaN as `null` and read `null`
//! back as NaN. Use with `#[serde(with = "crate::serde_nan")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    to_option(*value).serialize(serializer)
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(from_option(Option::deserialize(deserializer)?))
}

fn to_option(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

fn from_option(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// The same mapping for a 2×2 matrix.
pub(crate) mod matrix {
    use super::{from_option, to_option};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(
        value: &[[f64; 2]; 2],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(|row| row.map(to_option)).serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[[f64; 2]; 2], D::Error> {
        let rows = <[[Option<f64>; 2]; 2]>::deserialize(deserializer)?;
        Ok(rows.map(|row| row.map(from_option)))
    }
}
