//! Decimals on the wire
//!
//! FHIR decimals carry their precision in the text (`1.50` is not `1.5`), so
//! they are read from the JSON number's own digits and written back the same
//! way. This needs `serde_json`'s `arbitrary_precision`.

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Decimal from a JSON number, keeping every digit and the scale
pub(crate) fn from_json(value: &Value) -> serde_json::Result<Decimal> {
    let Value::Number(number) = value else {
        return Err(serde_json::Error::custom(format!(
            "invalid decimal {value}, expected a JSON number"
        )));
    };

    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(serde_json::Error::custom)
}

/// Serializes a decimal with its exact digits
pub(crate) struct Exact<'a>(pub &'a Decimal);

impl Serialize for Exact<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::arbitrary_precision::serialize(self.0, serializer)
    }
}

/// `#[serde(with)]` helpers for `Option<Decimal>` fields
pub(crate) mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(decimal) => serializer.serialize_some(&Exact(decimal)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Value>::deserialize(deserializer)?
            .map(|value| from_json(&value))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
