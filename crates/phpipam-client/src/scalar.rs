//! Scalar normalization types
//!
//! phpIPAM serializes most integer and boolean columns as JSON strings
//! (`"42"`, `"0"`, `"1"`), but not consistently: some endpoints and some
//! deployments emit native JSON numbers and booleans instead. The types here
//! accept either encoding and collapse both onto one native value, and always
//! encode back in the quoted form the API expects.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Decode failure for a normalized scalar token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed scalar: expected {expected}, found {token}")]
pub struct ScalarError {
    expected: &'static str,
    token: String,
}

impl ScalarError {
    /// Leading text of every rendered `ScalarError`.
    pub(crate) const PREFIX: &'static str = "malformed scalar";

    fn new(expected: &'static str, token: impl fmt::Display) -> Self {
        Self {
            expected,
            token: token.to_string(),
        }
    }

    /// The offending token, as rendered in the error message
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// An integer that phpIPAM may send as a JSON number or a numeric string.
///
/// `null`, absent and `""` decode to zero. Encodes as a quoted decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonInt(pub i64);

impl JsonInt {
    /// Whether this is the zero default (omitted from outgoing records)
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for JsonInt {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<JsonInt> for i64 {
    fn from(value: JsonInt) -> Self {
        value.0
    }
}

impl fmt::Display for JsonInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JsonInt {
    type Err = ScalarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self(0));
        }
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ScalarError::new("integer", format!("{s:?}")))
    }
}

impl Serialize for JsonInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

struct JsonIntVisitor;

impl<'de> Visitor<'de> for JsonIntVisitor {
    type Value = JsonInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, a numeric string, or null")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(JsonInt(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(JsonInt)
            .map_err(|_| E::custom(ScalarError::new("integer", v)))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "integral and range-checked before the cast; i64::MAX as f64 rounds up to 2^63"
    )]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(JsonInt(v as i64))
        } else {
            Err(E::custom(ScalarError::new("integer", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Err(E::custom(ScalarError::new("integer", v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonInt(0))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonInt(0))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, _seq: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(ScalarError::new("integer", "array")))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, _map: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(ScalarError::new("integer", "object")))
    }
}

impl<'de> Deserialize<'de> for JsonInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonIntVisitor)
    }
}

/// A flag that phpIPAM sends as `"0"`/`"1"` (or occasionally native
/// `true`/`false`). Absent, `null` and `""` decode to false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoolInt(pub bool);

impl BoolInt {
    /// Whether the flag is unset (omitted from outgoing records)
    pub fn is_false(&self) -> bool {
        !self.0
    }
}

impl From<bool> for BoolInt {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<BoolInt> for bool {
    fn from(value: BoolInt) -> Self {
        value.0
    }
}

impl Serialize for BoolInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.0 { "1" } else { "0" })
    }
}

struct BoolIntVisitor;

impl<'de> Visitor<'de> for BoolIntVisitor {
    type Value = BoolInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"0\", \"1\", a boolean, or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(BoolInt(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "1" => Ok(BoolInt(true)),
            "0" | "" => Ok(BoolInt(false)),
            other => Err(E::custom(ScalarError::new("boolean", format!("{other:?}")))),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Err(E::custom(ScalarError::new("boolean", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Err(E::custom(ScalarError::new("boolean", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(ScalarError::new("boolean", v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(BoolInt(false))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(BoolInt(false))
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, _seq: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(ScalarError::new("boolean", "array")))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, _map: A) -> Result<Self::Value, A::Error> {
        Err(de::Error::custom(ScalarError::new("boolean", "object")))
    }
}

impl<'de> Deserialize<'de> for BoolInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BoolIntVisitor)
    }
}

/// Decode a string column that phpIPAM may send as `null`
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
