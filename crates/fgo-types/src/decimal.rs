//! Serde helpers carrying 256-bit integers as decimal strings on the JSON wire.
//!
//! Use with `#[serde(with = "fgo_types::decimal")]` for `U256` and
//! `#[serde(with = "fgo_types::decimal::signed")]` for `I256`. Input also
//! accepts `0x` hex strings (unsigned only) and plain JSON integers.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => parse_unsigned(&s).map_err(serde::de::Error::custom),
        Raw::Unsigned(n) => Ok(U256::from(n)),
        Raw::Signed(n) => Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {n}"
        ))),
    }
}

/// Parse a decimal (or `0x`-prefixed hex) string into a `U256`.
pub fn parse_unsigned(s: &str) -> Result<U256, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty integer string".into());
    }
    s.parse::<U256>()
        .map_err(|e| format!("invalid unsigned integer {s:?}: {e}"))
}

pub mod signed {
    use super::Raw;
    use alloy_primitives::I256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &I256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<I256, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => I256::from_dec_str(s.trim())
                .map_err(|e| serde::de::Error::custom(format!("invalid signed integer {s:?}: {e}"))),
            Raw::Unsigned(n) => Ok(I256::try_from(n).unwrap_or(I256::MAX)),
            Raw::Signed(n) => Ok(I256::try_from(n).unwrap_or(I256::MIN)),
        }
    }
}
