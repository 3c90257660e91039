//! Serde helpers for `i128` protocol amounts.
//!
//! Amounts serialize as decimal strings. Deserialization also accepts plain
//! JSON integers up to `u64::MAX`; wider values must be strings.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = i128;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer amount or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i128, E> {
        Ok(i128::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i128, E> {
        Ok(i128::from(value))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<i128, E> {
        Ok(value)
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<i128, E> {
        i128::try_from(value).map_err(|_| E::custom(format!("amount {} exceeds i128", value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<i128, E> {
        value
            .trim()
            .parse::<i128>()
            .map_err(|e| E::custom(format!("invalid amount {:?}: {}", value, e)))
    }
}

pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
    deserializer.deserialize_any(AmountVisitor)
}
