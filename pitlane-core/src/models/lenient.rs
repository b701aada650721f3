//! Decoders for numbers the API sends as JSON strings.
//!
//! Ergast encodes every numeric field as a string (`"position": "1"`,
//! `"points": "12.5"`). These helpers accept either form so the models also
//! decode their own serialized output.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Int(u64),
    Float(f64),
    Text(String),
}

fn to_u32<E: serde::de::Error>(value: Lenient) -> Result<u32, E> {
    match value {
        Lenient::Int(n) => u32::try_from(n).map_err(E::custom),
        Lenient::Float(f) => Err(E::custom(format!("expected an integer, got {f}"))),
        Lenient::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| E::custom(format!("invalid integer {s:?}: {e}"))),
    }
}

fn to_f64<E: serde::de::Error>(value: Lenient) -> Result<f64, E> {
    #[allow(clippy::cast_precision_loss)]
    match value {
        Lenient::Int(n) => Ok(n as f64),
        Lenient::Float(f) => Ok(f),
        Lenient::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| E::custom(format!("invalid number {s:?}: {e}"))),
    }
}

pub(crate) fn number_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    to_u32(Lenient::deserialize(deserializer)?)
}

pub(crate) fn number_opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lenient::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => to_u32(value).map(Some),
    }
}

pub(crate) fn number_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = to_f64(Lenient::deserialize(deserializer)?)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("expected a non-negative number, got {value}")))
    }
}
