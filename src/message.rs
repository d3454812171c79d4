//! # Companion Messages
//!
//! The phone-side configuration page sends its result as a JSON dictionary
//! keyed by setting number, e.g. `{"0": 2}`. Closing the page without saving
//! produces `"CANCELLED"` or an empty dictionary; both are ignored.
//!
//! Values may arrive as JSON integers or as numeric strings, depending on
//! how the page serialized its form. Range checking is left to the
//! receiver: decoding only guarantees an integer.

use serde_json::Value;
use thiserror::Error;

/// Message key carrying the date-order preference.
pub const DATE_FORMAT_KEY: u32 = 0;

const CANCELLED: &str = "CANCELLED";

/// Errors decoding a companion payload.
#[derive(Error, Debug)]
pub enum MessageError {
    /// Payload is not valid JSON
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload is valid JSON but not a dictionary
    #[error("payload is not a dictionary")]
    NotAnObject,

    /// A known key carries something other than an integer
    #[error("key {key} has non-integer value {value}")]
    InvalidValue { key: u32, value: String },
}

/// A decoded companion payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    /// Nothing to apply (cancelled or empty)
    Ignored,
    /// New settings. `date_format` is `None` if the key was absent.
    Settings { date_format: Option<i64> },
}

/// Decode a raw payload from the configuration channel.
///
/// # Example
/// ```
/// use retro_clock_lib::message::{decode, ConfigUpdate};
///
/// assert_eq!(
///     decode(r#"{"0": 1}"#).unwrap(),
///     ConfigUpdate::Settings { date_format: Some(1) }
/// );
/// assert_eq!(decode("CANCELLED").unwrap(), ConfigUpdate::Ignored);
/// ```
pub fn decode(payload: &str) -> Result<ConfigUpdate, MessageError> {
    let payload = payload.trim();
    if payload.is_empty() || payload == CANCELLED {
        return Ok(ConfigUpdate::Ignored);
    }

    let value: Value = serde_json::from_str(payload)?;
    let Value::Object(map) = value else {
        return Err(MessageError::NotAnObject);
    };
    if map.is_empty() {
        return Ok(ConfigUpdate::Ignored);
    }

    let date_format = map
        .get(&DATE_FORMAT_KEY.to_string())
        .map(|value| integer(DATE_FORMAT_KEY, value))
        .transpose()?;

    Ok(ConfigUpdate::Settings { date_format })
}

fn integer(key: u32, value: &Value) -> Result<i64, MessageError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| MessageError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
