//! Configuration loading for tile layers
//!
//! Layer options are plain serde structs. This module holds the JSON loading
//! helpers and the lenient parsing used for options that must never fail a
//! whole configuration, such as `buffer`.

use crate::{MapError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Parses a configuration value from a JSON string
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a JSON configuration file
pub fn from_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    from_json_str(&text).map_err(|e| match e {
        MapError::Serialization(inner) => {
            MapError::Config(format!("{}: {}", path.display(), inner))
        }
        other => other,
    })
}

/// Interprets a raw JSON value as a tile buffer margin.
///
/// Only positive numbers enable buffering; fractional margins are truncated.
/// Everything else (zero, negatives, NaN, strings, booleans, null) means
/// "no buffer".
pub fn buffer_from_value(value: &serde_json::Value) -> Option<u32> {
    let n = value.as_f64()?;
    if !n.is_finite() || n < 1.0 {
        return None;
    }
    Some(n.trunc().min(u32::MAX as f64) as u32)
}

/// Serde adapter for [`buffer_from_value`]
pub fn deserialize_buffer<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(buffer_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_buffer_accepts_positive_numbers() {
        assert_eq!(buffer_from_value(&json!(8)), Some(8));
        assert_eq!(buffer_from_value(&json!(2.9)), Some(2));
        assert_eq!(buffer_from_value(&json!(1)), Some(1));
    }

    #[test]
    fn test_buffer_falls_back_to_none() {
        assert_eq!(buffer_from_value(&json!(0)), None);
        assert_eq!(buffer_from_value(&json!(0.5)), None);
        assert_eq!(buffer_from_value(&json!(-4)), None);
        assert_eq!(buffer_from_value(&json!("8")), None);
        assert_eq!(buffer_from_value(&json!(true)), None);
        assert_eq!(buffer_from_value(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result: Result<serde_json::Value> = from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(MapError::Io(_))));
    }
}
