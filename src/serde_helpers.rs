//! Deserialization helpers for rows exported from the backing tables.
//!
//! Exports are loose about types: nullable columns come through as `null`,
//! primary keys are integers in some tables and uuid strings in others, and
//! `timestamptz` columns are RFC 3339 strings.

use crate::routes::AccessId;
use chrono::DateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads an integer or text key as its string form.
pub(crate) fn key_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(AccessId::deserialize(deserializer)?.to_string())
}

/// Like [`key_as_string`] for nullable key columns.
pub(crate) fn optional_key_as_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<AccessId>::deserialize(deserializer)?.map(|id| id.to_string()))
}

/// Like [`key_as_string`] for nullable key lists.
pub(crate) fn keys_as_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys: Option<Vec<AccessId>> = Option::deserialize(deserializer)?;
    Ok(keys
        .unwrap_or_default()
        .iter()
        .map(AccessId::to_string)
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(u64),
    Text(String),
}

/// Reads a timestamp given either as milliseconds since the Unix epoch or as
/// an RFC 3339 string, returning milliseconds.
pub(crate) fn timestamp_millis<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(millis) => Ok(millis),
        RawTimestamp::Text(text) => parse_rfc3339_millis(&text).map_err(D::Error::custom),
    }
}

fn parse_rfc3339_millis(text: &str) -> std::result::Result<u64, String> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .map_err(|e| format!("invalid timestamp '{}': {}", text, e))?;
    u64::try_from(parsed.timestamp_millis())
        .map_err(|_| format!("timestamp '{}' is before the Unix epoch", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_offsets_normalize_to_utc() {
        let utc = parse_rfc3339_millis("2024-05-01T10:00:00+00:00").unwrap();
        let shifted = parse_rfc3339_millis("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(utc, 1_714_557_600_000);
        assert_eq!(utc, shifted);

        let fractional = parse_rfc3339_millis("2024-05-01T10:00:00.250Z").unwrap();
        assert_eq!(fractional, utc + 250);
    }

    #[test]
    fn test_rejects_bad_timestamps() {
        assert!(parse_rfc3339_millis("yesterday").is_err());
        assert!(parse_rfc3339_millis("1969-12-31T23:59:59Z").is_err());
    }
}
