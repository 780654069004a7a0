//! Deserialization helpers for log records written by older versions.
//!
//! Older logs stored the capture time as a naive local timestamp
//! (`2024-03-01 12:34:56.789012`) and owner ids as numbers.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Naive timestamp layout used by older logs.
const LEGACY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accept an RFC 3339 timestamp or a naive local one.
pub(crate) fn captured_at<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_captured_at(&raw).map_err(de::Error::custom)
}

fn parse_captured_at(raw: &str) -> Result<DateTime<Local>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(raw, LEGACY_TIMESTAMP)
        .map_err(|e| format!("invalid capture time '{}': {}", raw, e))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("capture time '{}' does not exist locally", raw))
}

/// Accept a string or an integer, yielding a string.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        let at = parse_captured_at("2024-03-01T12:00:00+09:00").unwrap();
        assert_eq!(at.timestamp(), 1_709_262_000);
    }

    #[test]
    fn parses_legacy_naive_with_fraction() {
        let at = parse_captured_at("2024-03-01 12:00:00.123456").unwrap();
        assert_eq!(
            at.naive_local().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 12:00:00"
        );
    }

    #[test]
    fn parses_legacy_naive_without_fraction() {
        assert!(parse_captured_at("2024-03-01 12:00:00").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_captured_at("yesterday").unwrap_err();
        assert!(err.contains("yesterday"));
    }
}
