//! Timestamp helpers shared by ingestion and export.
//!
//! Everything is stored in UTC. Rendering for humans (CSV, JSON exports, HTML
//! pages, download file names) goes through [`display_time`], which shifts the
//! instant to the fixed UTC+8 display offset. Stored values are never touched.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::shared::constants::DISPLAY_UTC_OFFSET_SECS;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Naive layouts accepted from clients; interpreted as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS).expect("Invalid display offset")
}

/// Render a stored instant as `YYYY-MM-DD HH:MM:SS` in the display offset
pub fn display_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&display_offset())
        .format(DISPLAY_FORMAT)
        .to_string()
}

/// Compact stamp used in generated download file names
pub fn file_stamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&display_offset())
        .format(FILE_STAMP_FORMAT)
        .to_string()
}

/// Parse a client supplied timestamp.
///
/// Accepts RFC 3339 (any offset) or a naive date-time, which is taken as UTC.
pub fn parse_client_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!(
                "invalid timestamp '{}': expected RFC 3339 or YYYY-MM-DDTHH:MM:SS",
                raw
            )
        })
}

/// Serde adapter for optional client timestamps (`null` and absent both map to `None`)
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| parse_client_timestamp(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_time_shifts_to_utc_plus_8() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(display_time(instant), "2024-01-01 08:00:00");
    }

    #[test]
    fn test_display_time_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2023, 12, 31, 20, 30, 15).unwrap();
        assert_eq!(display_time(instant), "2024-01-01 04:30:15");
    }

    #[test]
    fn test_file_stamp() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 6, 1, 2, 3).unwrap();
        assert_eq!(file_stamp(instant), "20240506_090203");
    }

    #[test]
    fn test_parse_client_timestamp_rfc3339_with_offset() {
        let parsed = parse_client_timestamp("2024-01-01T08:00:00+08:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_client_timestamp_naive_is_utc() {
        let parsed = parse_client_timestamp("2024-01-01T00:00:00.250").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(250)
        );

        let spaced = parse_client_timestamp("2024-01-01 00:00:00").unwrap();
        assert_eq!(spaced, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_client_timestamp_rejects_garbage() {
        let err = parse_client_timestamp("yesterday").unwrap_err();
        assert!(err.contains("yesterday"));
    }
}
