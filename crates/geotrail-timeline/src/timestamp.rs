//! Conversion of entry timestamps into naive local wall-clock time.
//!
//! Offset-aware inputs are shifted into the target zone and then stripped of
//! their offset. Inputs without an offset are taken to already be local wall
//! time and come back unchanged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use thiserror::Error;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("unparseable timestamp {0:?}")]
    Unparseable(String),
}

/// Normalizes `raw` into naive wall-clock time in the process-local zone.
///
/// # Errors
///
/// Returns [`TimestampError`] when the string is empty or not ISO-8601.
pub fn normalize_timestamp(raw: &str) -> Result<NaiveDateTime, TimestampError> {
    normalize_timestamp_in(raw, &Local)
}

/// Normalizes `raw` into naive wall-clock time in `tz`.
///
/// A trailing `Z` is read as `+00:00`. Date-only strings map to midnight.
///
/// # Errors
///
/// Returns [`TimestampError`] when the string is empty or not ISO-8601.
pub fn normalize_timestamp_in<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    let candidate = match trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
    {
        Some(stem) => format!("{stem}+00:00"),
        None => trimmed.to_owned(),
    };

    if let Ok(aware) = DateTime::parse_from_rfc3339(&candidate) {
        return Ok(aware.with_timezone(tz).naive_local());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(aware) = DateTime::parse_from_str(&candidate, fmt) {
            return Ok(aware.with_timezone(tz).naive_local());
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&candidate, fmt) {
            return Ok(naive);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(TimestampError::Unparseable(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    #[test]
    fn zulu_suffix_is_utc() {
        let t = normalize_timestamp_in("2019-03-01T10:00:00Z", &Utc).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 10, 0, 0));
    }

    #[test]
    fn zulu_is_shifted_into_target_zone() {
        let t = normalize_timestamp_in("2019-03-01T23:30:00.000Z", &plus_two()).unwrap();
        assert_eq!(t, naive(2019, 3, 2, 1, 30, 0));
    }

    #[test]
    fn explicit_offset_is_honoured() {
        let t = normalize_timestamp_in("2019-03-01T10:00:00.000-05:00", &Utc).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 15, 0, 0));
    }

    #[test]
    fn space_separator_with_offset() {
        let t = normalize_timestamp_in("2019-03-01 10:00:00+01:00", &Utc).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 9, 0, 0));
    }

    #[test]
    fn minutes_precision_with_offset() {
        let t = normalize_timestamp_in("2019-03-01T10:00+00:00", &plus_two()).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 12, 0, 0));
    }

    #[test]
    fn naive_input_is_kept_as_wall_time() {
        let t = normalize_timestamp_in("2019-03-01T10:00:00", &plus_two()).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 10, 0, 0));
    }

    #[test]
    fn date_only_maps_to_midnight() {
        let t = normalize_timestamp_in("2019-03-01", &Utc).unwrap();
        assert_eq!(t, naive(2019, 3, 1, 0, 0, 0));
    }

    #[test]
    fn empty_is_error() {
        assert_eq!(normalize_timestamp_in("", &Utc), Err(TimestampError::Empty));
        assert_eq!(normalize_timestamp_in("   ", &Utc), Err(TimestampError::Empty));
    }

    #[test]
    fn garbage_is_error() {
        assert_eq!(
            normalize_timestamp_in("yesterday", &Utc),
            Err(TimestampError::Unparseable("yesterday".to_string()))
        );
    }

    #[test]
    fn impossible_date_is_error() {
        assert!(normalize_timestamp_in("2019-02-30T10:00:00Z", &Utc).is_err());
    }

    #[test]
    fn local_zone_entry_point_accepts_valid_input() {
        assert!(normalize_timestamp("2019-03-01T10:00:00Z").is_ok());
    }
}
