//! Inclusive date window applied to entry start times.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::TimelineError;
use crate::timestamp::{normalize_timestamp_in, TimestampError};
use crate::types::RawEntry;

/// Parses a `YYYY-MM-DD` boundary date.
///
/// # Errors
///
/// Returns [`TimelineError::InvalidDate`] for anything else.
pub fn parse_boundary_date(value: &str) -> Result<NaiveDate, TimelineError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|source| {
        TimelineError::InvalidDate {
            value: value.to_owned(),
            source,
        }
    })
}

/// Why an entry was kept out of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Timestamp(TimestampError),
    OutsideWindow(NaiveDateTime),
}

/// `[start 00:00:00, end 00:00:00]`, both ends inclusive.
///
/// The end bound is midnight at the start of the end date, so an entry later
/// on the end date falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        }
    }

    /// Builds a window from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::InvalidDate`] if either date is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self, TimelineError> {
        Ok(Self::new(parse_boundary_date(start)?, parse_boundary_date(end)?))
    }

    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// True when the start bound lies after the end bound; nothing is admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Normalizes the entry's `startTime` in `tz` and checks it against the
    /// window.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the start time is missing, unparseable,
    /// or outside the window.
    pub fn admit<Tz: TimeZone>(&self, entry: &RawEntry, tz: &Tz) -> Result<NaiveDateTime, Rejection> {
        let instant = normalize_timestamp_in(entry.start_time_or_empty(), tz)
            .map_err(Rejection::Timestamp)?;
        if self.contains(instant) {
            Ok(instant)
        } else {
            Err(Rejection::OutsideWindow(instant))
        }
    }
}
