//! Raw entry types for the location-history export.
//!
//! ## Observed shape
//!
//! The export is a top-level JSON array. Each element carries `startTime` and
//! `endTime` (ISO-8601 with an offset, e.g. `"2019-03-01T10:00:00.000-05:00"`)
//! plus any of:
//!
//! - `timelinePath`: raw samples, `[{"point": "geo:lat,lon",
//!   "durationMinutesOffsetFromStartTime": "12"}, ...]`. Samples without a
//!   `point` carry nothing to plot.
//! - `activity`: `start`/`end` geo-strings, `distanceMeters` (a string in
//!   observed exports, occasionally a number) and `topCandidate.type` such as
//!   `"in passenger vehicle"`.
//! - `visit`: `topCandidate.placeLocation` (geo-string).
//!
//! `visit` can appear next to either of the other two shapes. Unknown fields
//! are ignored.
//!
//! Coordinate fields are kept as raw JSON values. A wrongly typed coordinate
//! then fails only its own shape during extraction instead of the whole entry.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntry {
    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(default)]
    pub timeline_path: Option<Vec<RawTimelinePoint>>,

    #[serde(default)]
    pub activity: Option<RawActivity>,

    #[serde(default)]
    pub visit: Option<RawVisit>,
}

impl RawEntry {
    /// `startTime`, or `""` when absent.
    #[must_use]
    pub fn start_time_or_empty(&self) -> &str {
        self.start_time.as_deref().unwrap_or("")
    }

    /// `endTime`, or `""` when absent.
    #[must_use]
    pub fn end_time_or_empty(&self) -> &str {
        self.end_time.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimelinePoint {
    #[serde(default)]
    pub point: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    #[serde(default)]
    pub start: Option<Value>,

    #[serde(default)]
    pub end: Option<Value>,

    /// String in observed exports; numbers are accepted too.
    #[serde(default)]
    pub distance_meters: Option<Value>,

    #[serde(default)]
    pub top_candidate: Option<RawActivityCandidate>,
}

impl RawActivity {
    /// `topCandidate.type` when it is a string, otherwise `"unknown"`.
    #[must_use]
    pub fn activity_type(&self) -> &str {
        self.top_candidate
            .as_ref()
            .and_then(|c| c.kind.as_ref())
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    /// `distanceMeters` as given, or `"unknown"` when the key is absent.
    ///
    /// Strings are kept verbatim, blank ones included; any other JSON value
    /// is shown in its JSON form.
    #[must_use]
    pub fn distance_text(&self) -> String {
        match &self.distance_meters {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unknown".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawActivityCandidate {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVisit {
    #[serde(default)]
    pub top_candidate: Option<RawPlaceCandidate>,
}

impl RawVisit {
    /// `topCandidate.placeLocation` unless absent or an empty string.
    #[must_use]
    pub fn place_location(&self) -> Option<&Value> {
        self.top_candidate
            .as_ref()
            .and_then(|c| c.place_location.as_ref())
            .filter(|v| v.as_str() != Some(""))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaceCandidate {
    #[serde(default)]
    pub place_location: Option<Value>,
}
