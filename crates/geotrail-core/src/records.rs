//! Normalized output units of the timeline pipeline.

use geo_types::LineString;
use serde::{Deserialize, Serialize};

/// Which record shape produced a [`GeoRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    #[serde(rename = "timelinePoint")]
    TimelinePoint,
    #[serde(rename = "activity-start")]
    ActivityStart,
    #[serde(rename = "activity-end")]
    ActivityEnd,
    #[serde(rename = "visit")]
    Visit,
}

impl RecordKind {
    /// Label used in the `type` column of the exported table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RecordKind::TimelinePoint => "timelinePoint",
            RecordKind::ActivityStart => "activity-start",
            RecordKind::ActivityEnd => "activity-end",
            RecordKind::Visit => "visit",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathKind {
    TimelinePath,
    ActivitySegment,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::TimelinePath => write!(f, "timelinePath"),
            PathKind::ActivitySegment => write!(f, "activitySegment"),
        }
    }
}

/// A single normalized point derived from one input entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub kind: RecordKind,
    /// Entry `startTime` as it appeared in the input; empty when absent.
    pub start_time: String,
    /// Entry `endTime` as it appeared in the input; empty when absent.
    pub end_time: String,
    /// Zero-based position of the originating entry in the input array.
    pub source_index: usize,
}

/// Presentation metadata derived from an `activity` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityInfo {
    /// `activity.topCandidate.type`, or `"unknown"`.
    pub activity_type: String,
    /// `activity.distanceMeters` rendered as text, or `"unknown"`.
    pub distance_meters: String,
    pub icon: String,
}

/// An ordered polyline of at least two points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathGeometry {
    pub kind: PathKind,
    /// `x` is longitude and `y` is latitude.
    pub points: LineString<f64>,
    pub source_index: usize,
    pub start_time: String,
    pub end_time: String,
    /// Present only for [`PathKind::ActivitySegment`].
    pub activity: Option<ActivityInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_labels_match_table_column_values() {
        assert_eq!(RecordKind::TimelinePoint.as_str(), "timelinePoint");
        assert_eq!(RecordKind::ActivityStart.to_string(), "activity-start");
        assert_eq!(RecordKind::ActivityEnd.to_string(), "activity-end");
        assert_eq!(RecordKind::Visit.to_string(), "visit");
    }

    #[test]
    fn record_kind_serializes_to_label() {
        let json = serde_json::to_string(&RecordKind::ActivityStart).unwrap();
        assert_eq!(json, "\"activity-start\"");
    }

    #[test]
    fn path_kind_serializes_camel_case() {
        let json = serde_json::to_string(&PathKind::ActivitySegment).unwrap();
        assert_eq!(json, "\"activitySegment\"");
        assert_eq!(PathKind::TimelinePath.to_string(), "timelinePath");
    }
}
