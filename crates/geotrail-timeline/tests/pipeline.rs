//! End-to-end tests over a location-history file on disk.
//!
//! Timestamps sit mid-day, weeks away from the window edges, so results do
//! not depend on the machine's local time zone.

use std::io::Write;

use geo_types::coord;
use geotrail_core::{IconTable, PathKind, RecordKind};
use geotrail_timeline::{build_timeline_from_file, load_entries, DateWindow, TimelineError};

fn write_history(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn march() -> DateWindow {
    DateWindow::parse("2019-03-01", "2019-03-31").unwrap()
}

const HISTORY: &str = r#"[
  {
    "startTime": "2019-03-10T12:00:00.000Z",
    "endTime": "2019-03-10T14:00:00.000Z",
    "timelinePath": [
      {"point": "geo:47.6062,-122.3321", "durationMinutesOffsetFromStartTime": "0"},
      {"point": "geo:47.6097,-122.3331", "durationMinutesOffsetFromStartTime": "15"},
      {"point": "geo:47.6154,-122.3208", "durationMinutesOffsetFromStartTime": "40"}
    ]
  },
  {
    "startTime": "2019-05-10T12:00:00.000Z",
    "endTime": "2019-05-10T13:00:00.000Z",
    "visit": {"topCandidate": {"placeLocation": "geo:40.0,-70.0"}}
  },
  {
    "startTime": "2019-03-12T12:00:00.000-07:00",
    "endTime": "2019-03-12T12:45:00.000-07:00",
    "activity": {
      "start": "geo:47.6062,-122.3321",
      "end": "geo:47.6740,-122.1215",
      "distanceMeters": "17342.0",
      "topCandidate": {"type": "in passenger vehicle", "probability": "0.93"}
    }
  },
  {
    "startTime": "2019-03-14T12:00:00.000Z",
    "endTime": "2019-03-14T18:00:00.000Z",
    "visit": {"hierarchyLevel": "0", "topCandidate": {"placeLocation": "geo:47.6205,-122.3493"}}
  },
  {
    "startTime": "2019-03-20T12:00:00.000Z",
    "endTime": "2019-03-20T12:30:00.000Z",
    "timelinePath": [{"point": "geo:47.0,-122.0"}],
    "visit": {"topCandidate": {"placeLocation": "geo:47.1,-122.1"}}
  }
]"#;

#[test]
fn builds_snapshot_from_file() {
    let file = write_history(HISTORY);
    let snapshot = build_timeline_from_file(file.path(), &march(), &IconTable::default()).unwrap();

    let kinds: Vec<RecordKind> = snapshot.records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::TimelinePoint,
            RecordKind::TimelinePoint,
            RecordKind::TimelinePoint,
            RecordKind::ActivityStart,
            RecordKind::ActivityEnd,
            RecordKind::Visit,
            RecordKind::TimelinePoint,
            RecordKind::Visit,
        ]
    );
    let indices: Vec<usize> = snapshot.records.iter().map(|r| r.source_index).collect();
    assert_eq!(indices, vec![0, 0, 0, 2, 2, 3, 4, 4]);

    assert_eq!(snapshot.path_count, 2);
    assert_eq!(snapshot.paths[0].kind, PathKind::TimelinePath);
    assert_eq!(snapshot.paths[0].points.0.len(), 3);
    assert_eq!(snapshot.paths[1].kind, PathKind::ActivitySegment);
    let info = snapshot.paths[1].activity.as_ref().unwrap();
    assert_eq!(info.activity_type, "in passenger vehicle");
    assert_eq!(info.distance_meters, "17342.0");
    assert_eq!(info.icon, "\u{1f697}");

    assert_eq!(snapshot.points.len(), 8);
    let bounds = snapshot.bounds.unwrap();
    assert_eq!(bounds.min(), coord! { x: -122.3493, y: 47.0 });
    assert_eq!(bounds.max(), coord! { x: -122.0, y: 47.674 });

    assert_eq!(snapshot.stats.admitted_entries, 4);
    assert_eq!(snapshot.stats.outside_window, 1);
}

#[test]
fn empty_array_is_not_an_error() {
    let file = write_history("[]");
    let snapshot = build_timeline_from_file(file.path(), &march(), &IconTable::default()).unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.path_count, 0);
    assert!(snapshot.bounds.is_none());
}

#[test]
fn missing_file_is_io_error() {
    let result = load_entries(std::path::Path::new("/nonexistent/history.json"));
    assert!(matches!(result, Err(TimelineError::Io { .. })));
}

#[test]
fn invalid_json_is_fatal() {
    let file = write_history("[{\"startTime\": ");
    let result = build_timeline_from_file(file.path(), &march(), &IconTable::default());
    assert!(matches!(result, Err(TimelineError::Json { .. })));
}

#[test]
fn top_level_object_is_rejected() {
    let file = write_history(r#"{"timelineObjects": []}"#);
    let result = load_entries(file.path());
    assert!(
        matches!(result, Err(TimelineError::NotAnArray { found, .. }) if found == "an object"),
        "expected NotAnArray, got: {result:?}"
    );
}
