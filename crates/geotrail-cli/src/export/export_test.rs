use chrono::NaiveDate;
use geotrail_core::{GeoRecord, RecordKind};

use super::*;

fn snapshot_with_visit() -> TimelineSnapshot {
    TimelineSnapshot {
        records: vec![GeoRecord {
            latitude: 5.0,
            longitude: 6.0,
            kind: RecordKind::Visit,
            start_time: "2019-03-01T10:00:00Z".to_string(),
            end_time: "2019-03-01T11:00:00Z".to_string(),
            source_index: 2,
        }],
        ..TimelineSnapshot::default()
    }
}

fn paths_in(dir: &Path, include_table: bool) -> OutputPaths {
    let now = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    OutputPaths::new(dir, "trip", now, include_table)
}

#[test]
fn export_writes_map_and_table() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path(), true);

    let summary = export_snapshot(&snapshot_with_visit(), &paths).unwrap();
    assert_eq!(summary.table_rows, Some(1));

    let html = std::fs::read_to_string(&paths.html).unwrap();
    assert!(html.contains("<title>trip</title>"));

    let table = std::fs::read_to_string(paths.table.as_ref().unwrap()).unwrap();
    assert_eq!(
        table,
        "latitude,longitude,type,startTime,endTime,entryID\r\n\
         5.0,6.0,visit,2019-03-01T10:00:00Z,2019-03-01T11:00:00Z,2\r\n"
    );
}

#[test]
fn export_without_table_writes_only_map() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path(), false);

    let summary = export_snapshot(&snapshot_with_visit(), &paths).unwrap();
    assert!(summary.table_rows.is_none());
    assert!(paths.html.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn export_creates_missing_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("maps").join("2019");
    let paths = paths_in(&nested, false);

    export_snapshot(&TimelineSnapshot::default(), &paths).unwrap();
    assert!(nested.join("trip_20240102_030405.html").exists());
}

#[test]
fn export_into_a_file_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();
    let paths = paths_in(&blocker, false);

    let result = export_snapshot(&TimelineSnapshot::default(), &paths);
    assert!(matches!(result, Err(ExportError::Io { .. })));
}
