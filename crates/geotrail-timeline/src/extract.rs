//! Per-entry extraction of [`GeoRecord`]s and [`PathGeometry`]s.
//!
//! Decode failures never escape an entry. A malformed timeline sample drops
//! only that sample; malformed activity endpoints or visit locations drop
//! only that shape. A coordinate that is not a string at all counts as
//! malformed. Each drop is logged and counted.

use geo_types::{LineString, Point};
use geotrail_core::{ActivityInfo, GeoRecord, IconTable, PathGeometry, PathKind, RecordKind};
use serde_json::Value;

use crate::classify::{classify_entry, MovementShape};
use crate::geo_string::decode_geo_value;
use crate::types::{RawActivity, RawEntry, RawTimelinePoint};

/// Everything one entry contributes to the aggregate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryExtraction {
    pub records: Vec<GeoRecord>,
    pub paths: Vec<PathGeometry>,
    /// Every decoded coordinate in emission order, for bounds fitting.
    pub points: Vec<Point<f64>>,
    pub skipped_points: usize,
    pub failed_shapes: usize,
}

struct EntryContext<'a> {
    source_index: usize,
    start_time: &'a str,
    end_time: &'a str,
}

impl EntryContext<'_> {
    fn record(&self, at: Point<f64>, kind: RecordKind) -> GeoRecord {
        GeoRecord {
            latitude: at.y(),
            longitude: at.x(),
            kind,
            start_time: self.start_time.to_owned(),
            end_time: self.end_time.to_owned(),
            source_index: self.source_index,
        }
    }

    fn path(
        &self,
        kind: PathKind,
        points: Vec<Point<f64>>,
        activity: Option<ActivityInfo>,
    ) -> PathGeometry {
        PathGeometry {
            kind,
            points: LineString::from(points),
            source_index: self.source_index,
            start_time: self.start_time.to_owned(),
            end_time: self.end_time.to_owned(),
            activity,
        }
    }
}

/// Extracts records and geometries from one admitted entry.
///
/// `source_index` is the entry's position in the original input array.
#[must_use]
pub fn extract_entry(source_index: usize, entry: &RawEntry, icons: &IconTable) -> EntryExtraction {
    let ctx = EntryContext {
        source_index,
        start_time: entry.start_time_or_empty(),
        end_time: entry.end_time_or_empty(),
    };
    let shape = classify_entry(entry);
    let mut out = EntryExtraction::default();
    if shape.is_empty() {
        tracing::trace!(source_index, "entry has no plottable shape");
        return out;
    }

    match shape.movement {
        Some(MovementShape::TimelinePath(samples)) => extract_timeline_path(&ctx, samples, &mut out),
        Some(MovementShape::Activity {
            start,
            end,
            activity,
        }) => extract_activity(&ctx, start, end, activity, icons, &mut out),
        None => {}
    }

    if let Some(location) = shape.visit_location {
        match decode_geo_value(location) {
            Ok(at) => {
                out.records.push(ctx.record(at, RecordKind::Visit));
                out.points.push(at);
            }
            Err(e) => {
                tracing::warn!(source_index, error = %e, "skipping visit with malformed location");
                out.failed_shapes += 1;
            }
        }
    }

    out
}

fn extract_timeline_path(
    ctx: &EntryContext<'_>,
    samples: &[RawTimelinePoint],
    out: &mut EntryExtraction,
) {
    let mut path = Vec::with_capacity(samples.len());
    for (sample_index, raw) in samples
        .iter()
        .enumerate()
        .filter_map(|(i, s)| s.point.as_ref().map(|p| (i, p)))
    {
        match decode_geo_value(raw) {
            Ok(at) => {
                out.records.push(ctx.record(at, RecordKind::TimelinePoint));
                out.points.push(at);
                path.push(at);
            }
            Err(e) => {
                tracing::warn!(
                    source_index = ctx.source_index,
                    sample_index,
                    error = %e,
                    "skipping malformed timeline sample"
                );
                out.skipped_points += 1;
            }
        }
    }

    if path.len() > 1 {
        out.paths.push(ctx.path(PathKind::TimelinePath, path, None));
    }
}

fn extract_activity(
    ctx: &EntryContext<'_>,
    start: &Value,
    end: &Value,
    activity: &RawActivity,
    icons: &IconTable,
    out: &mut EntryExtraction,
) {
    let endpoints = decode_geo_value(start).and_then(|s| decode_geo_value(end).map(|e| (s, e)));
    let (from, to) = match endpoints {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(
                source_index = ctx.source_index,
                error = %e,
                "skipping activity with malformed endpoint"
            );
            out.failed_shapes += 1;
            return;
        }
    };

    let activity_type = activity.activity_type();
    let info = ActivityInfo {
        activity_type: activity_type.to_owned(),
        distance_meters: activity.distance_text(),
        icon: icons.icon_for(activity_type).to_owned(),
    };

    out.paths
        .push(ctx.path(PathKind::ActivitySegment, vec![from, to], Some(info)));
    out.records.push(ctx.record(from, RecordKind::ActivityStart));
    out.records.push(ctx.record(to, RecordKind::ActivityEnd));
    out.points.push(from);
    out.points.push(to);
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
