//! Accumulation of per-entry extractions into one finished snapshot.

use geo::BoundingRect;
use geo_types::{MultiPoint, Point, Rect};
use geotrail_core::{GeoRecord, PathGeometry};
use serde::Serialize;

use crate::extract::EntryExtraction;
use crate::window::Rejection;

/// Counters for everything the pipeline dropped without failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    pub admitted_entries: usize,
    /// Entries whose fields had unexpected JSON types.
    pub malformed_entries: usize,
    /// Entries with a missing or unparseable `startTime`.
    pub unparseable_start_times: usize,
    pub outside_window: usize,
    /// Timeline samples dropped for a malformed coordinate.
    pub skipped_points: usize,
    /// Activity or visit shapes dropped for a malformed coordinate.
    pub failed_shapes: usize,
}

impl SkipStats {
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.admitted_entries
            + self.malformed_entries
            + self.unparseable_start_times
            + self.outside_window
    }

    #[must_use]
    pub fn rejected_entries(&self) -> usize {
        self.total_entries() - self.admitted_entries
    }
}

/// Collects extractions in entry order.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<GeoRecord>,
    paths: Vec<PathGeometry>,
    points: Vec<Point<f64>>,
    stats: SkipStats,
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one admitted entry's output.
    pub fn absorb(&mut self, extraction: EntryExtraction) {
        self.stats.admitted_entries += 1;
        self.stats.skipped_points += extraction.skipped_points;
        self.stats.failed_shapes += extraction.failed_shapes;
        self.records.extend(extraction.records);
        self.paths.extend(extraction.paths);
        self.points.extend(extraction.points);
    }

    pub fn reject(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::Timestamp(_) => self.stats.unparseable_start_times += 1,
            Rejection::OutsideWindow(_) => self.stats.outside_window += 1,
        }
    }

    pub fn reject_malformed(&mut self) {
        self.stats.malformed_entries += 1;
    }

    #[must_use]
    pub fn finish(self) -> TimelineSnapshot {
        let points = MultiPoint::new(self.points);
        let bounds = points.bounding_rect();
        TimelineSnapshot {
            path_count: self.paths.len(),
            records: self.records,
            paths: self.paths,
            points: points.0,
            bounds,
            stats: self.stats,
        }
    }
}

/// The finished output of one pipeline run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineSnapshot {
    pub records: Vec<GeoRecord>,
    pub paths: Vec<PathGeometry>,
    pub path_count: usize,
    /// Every decoded coordinate, for fitting the map view.
    pub points: Vec<Point<f64>>,
    /// Box around `points`; `None` when nothing was decoded.
    pub bounds: Option<Rect<f64>>,
    pub stats: SkipStats,
}

impl TimelineSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.paths.is_empty()
    }
}
