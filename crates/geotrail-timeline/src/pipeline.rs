//! Pipeline driver: load → filter → extract → aggregate.

use std::path::Path;

use chrono::{Local, TimeZone};
use geotrail_core::IconTable;
use serde::Deserialize;
use serde_json::Value;

use crate::aggregate::{Aggregator, TimelineSnapshot};
use crate::error::TimelineError;
use crate::extract::extract_entry;
use crate::types::RawEntry;
use crate::window::DateWindow;

/// Stages of one run. `Aggregated` is where this crate hands off;
/// `Exported` is reached by the caller once files are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    LoadingInput,
    Filtering,
    Extracting,
    Aggregated,
    Exported,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Idle => write!(f, "idle"),
            PipelineStage::LoadingInput => write!(f, "loading_input"),
            PipelineStage::Filtering => write!(f, "filtering"),
            PipelineStage::Extracting => write!(f, "extracting"),
            PipelineStage::Aggregated => write!(f, "aggregated"),
            PipelineStage::Exported => write!(f, "exported"),
        }
    }
}

/// Reads the export at `path` and returns its top-level entries.
///
/// Entries stay untyped here so that one oddly-shaped entry is skipped later
/// instead of failing the whole document.
///
/// # Errors
///
/// Returns [`TimelineError`] if the file cannot be read, is not valid JSON,
/// or its top-level value is not an array.
pub fn load_entries(path: &Path) -> Result<Vec<Value>, TimelineError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
        path: display.clone(),
        source,
    })?;

    let document: Value = serde_json::from_str(&content).map_err(|source| TimelineError::Json {
        path: display.clone(),
        source,
    })?;

    match document {
        Value::Array(entries) => Ok(entries),
        other => Err(TimelineError::NotAnArray {
            path: display,
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Runs filtering, extraction and aggregation over already-loaded entries.
///
/// Start times are normalized into `tz` before the window check. Output
/// order follows input order and every record keeps its entry's index.
#[must_use]
pub fn build_timeline<Tz: TimeZone>(
    entries: &[Value],
    window: &DateWindow,
    icons: &IconTable,
    tz: &Tz,
) -> TimelineSnapshot {
    let mut aggregator = Aggregator::new();

    if window.is_empty() {
        tracing::warn!(
            start = %window.start(),
            end = %window.end(),
            "date window start is after its end; no entries will be admitted"
        );
    }

    tracing::debug!(stage = %PipelineStage::Filtering, entries = entries.len(), "filtering entries");
    let mut admitted: Vec<(usize, RawEntry)> = Vec::new();
    for (index, value) in entries.iter().enumerate() {
        let entry = match RawEntry::deserialize(value) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping entry with unexpected field types");
                aggregator.reject_malformed();
                continue;
            }
        };
        match window.admit(&entry, tz) {
            Ok(_) => admitted.push((index, entry)),
            Err(rejection) => {
                tracing::trace!(index, ?rejection, "entry not admitted");
                aggregator.reject(&rejection);
            }
        }
    }

    tracing::debug!(stage = %PipelineStage::Extracting, admitted = admitted.len(), "extracting records");
    for (index, entry) in &admitted {
        aggregator.absorb(extract_entry(*index, entry, icons));
    }

    let snapshot = aggregator.finish();
    tracing::debug!(
        stage = %PipelineStage::Aggregated,
        records = snapshot.records.len(),
        paths = snapshot.path_count,
        "timeline aggregated"
    );
    if snapshot.stats.unparseable_start_times > 0 {
        tracing::warn!(
            count = snapshot.stats.unparseable_start_times,
            "entries skipped for a missing or unparseable startTime"
        );
    }
    snapshot
}

/// Loads `path` and builds the snapshot in the process-local time zone.
///
/// # Errors
///
/// Returns [`TimelineError`] if the input cannot be loaded; see
/// [`load_entries`].
pub fn build_timeline_from_file(
    path: &Path,
    window: &DateWindow,
    icons: &IconTable,
) -> Result<TimelineSnapshot, TimelineError> {
    tracing::debug!(stage = %PipelineStage::LoadingInput, path = %path.display(), "loading location history");
    let entries = load_entries(path)?;
    Ok(build_timeline(&entries, window, icons, &Local))
}
