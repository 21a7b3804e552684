//! Location-history extraction pipeline.
//!
//! Turns a location-history export (a JSON array of `timelinePath`,
//! `activity` and `visit` entries) into normalized [`GeoRecord`]s and
//! [`PathGeometry`]s for a date window.
//!
//! [`GeoRecord`]: geotrail_core::GeoRecord
//! [`PathGeometry`]: geotrail_core::PathGeometry

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod extract;
pub mod geo_string;
pub mod pipeline;
pub mod timestamp;
pub mod types;
pub mod window;

pub use aggregate::{Aggregator, SkipStats, TimelineSnapshot};
pub use classify::{classify_entry, EntryShape, MovementShape};
pub use error::TimelineError;
pub use extract::{extract_entry, EntryExtraction};
pub use geo_string::{decode_geo_string, decode_geo_value, GeoDecodeError};
pub use pipeline::{build_timeline, build_timeline_from_file, load_entries, PipelineStage};
pub use timestamp::{normalize_timestamp, normalize_timestamp_in, TimestampError};
pub use types::RawEntry;
pub use window::{parse_boundary_date, DateWindow, Rejection};
