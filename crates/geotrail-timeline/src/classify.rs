//! Shape classification for raw entries.
//!
//! An entry has at most one movement shape. `timelinePath` wins whenever the
//! key is present, even with an empty sample list; `activity` is considered
//! only otherwise, and only with both endpoints. A visit location is detected
//! independently of the movement shape. Coordinates stay undecoded here.

use serde_json::Value;

use crate::types::{RawActivity, RawEntry, RawTimelinePoint};

#[derive(Debug, Clone, Copy)]
pub enum MovementShape<'a> {
    TimelinePath(&'a [RawTimelinePoint]),
    Activity {
        start: &'a Value,
        end: &'a Value,
        activity: &'a RawActivity,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EntryShape<'a> {
    pub movement: Option<MovementShape<'a>>,
    /// Undecoded `visit.topCandidate.placeLocation`.
    pub visit_location: Option<&'a Value>,
}

impl EntryShape<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.visit_location.is_none()
    }
}

#[must_use]
pub fn classify_entry(entry: &RawEntry) -> EntryShape<'_> {
    let movement = if let Some(points) = entry.timeline_path.as_deref() {
        Some(MovementShape::TimelinePath(points))
    } else {
        entry.activity.as_ref().and_then(|activity| {
            match (activity.start.as_ref(), activity.end.as_ref()) {
                (Some(start), Some(end)) => Some(MovementShape::Activity {
                    start,
                    end,
                    activity,
                }),
                _ => None,
            }
        })
    };

    let visit_location = entry.visit.as_ref().and_then(|v| v.place_location());

    EntryShape {
        movement,
        visit_location,
    }
}
