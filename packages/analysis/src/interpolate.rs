//! Crossing-time estimation along a segment.
//!
//! The storm is assumed to move at constant speed along the straight chord
//! between two fixes in longitude/latitude space. Distances are planar
//! degree distances; there is no geodesic correction.

use chrono::{DateTime, TimeDelta, Utc};
use landfall_track_models::{Fix, Position};

/// Fraction of the way from `start` to `end` at which `point` lies,
/// clamped to `[0, 1]`.
///
/// A zero-length segment yields `0.0`.
#[must_use]
pub fn crossing_ratio(start: Position, end: Position, point: Position) -> f64 {
    let total = start.planar_distance(end);
    if total == 0.0 {
        return 0.0;
    }
    (start.planar_distance(point) / total).clamp(0.0, 1.0)
}

/// Estimated time at which the storm passed `point` while moving from
/// `start` to `end`, rounded to the millisecond.
///
/// If the two fixes share a location, `start`'s timestamp is returned.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn interpolate_crossing_time(start: &Fix, end: &Fix, point: Position) -> DateTime<Utc> {
    let ratio = crossing_ratio(start.position(), end.position(), point);
    let span_ms = (end.timestamp - start.timestamp).num_milliseconds();
    let offset_ms = (span_ms as f64 * ratio).round() as i64;

    start.timestamp + TimeDelta::milliseconds(offset_ms)
}
