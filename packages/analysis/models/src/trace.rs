//! Plot-ready view of a storm path.

use chrono::{DateTime, Utc};
use landfall_track_models::StormStatus;
use serde::{Deserialize, Serialize};

use crate::LandfallCrossing;

/// One fix reduced to what a path plot needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePoint {
    pub lon: f64,
    pub lat: f64,
    pub time: DateTime<Utc>,
    pub status: StormStatus,
    pub wind_speed: Option<u16>,
}

/// A storm's raw path plus its detected crossing, for external plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathTrace {
    pub storm_id: String,
    pub name: String,
    pub year: i32,
    /// Path in chronological order.
    pub points: Vec<TracePoint>,
    /// Recorded crossing, if the storm made landfall.
    pub landfall: Option<LandfallCrossing>,
}

impl PathTrace {
    /// `"NAME YEAR"`, the plot title.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} {}", self.name, self.year)
    }
}
