#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Storm track entity types.
//!
//! A [`Track`] is one storm: an identifier, a display name, a season year,
//! and a chronologically ordered, non-empty list of [`Fix`] observations.
//! Tracks are grouped into an immutable [`StormDataset`] that is handed to
//! the analysis driver for a single run.

pub mod dataset;
pub mod status;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub use dataset::StormDataset;
pub use status::{RecordIdentifier, StormStatus};

/// Errors raised while assembling tracks and datasets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    /// A track was constructed without any fixes.
    #[error("Track {id} has no fixes")]
    Empty {
        /// Storm identifier.
        id: String,
    },

    /// Two fixes of the same track share a timestamp.
    #[error("Track {id} has more than one fix at {timestamp}")]
    DuplicateTimestamp {
        /// Storm identifier.
        id: String,
        /// The repeated timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Two tracks in one dataset share an identifier.
    #[error("Dataset contains storm {id} more than once")]
    DuplicateStorm {
        /// Storm identifier.
        id: String,
    },
}

/// A longitude/latitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude, east positive.
    pub lon: f64,
    /// Latitude, north positive.
    pub lat: f64,
}

impl Position {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Planar Euclidean distance in degree space. No geodesic correction.
    #[must_use]
    pub fn planar_distance(self, other: Self) -> f64 {
        (other.lon - self.lon).hypot(other.lat - self.lat)
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// One timestamped observation along a storm's path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fix {
    /// Observation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
    /// System status valid at this instant.
    pub status: StormStatus,
    /// Maximum sustained wind in knots. `None` when not recorded.
    pub wind_speed: Option<u16>,
    /// Minimum central pressure in millibars. `None` when not recorded.
    pub min_pressure: Option<u16>,
    /// HURDAT2 record identifier (landfall, intensity peak, ...), if any.
    pub record_identifier: Option<RecordIdentifier>,
}

impl Fix {
    /// Creates a fix with no intensity data and no record identifier.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        longitude: f64,
        latitude: f64,
        status: StormStatus,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            status,
            wind_speed: None,
            min_pressure: None,
            record_identifier: None,
        }
    }

    #[must_use]
    pub const fn with_wind_speed(mut self, knots: Option<u16>) -> Self {
        self.wind_speed = knots;
        self
    }

    #[must_use]
    pub const fn with_min_pressure(mut self, millibars: Option<u16>) -> Self {
        self.min_pressure = millibars;
        self
    }

    #[must_use]
    pub const fn with_record_identifier(mut self, identifier: Option<RecordIdentifier>) -> Self {
        self.record_identifier = identifier;
        self
    }

    /// The fix location as a longitude/latitude pair.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.longitude, self.latitude)
    }
}

/// A single storm and its ordered fixes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    id: String,
    name: String,
    year: i32,
    basin: Option<String>,
    cyclone_number: Option<u8>,
    fixes: Vec<Fix>,
}

impl Track {
    /// Builds a track, ordering the fixes chronologically.
    ///
    /// The season year defaults to the year of the earliest fix.
    ///
    /// # Errors
    ///
    /// * [`TrackError::Empty`] if `fixes` is empty.
    /// * [`TrackError::DuplicateTimestamp`] if two fixes share a timestamp.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mut fixes: Vec<Fix>,
    ) -> Result<Self, TrackError> {
        let id = id.into();

        fixes.sort_by_key(|fix| fix.timestamp);

        if let Some(pair) = fixes
            .windows(2)
            .find(|pair| pair[0].timestamp == pair[1].timestamp)
        {
            return Err(TrackError::DuplicateTimestamp {
                timestamp: pair[0].timestamp,
                id,
            });
        }

        let Some(first) = fixes.first() else {
            return Err(TrackError::Empty { id });
        };
        let year = first.timestamp.year();

        Ok(Self {
            id,
            name: name.into(),
            year,
            basin: None,
            cyclone_number: None,
            fixes,
        })
    }

    /// Overrides the derived season year.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Attaches the basin code and per-season cyclone number.
    #[must_use]
    pub fn with_designation(mut self, basin: impl Into<String>, cyclone_number: u8) -> Self {
        self.basin = Some(basin.into());
        self.cyclone_number = Some(cyclone_number);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn basin(&self) -> Option<&str> {
        self.basin.as_deref()
    }

    #[must_use]
    pub const fn cyclone_number(&self) -> Option<u8> {
        self.cyclone_number
    }

    /// Fixes in chronological order. Never empty.
    #[must_use]
    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// `"NAME YEAR"`, used in logs and plot titles.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.year)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1975, 9, 23, hour, 0, 0).unwrap()
    }

    #[test]
    fn sorts_fixes_chronologically() {
        let fixes = vec![
            Fix::new(at(12), -86.0, 29.0, StormStatus::Hurricane),
            Fix::new(at(0), -87.0, 27.0, StormStatus::TropicalStorm),
            Fix::new(at(6), -86.5, 28.0, StormStatus::Hurricane),
        ];
        let track = Track::new("AL051975", "ELOISE", fixes).unwrap();

        let hours: Vec<_> = track.fixes().iter().map(|f| f.timestamp).collect();
        assert_eq!(hours, vec![at(0), at(6), at(12)]);
    }

    #[test]
    fn derives_year_from_first_fix() {
        let track = Track::new(
            "AL051975",
            "ELOISE",
            vec![Fix::new(at(0), -87.0, 27.0, StormStatus::Hurricane)],
        )
        .unwrap();
        assert_eq!(track.year(), 1975);
        assert_eq!(track.with_year(1976).year(), 1976);
    }

    #[test]
    fn rejects_empty_track() {
        assert_eq!(
            Track::new("AL011900", "UNNAMED", Vec::new()),
            Err(TrackError::Empty {
                id: "AL011900".to_string()
            })
        );
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let fixes = vec![
            Fix::new(at(6), -87.0, 27.0, StormStatus::Hurricane),
            Fix::new(at(6), -86.0, 28.0, StormStatus::Hurricane),
        ];
        let err = Track::new("AL051975", "ELOISE", fixes).unwrap_err();
        assert!(matches!(err, TrackError::DuplicateTimestamp { .. }));
    }

    #[test]
    fn planar_distance_ignores_latitude_scaling() {
        let a = Position::new(0.0, 60.0);
        let b = Position::new(3.0, 64.0);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn label_combines_name_and_year() {
        let track = Track::new(
            "AL051975",
            "ELOISE",
            vec![Fix::new(at(0), -87.0, 27.0, StormStatus::Hurricane)],
        )
        .unwrap();
        assert_eq!(track.label(), "ELOISE 1975");
    }
}
