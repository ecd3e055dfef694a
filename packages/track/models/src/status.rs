//! HURDAT2 classification codes.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// System status of a storm at one fix.
///
/// Serialized as the two-letter HURDAT2 code (e.g. `"HU"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum StormStatus {
    /// Tropical cyclone of depression intensity (< 34 kt)
    #[serde(rename = "TD")]
    #[strum(serialize = "TD")]
    TropicalDepression,
    /// Tropical cyclone of tropical storm intensity (34-63 kt)
    #[serde(rename = "TS")]
    #[strum(serialize = "TS")]
    TropicalStorm,
    /// Tropical cyclone of hurricane intensity (>= 64 kt)
    #[serde(rename = "HU")]
    #[strum(serialize = "HU")]
    Hurricane,
    /// Extratropical cyclone
    #[serde(rename = "EX")]
    #[strum(serialize = "EX")]
    Extratropical,
    /// Subtropical cyclone of depression intensity
    #[serde(rename = "SD")]
    #[strum(serialize = "SD")]
    SubtropicalDepression,
    /// Subtropical cyclone of storm intensity
    #[serde(rename = "SS")]
    #[strum(serialize = "SS")]
    SubtropicalStorm,
    /// Low that is neither tropical, subtropical, nor extratropical
    #[serde(rename = "LO")]
    #[strum(serialize = "LO")]
    Low,
    /// Tropical wave
    #[serde(rename = "WV")]
    #[strum(serialize = "WV")]
    TropicalWave,
    /// Disturbance
    #[serde(rename = "DB")]
    #[strum(serialize = "DB")]
    Disturbance,
}

impl StormStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::TropicalDepression,
            Self::TropicalStorm,
            Self::Hurricane,
            Self::Extratropical,
            Self::SubtropicalDepression,
            Self::SubtropicalStorm,
            Self::Low,
            Self::TropicalWave,
            Self::Disturbance,
        ]
    }

    /// Human-readable description, for prompts and reports.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::TropicalDepression => "Tropical depression",
            Self::TropicalStorm => "Tropical storm",
            Self::Hurricane => "Hurricane",
            Self::Extratropical => "Extratropical cyclone",
            Self::SubtropicalDepression => "Subtropical depression",
            Self::SubtropicalStorm => "Subtropical storm",
            Self::Low => "Low",
            Self::TropicalWave => "Tropical wave",
            Self::Disturbance => "Disturbance",
        }
    }
}

/// HURDAT2 record identifier (third column of a data line).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RecordIdentifier {
    /// Closest approach to a coast, not followed by a landfall
    #[serde(rename = "C")]
    #[strum(serialize = "C")]
    ClosestApproach,
    /// Genesis
    #[serde(rename = "G")]
    #[strum(serialize = "G")]
    Genesis,
    /// Intensity peak in terms of both pressure and wind
    #[serde(rename = "I")]
    #[strum(serialize = "I")]
    IntensityPeak,
    /// Landfall (center of system crossing a coastline)
    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Landfall,
    /// Minimum in central pressure
    #[serde(rename = "P")]
    #[strum(serialize = "P")]
    MinimumPressure,
    /// Change of status of the system
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    StatusChange,
    /// Additional detail on the track (position) of the cyclone
    #[serde(rename = "T")]
    #[strum(serialize = "T")]
    TrackDetail,
    /// Maximum sustained wind speed
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    MaximumWind,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for status in StormStatus::all() {
            assert_eq!(StormStatus::from_str(status.as_ref()), Ok(*status));
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(StormStatus::from_str("hu"), Ok(StormStatus::Hurricane));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(StormStatus::from_str("XX").is_err());
    }

    #[test]
    fn status_displays_as_code() {
        assert_eq!(StormStatus::Extratropical.to_string(), "EX");
    }

    #[test]
    fn record_identifier_parses_landfall() {
        assert_eq!(
            RecordIdentifier::from_str("L"),
            Ok(RecordIdentifier::Landfall)
        );
    }
}
