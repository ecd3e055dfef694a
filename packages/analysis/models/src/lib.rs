#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Landfall analysis configuration and result types.
//!
//! These are the records exchanged between the analysis driver and its
//! callers: the [`AnalysisConfig`] going in, and one [`LandfallResult`] per
//! storm (collected in an [`AnalysisOutcome`]) coming out. They carry no
//! behaviour beyond validation and convenience accessors, and serialize to
//! `camelCase` JSON for reporting.

pub mod config;
pub mod trace;

use chrono::{DateTime, Utc};
use landfall_track_models::Position;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use config::{AnalysisConfig, ConfigError, DEFAULT_MIN_YEAR};
pub use trace::{PathTrace, TracePoint};

/// Strategy used to decide whether a track made landfall.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DetectionMethod {
    /// Test each fix for containment in the boundary.
    #[default]
    Point,
    /// Test each segment between consecutive fixes for intersection with
    /// the boundary.
    Line,
}

impl DetectionMethod {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Point, Self::Line]
    }

    /// Minimum number of fixes the method needs to evaluate a track.
    #[must_use]
    pub const fn required_fixes(self) -> usize {
        match self {
            Self::Point => 1,
            Self::Line => 2,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Point => "Point (fix containment)",
            Self::Line => "Line (segment intersection)",
        }
    }
}

/// How a landfall crossing was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CrossingKind {
    /// A fix lies inside the boundary; its timestamp is used as-is.
    #[serde(rename_all = "camelCase")]
    AtFix {
        /// Index of the fix within the track.
        fix_index: usize,
    },
    /// The segment starting at `segment_start` meets the boundary; the time
    /// is interpolated along the segment.
    #[serde(rename_all = "camelCase")]
    Interpolated {
        /// Index of the first fix of the segment.
        segment_start: usize,
    },
}

/// Where and when a track first reached the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandfallCrossing {
    /// Crossing location.
    pub point: Position,
    /// Crossing time, exact or interpolated depending on `kind`.
    pub time: DateTime<Utc>,
    /// How the crossing was found.
    #[serde(flatten)]
    pub kind: CrossingKind,
}

/// Non-fatal conditions recorded on a [`LandfallResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalysisWarning {
    /// No fix carries a wind speed, so there is no maximum intensity.
    MissingIntensityData,
    /// The track is too short for the chosen detection method and was
    /// reported as not making landfall.
    #[serde(rename_all = "camelCase")]
    InsufficientFixes {
        /// Method that could not be applied.
        method: DetectionMethod,
        /// Fixes the method needs.
        required: usize,
        /// Fixes the track has.
        actual: usize,
    },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingIntensityData => write!(f, "no wind speed recorded"),
            Self::InsufficientFixes {
                method,
                required,
                actual,
            } => write!(
                f,
                "{method} method needs {required} fixes, track has {actual}"
            ),
        }
    }
}

/// Analysis result for a single storm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandfallResult {
    /// Storm identifier (e.g. `"AL051975"`).
    pub storm_id: String,
    /// Storm name.
    pub name: String,
    /// Season year.
    pub year: i32,
    /// Whether any fix carried the target classification.
    pub is_classified_as_target: bool,
    /// Detection method the result was produced with.
    pub method: DetectionMethod,
    /// Whether a landfall was detected.
    pub made_landfall: bool,
    /// The first crossing, present only if `made_landfall`.
    pub landfall: Option<LandfallCrossing>,
    /// Maximum sustained wind in knots, `None` if never recorded.
    pub max_wind_speed: Option<u16>,
    /// Minimum central pressure in millibars, `None` if never recorded.
    pub min_pressure: Option<u16>,
    /// Non-fatal conditions encountered while analyzing this storm.
    pub warnings: Vec<AnalysisWarning>,
}

impl LandfallResult {
    /// Landfall time, present only if `made_landfall`.
    #[must_use]
    pub fn landfall_time(&self) -> Option<DateTime<Utc>> {
        self.landfall.map(|crossing| crossing.time)
    }

    /// Landfall location, present only if `made_landfall`.
    #[must_use]
    pub fn landfall_point(&self) -> Option<Position> {
        self.landfall.map(|crossing| crossing.point)
    }

    /// `true` when the storm was a target-class storm that made landfall.
    #[must_use]
    pub const fn is_target_landfall(&self) -> bool {
        self.is_classified_as_target && self.made_landfall
    }
}

/// A storm whose analysis failed outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StormFailure {
    pub storm_id: String,
    pub name: String,
    /// Description of the failure.
    pub message: String,
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    /// One result per storm inside the year range, in dataset order.
    pub results: Vec<LandfallResult>,
    /// Storms whose boundary queries failed, in dataset order.
    pub failures: Vec<StormFailure>,
    /// Storms skipped by the year filter.
    pub excluded_by_year: usize,
}

impl AnalysisOutcome {
    /// Target-class storms that made landfall.
    pub fn landfalls(&self) -> impl Iterator<Item = &LandfallResult> {
        self.results.iter().filter(|r| r.is_target_landfall())
    }

    /// Result for a storm id, if it was analyzed.
    #[must_use]
    pub fn get(&self, storm_id: &str) -> Option<&LandfallResult> {
        self.results.iter().find(|r| r.storm_id == storm_id)
    }
}
