//! Landfall detection strategies.
//!
//! Two strategies are available behind the [`LandfallDetector`] trait:
//!
//! * [`PointMethod`] reports the first fix that lies inside the boundary.
//!   A storm that crosses the coast between two offshore fixes (the
//!   classic Eloise 1975 case, where the six-hourly fixes straddle the
//!   Florida panhandle) is missed. That blind spot is inherent to the
//!   method and is kept as-is.
//! * [`LineMethod`] treats each pair of consecutive fixes as a straight
//!   segment and reports the first segment that meets the boundary. A
//!   segment whose start fix is inside counts, so every landfall found by
//!   the point method is also found by the line method.
//!
//! [`DetectionMethod`] dispatches to one of the two by configuration.

use landfall_analysis_models::{CrossingKind, DetectionMethod, LandfallCrossing};
use landfall_boundary::{BoundaryError, RegionBoundary};
use landfall_track_models::{Fix, Position};

use crate::interpolate::interpolate_crossing_time;

/// Errors that prevent a detection method from evaluating a track.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The track has too few fixes for the method.
    #[error("{method} method needs at least {required} fixes, track has {actual}")]
    MalformedTrack {
        /// Method that was attempted.
        method: DetectionMethod,
        /// Fixes the method needs.
        required: usize,
        /// Fixes the track has.
        actual: usize,
    },

    /// A boundary query failed.
    #[error("Boundary query failed: {0}")]
    Boundary(#[from] BoundaryError),
}

/// Outcome of running a detection method over a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection {
    /// No landfall.
    Miss,
    /// A fix lies inside the boundary.
    AtFix {
        /// Index of the fix.
        index: usize,
        /// The fix itself.
        fix: Fix,
    },
    /// The segment `start -> end` meets the boundary at `point`.
    Crossing {
        /// Index of `start` within the track.
        segment_start: usize,
        start: Fix,
        end: Fix,
        point: Position,
    },
}

impl Detection {
    #[must_use]
    pub const fn is_landfall(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// Turns the detection into a timed crossing. A fix hit keeps the fix's
    /// own timestamp; a segment crossing is interpolated.
    #[must_use]
    pub fn into_crossing(self) -> Option<LandfallCrossing> {
        match self {
            Self::Miss => None,
            Self::AtFix { index, fix } => Some(LandfallCrossing {
                point: fix.position(),
                time: fix.timestamp,
                kind: CrossingKind::AtFix { fix_index: index },
            }),
            Self::Crossing {
                segment_start,
                start,
                end,
                point,
            } => Some(LandfallCrossing {
                point,
                time: interpolate_crossing_time(&start, &end, point),
                kind: CrossingKind::Interpolated { segment_start },
            }),
        }
    }
}

/// A landfall detection strategy.
pub trait LandfallDetector {
    /// Which configured method this detector implements.
    fn method(&self) -> DetectionMethod;

    /// Runs detection over chronologically ordered `fixes`.
    ///
    /// # Errors
    ///
    /// * [`DetectError::MalformedTrack`] if there are too few fixes.
    /// * [`DetectError::Boundary`] if a boundary query fails.
    fn detect(&self, fixes: &[Fix], boundary: &dyn RegionBoundary)
    -> Result<Detection, DetectError>;
}

/// Fix containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointMethod;

impl LandfallDetector for PointMethod {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Point
    }

    fn detect(
        &self,
        fixes: &[Fix],
        boundary: &dyn RegionBoundary,
    ) -> Result<Detection, DetectError> {
        ensure_fixes(self.method(), fixes)?;

        for (index, fix) in fixes.iter().enumerate() {
            if boundary.contains(fix.longitude, fix.latitude)? {
                return Ok(Detection::AtFix { index, fix: *fix });
            }
        }

        Ok(Detection::Miss)
    }
}

/// Segment intersection, first crossing wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMethod;

impl LandfallDetector for LineMethod {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Line
    }

    fn detect(
        &self,
        fixes: &[Fix],
        boundary: &dyn RegionBoundary,
    ) -> Result<Detection, DetectError> {
        ensure_fixes(self.method(), fixes)?;

        for (segment_start, pair) in fixes.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if let Some(point) = boundary.intersects_segment(start.position(), end.position())? {
                return Ok(Detection::Crossing {
                    segment_start,
                    start,
                    end,
                    point,
                });
            }
        }

        Ok(Detection::Miss)
    }
}

impl LandfallDetector for DetectionMethod {
    fn method(&self) -> DetectionMethod {
        *self
    }

    fn detect(
        &self,
        fixes: &[Fix],
        boundary: &dyn RegionBoundary,
    ) -> Result<Detection, DetectError> {
        match self {
            Self::Point => PointMethod.detect(fixes, boundary),
            Self::Line => LineMethod.detect(fixes, boundary),
        }
    }
}

const fn ensure_fixes(method: DetectionMethod, fixes: &[Fix]) -> Result<(), DetectError> {
    let required = method.required_fixes();
    if fixes.len() < required {
        return Err(DetectError::MalformedTrack {
            method,
            required,
            actual: fixes.len(),
        });
    }
    Ok(())
}
