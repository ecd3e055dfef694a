//! Peak intensity over a track.
//!
//! Missing measurements are skipped. When nothing was recorded the scan
//! yields `None` rather than a zero that would read as a calm storm.

use landfall_track_models::Fix;

/// Highest sustained wind (knots) across `fixes`.
#[must_use]
pub fn max_wind_speed(fixes: &[Fix]) -> Option<u16> {
    fixes.iter().filter_map(|fix| fix.wind_speed).max()
}

/// Lowest central pressure (millibars) across `fixes`.
#[must_use]
pub fn min_pressure(fixes: &[Fix]) -> Option<u16> {
    fixes.iter().filter_map(|fix| fix.min_pressure).min()
}
