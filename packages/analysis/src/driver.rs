//! Runs the analysis pipeline over a whole dataset.
//!
//! Each storm goes through the classification filter, the year filter,
//! landfall detection, crossing-time estimation and the intensity scan, in
//! that order. Storms are independent of each other, so a failure on one
//! storm is recorded and the run moves on.

use std::sync::Arc;

use landfall_analysis_models::{
    AnalysisConfig, AnalysisOutcome, AnalysisWarning, ConfigError, LandfallResult, PathTrace,
    StormFailure, TracePoint,
};
use landfall_boundary::RegionBoundary;
use landfall_track_models::{StormDataset, Track};
use rayon::prelude::*;

use crate::detect::{DetectError, Detection, LandfallDetector};
use crate::filters::{in_year_range, is_classified_as};
use crate::intensity::{max_wind_speed, min_pressure};
use crate::progress::{ProgressCallback, null_progress};

/// What happened to a single storm.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    /// Outside the configured year range; not analyzed.
    ExcludedByYear,
    /// Analyzed, with or without a landfall.
    Analyzed(LandfallResult),
    /// A boundary query failed for this storm.
    Failed(StormFailure),
}

/// Analyzes one storm against `boundary`.
///
/// `years` is the resolved inclusive year range (see
/// [`AnalysisConfig::year_range`]). Storms in range that never reach the
/// target classification still get a result, with detection skipped.
#[must_use]
pub fn analyze_track(
    track: &Track,
    boundary: &dyn RegionBoundary,
    config: &AnalysisConfig,
    years: (i32, i32),
) -> TrackOutcome {
    let (min_year, max_year) = years;
    if !in_year_range(track.year(), min_year, max_year) {
        return TrackOutcome::ExcludedByYear;
    }

    let fixes = track.fixes();
    let is_classified_as_target = is_classified_as(fixes, config.target_status);
    let mut warnings = Vec::new();

    let detection = if is_classified_as_target {
        match config.method.detect(fixes, boundary) {
            Ok(detection) => detection,
            Err(DetectError::MalformedTrack {
                method,
                required,
                actual,
            }) => {
                log::debug!("{}: {method} method skipped, {actual} fixes", track.id());
                warnings.push(AnalysisWarning::InsufficientFixes {
                    method,
                    required,
                    actual,
                });
                Detection::Miss
            }
            Err(DetectError::Boundary(e)) => {
                log::warn!("{} ({}): {e}", track.id(), track.label());
                return TrackOutcome::Failed(StormFailure {
                    storm_id: track.id().to_string(),
                    name: track.name().to_string(),
                    message: e.to_string(),
                });
            }
        }
    } else {
        Detection::Miss
    };

    let landfall = detection.into_crossing();
    if let Some(crossing) = &landfall {
        log::debug!(
            "{}: landfall at ({:.3}, {:.3}) {}",
            track.label(),
            crossing.point.lon,
            crossing.point.lat,
            crossing.time
        );
    }

    let max_wind_speed = max_wind_speed(fixes);
    if max_wind_speed.is_none() {
        warnings.push(AnalysisWarning::MissingIntensityData);
    }

    TrackOutcome::Analyzed(LandfallResult {
        storm_id: track.id().to_string(),
        name: track.name().to_string(),
        year: track.year(),
        is_classified_as_target,
        method: config.method,
        made_landfall: landfall.is_some(),
        landfall,
        max_wind_speed,
        min_pressure: min_pressure(fixes),
        warnings,
    })
}

/// Analyzes every storm in `dataset`, one after another.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation. Nothing is
/// analyzed in that case.
pub fn run(
    dataset: &StormDataset,
    boundary: &dyn RegionBoundary,
    config: &AnalysisConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<AnalysisOutcome, ConfigError> {
    let years = prepare(dataset, config)?;
    let progress = progress.unwrap_or_else(null_progress);
    start(progress.as_ref(), dataset, config, years);

    let outcomes = dataset
        .iter()
        .map(|track| {
            let outcome = analyze_track(track, boundary, config, years);
            progress.inc(1);
            outcome
        })
        .collect::<Vec<_>>();

    Ok(finish(outcomes, config, progress.as_ref()))
}

/// Like [`run`], but spreads storms over the global `rayon` pool.
///
/// Results come back in dataset order, so the outcome is identical to a
/// sequential run.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` fails validation.
pub fn run_parallel(
    dataset: &StormDataset,
    boundary: &dyn RegionBoundary,
    config: &AnalysisConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<AnalysisOutcome, ConfigError> {
    let years = prepare(dataset, config)?;
    let progress = progress.unwrap_or_else(null_progress);
    start(progress.as_ref(), dataset, config, years);

    let outcomes = dataset
        .tracks()
        .par_iter()
        .map(|track| {
            let outcome = analyze_track(track, boundary, config, years);
            progress.inc(1);
            outcome
        })
        .collect::<Vec<_>>();

    Ok(finish(outcomes, config, progress.as_ref()))
}

/// Plot-ready path for `track`, carrying the crossing from `result` when
/// it recorded one.
#[must_use]
pub fn trace(track: &Track, result: Option<&LandfallResult>) -> PathTrace {
    PathTrace {
        storm_id: track.id().to_string(),
        name: track.name().to_string(),
        year: track.year(),
        points: track
            .fixes()
            .iter()
            .map(|fix| TracePoint {
                lon: fix.longitude,
                lat: fix.latitude,
                time: fix.timestamp,
                status: fix.status,
                wind_speed: fix.wind_speed,
            })
            .collect(),
        landfall: result.and_then(|r| r.landfall),
    }
}

fn prepare(dataset: &StormDataset, config: &AnalysisConfig) -> Result<(i32, i32), ConfigError> {
    config.validate()?;
    let years = config.year_range(dataset.latest_year());

    log::info!(
        "Analyzing {} storms with the {} method, years {}..={}, target {}",
        dataset.len(),
        config.method,
        years.0,
        years.1,
        config.target_status
    );

    Ok(years)
}

fn start(
    progress: &dyn ProgressCallback,
    dataset: &StormDataset,
    config: &AnalysisConfig,
    years: (i32, i32),
) {
    progress.set_total(dataset.len() as u64);
    progress.set_message(format!(
        "{} method, {}..={}",
        config.method, years.0, years.1
    ));
}

fn finish(
    outcomes: Vec<TrackOutcome>,
    config: &AnalysisConfig,
    progress: &dyn ProgressCallback,
) -> AnalysisOutcome {
    let mut outcome = AnalysisOutcome::default();

    for track_outcome in outcomes {
        match track_outcome {
            TrackOutcome::ExcludedByYear => outcome.excluded_by_year += 1,
            TrackOutcome::Analyzed(result) => outcome.results.push(result),
            TrackOutcome::Failed(failure) => outcome.failures.push(failure),
        }
    }

    let summary = format!(
        "{} landfalls among {} storms ({} method), {} failed, {} outside year range",
        outcome.landfalls().count(),
        outcome.results.len(),
        config.method,
        outcome.failures.len(),
        outcome.excluded_by_year
    );
    log::info!("{summary}");
    progress.finish(summary);

    outcome
}
