//! Command implementations shared by the flag-driven and interactive
//! front ends.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use landfall_analysis::{analyze_track, driver::TrackOutcome};
use landfall_analysis_models::AnalysisConfig;
use landfall_boundary::GeoBoundary;
use landfall_cli_utils::{IndicatifProgress, MultiProgress};
use landfall_hurdat::ParseMode;
use landfall_track_models::StormDataset;

use crate::export::trace_collection;
use crate::report::{self, ReportFormat};

/// Loads a HURDAT2 file, logging any storms skipped in lenient mode.
///
/// # Errors
///
/// Returns an error if the file cannot be read or, in strict mode,
/// contains a malformed storm.
pub fn load_dataset(path: &Path, lenient: bool) -> Result<StormDataset, Box<dyn std::error::Error>> {
    let mode = if lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };

    let parsed = landfall_hurdat::load_file(path, mode)?;
    if !parsed.rejected.is_empty() {
        log::warn!(
            "Skipped {} malformed storm(s) in {}",
            parsed.rejected.len(),
            path.display()
        );
    }

    log::info!(
        "Loaded {} storms from {}",
        parsed.dataset.len(),
        path.display()
    );

    Ok(parsed.dataset)
}

/// Loads a `GeoJSON` region boundary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no usable polygon.
pub fn load_boundary(path: &Path) -> Result<GeoBoundary, Box<dyn std::error::Error>> {
    Ok(GeoBoundary::load(path)?)
}

/// Runs the analysis and writes the landfall report.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the report cannot be
/// written.
pub fn analyze(
    multi: &MultiProgress,
    dataset: &StormDataset,
    boundary: &GeoBoundary,
    config: &AnalysisConfig,
    parallel: bool,
    format: ReportFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::storms_bar(multi, "Analyzing storms");

    let outcome = if parallel {
        landfall_analysis::run_parallel(dataset, boundary, config, Some(progress))?
    } else {
        landfall_analysis::run(dataset, boundary, config, Some(progress))?
    };

    let mut out = open_output(output)?;
    report::render(&outcome, format, &mut out)?;
    out.flush()?;

    if let Some(path) = output {
        log::info!("Wrote report to {}", path.display());
    }

    Ok(())
}

/// Analyzes one storm and writes its path and landfall as `GeoJSON`.
///
/// The year filter does not apply here; the named storm is always traced.
///
/// # Errors
///
/// Returns an error if the storm is not in the dataset, a boundary query
/// fails, or the output cannot be written.
pub fn trace(
    dataset: &StormDataset,
    boundary: &GeoBoundary,
    config: &AnalysisConfig,
    storm_id: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let track = dataset
        .get(storm_id)
        .ok_or_else(|| format!("Storm {storm_id} not found in dataset"))?;

    let years = (track.year(), track.year());
    let result = match analyze_track(track, boundary, config, years) {
        TrackOutcome::Analyzed(result) => Some(result),
        TrackOutcome::Failed(failure) => return Err(failure.message.into()),
        TrackOutcome::ExcludedByYear => None,
    };

    match result.as_ref().and_then(|r| r.landfall) {
        Some(crossing) => log::info!(
            "{}: landfall at ({:.3}, {:.3}) {}",
            track.label(),
            crossing.point.lon,
            crossing.point.lat,
            crossing.time
        ),
        None => log::info!("{}: no landfall ({} method)", track.label(), config.method),
    }

    let trace = landfall_analysis::trace(track, result.as_ref());
    let collection = trace_collection(&trace, boundary.bounds());

    let mut out = open_output(output)?;
    serde_json::to_writer_pretty(&mut out, &collection)?;
    writeln!(out)?;
    out.flush()?;

    if let Some(path) = output {
        log::info!("Wrote trace to {}", path.display());
    }

    Ok(())
}

/// Prints a table of storms, optionally restricted to one season.
pub fn list_storms(dataset: &StormDataset, year: Option<i32>) {
    println!("{:<10} {:<12} {:>4} {:>5} {:>8}", "ID", "NAME", "YEAR", "FIXES", "PEAK KT");
    println!("{}", "-".repeat(43));

    for track in dataset
        .iter()
        .filter(|track| year.is_none_or(|y| track.year() == y))
    {
        let peak = landfall_analysis::intensity::max_wind_speed(track.fixes())
            .map_or_else(|| "-".to_string(), |w| w.to_string());
        println!(
            "{:<10} {:<12} {:>4} {:>5} {:>8}",
            track.id(),
            track.name(),
            track.year(),
            track.fixes().len(),
            peak
        );
    }
}

fn open_output(path: Option<&Path>) -> std::io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    })
}
