//! Menu-driven front end using `dialoguer`, for running an analysis
//! without memorizing flags.

use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input, Select};
use landfall_analysis_models::{AnalysisConfig, DEFAULT_MIN_YEAR, DetectionMethod};
use landfall_cli_utils::MultiProgress;
use landfall_track_models::StormStatus;

use crate::commands;
use crate::report::ReportFormat;

/// Top-level actions in the interactive menu.
enum Action {
    Analyze,
    Trace,
    ListStorms,
}

impl Action {
    const ALL: &[Self] = &[Self::Analyze, Self::Trace, Self::ListStorms];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Analyze => "Analyze landfalls",
            Self::Trace => "Export a storm path (GeoJSON)",
            Self::ListStorms => "List storms",
        }
    }
}

/// Prompts for an action and its settings, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails, the inputs cannot be loaded, or the
/// chosen settings are invalid.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    let dataset_path = prompt_path("HURDAT2 dataset file")?;
    let lenient = Confirm::new()
        .with_prompt("Skip malformed storms instead of aborting?")
        .default(false)
        .interact()?;
    let dataset = commands::load_dataset(&dataset_path, lenient)?;

    match Action::ALL[idx] {
        Action::ListStorms => {
            let year = prompt_optional_i32("Season year (empty for all)")?;
            commands::list_storms(&dataset, year);
        }
        Action::Analyze => {
            let boundary = commands::load_boundary(&prompt_path("Boundary GeoJSON file")?)?;
            let config = prompt_config(dataset.latest_year())?;
            let parallel = Confirm::new()
                .with_prompt("Analyze storms in parallel?")
                .default(true)
                .interact()?;

            let format_labels: Vec<&str> =
                ReportFormat::ALL.iter().map(|f| f.label()).collect();
            let format_idx = Select::new()
                .with_prompt("Report format")
                .items(&format_labels)
                .default(0)
                .interact()?;
            let output = prompt_optional_path("Write report to (empty for stdout)")?;

            commands::analyze(
                multi,
                &dataset,
                &boundary,
                &config,
                parallel,
                ReportFormat::ALL[format_idx],
                output.as_deref(),
            )?;
        }
        Action::Trace => {
            let boundary = commands::load_boundary(&prompt_path("Boundary GeoJSON file")?)?;
            let storm_id: String = Input::new()
                .with_prompt("Storm id (e.g. AL051975)")
                .interact_text()?;
            let storm_id = storm_id.trim().to_uppercase();
            let method = prompt_method()?;
            let output: String = Input::new()
                .with_prompt("Write GeoJSON to")
                .default(format!("{storm_id}.geojson"))
                .interact_text()?;

            let config = AnalysisConfig {
                method,
                ..AnalysisConfig::default()
            };
            commands::trace(
                &dataset,
                &boundary,
                &config,
                &storm_id,
                Some(Path::new(output.trim())),
            )?;
        }
    }

    Ok(())
}

/// Prompts for method and year range. An empty maximum year means the
/// latest season in the dataset.
fn prompt_config(latest_year: Option<i32>) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let method = prompt_method()?;

    let min_year: i32 = Input::new()
        .with_prompt("Minimum year")
        .default(DEFAULT_MIN_YEAR)
        .interact_text()?;

    let max_prompt = latest_year.map_or_else(
        || "Maximum year (empty for no limit)".to_string(),
        |year| format!("Maximum year (empty for {year})"),
    );
    let max_year = prompt_optional_i32(&max_prompt)?;

    let statuses: Vec<String> = StormStatus::all()
        .iter()
        .map(|s| format!("{s} ({})", s.description()))
        .collect();
    let default_status = StormStatus::all()
        .iter()
        .position(|&s| s == StormStatus::Hurricane)
        .unwrap_or(0);
    let status_idx = Select::new()
        .with_prompt("Target classification")
        .items(&statuses)
        .default(default_status)
        .interact()?;

    let config = AnalysisConfig {
        method,
        min_year,
        max_year,
        target_status: StormStatus::all()[status_idx],
    };
    config.validate()?;

    Ok(config)
}

fn prompt_method() -> Result<DetectionMethod, Box<dyn std::error::Error>> {
    let labels: Vec<&str> = DetectionMethod::all().iter().map(|m| m.label()).collect();
    let idx = Select::new()
        .with_prompt("Detection method")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(DetectionMethod::all()[idx])
}

fn prompt_path(prompt: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let input: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(PathBuf::from(input.trim()))
}

fn prompt_optional_path(prompt: &str) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| PathBuf::from(input)))
}

fn prompt_optional_i32(prompt: &str) -> Result<Option<i32>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    if input.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.trim().parse()?))
    }
}
