#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hurricane landfall analysis over HURDAT2 best-track data.
//!
//! Run with a subcommand for scripted use, or without one for an
//! interactive menu. Uses `indicatif-log-bridge` (via
//! [`landfall_cli_utils::init_logger`]) so that log lines and the progress
//! bar never fight for the terminal.

mod commands;
mod config;
mod export;
mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AnalysisArgs;
use crate::report::ReportFormat;

#[derive(Parser)]
#[command(name = "landfall", about = "Hurricane landfall analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect landfalls for every storm in a dataset and print a report
    Analyze {
        /// HURDAT2 best-track file
        dataset: PathBuf,
        /// `GeoJSON` file with the region boundary
        boundary: PathBuf,
        #[command(flatten)]
        options: AnalysisArgs,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Spread storms over all CPU cores
        #[arg(long)]
        parallel: bool,
    },
    /// Export one storm's path and landfall as `GeoJSON` for plotting
    Trace {
        /// HURDAT2 best-track file
        dataset: PathBuf,
        /// `GeoJSON` file with the region boundary
        boundary: PathBuf,
        /// Storm identifier (e.g. `AL051975`)
        storm_id: String,
        #[command(flatten)]
        options: AnalysisArgs,
        /// Write the `GeoJSON` to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the storms in a dataset
    Storms {
        /// HURDAT2 best-track file
        dataset: PathBuf,
        /// Only list storms from this season
        #[arg(long)]
        year: Option<i32>,
        /// Skip malformed storms instead of aborting
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = landfall_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Hurricane Landfall Analysis");
        println!();
        return interactive::run(&multi);
    };

    match command {
        Commands::Analyze {
            dataset,
            boundary,
            options,
            format,
            output,
            parallel,
        } => {
            let config = options.resolve()?;
            let dataset = commands::load_dataset(&dataset, options.lenient)?;
            let boundary = commands::load_boundary(&boundary)?;
            commands::analyze(
                &multi,
                &dataset,
                &boundary,
                &config,
                parallel,
                format,
                output.as_deref(),
            )?;
        }
        Commands::Trace {
            dataset,
            boundary,
            storm_id,
            options,
            output,
        } => {
            let config = options.resolve()?;
            let dataset = commands::load_dataset(&dataset, options.lenient)?;
            let boundary = commands::load_boundary(&boundary)?;
            commands::trace(&dataset, &boundary, &config, &storm_id, output.as_deref())?;
        }
        Commands::Storms {
            dataset,
            year,
            lenient,
        } => {
            let dataset = commands::load_dataset(&dataset, lenient)?;
            commands::list_storms(&dataset, year);
        }
    }

    Ok(())
}
