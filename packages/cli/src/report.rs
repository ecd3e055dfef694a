//! Landfall report rendering.

use std::io::Write;

use chrono::SecondsFormat;
use clap::ValueEnum;
use landfall_analysis_models::{AnalysisOutcome, LandfallResult};
use serde::Serialize;

/// Output format for the landfall report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Aligned text table.
    #[default]
    Table,
    Csv,
    Json,
}

impl ReportFormat {
    pub const ALL: &[Self] = &[Self::Table, Self::Csv, Self::Json];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

/// Errors writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One landfall as a flat CSV record.
#[derive(Debug, Serialize)]
struct LandfallRow<'a> {
    id: &'a str,
    name: &'a str,
    year: i32,
    max_wind_kt: Option<u16>,
    landfall_time: Option<String>,
    landfall_lon: Option<f64>,
    landfall_lat: Option<f64>,
}

impl<'a> From<&'a LandfallResult> for LandfallRow<'a> {
    fn from(result: &'a LandfallResult) -> Self {
        Self {
            id: &result.storm_id,
            name: &result.name,
            year: result.year,
            max_wind_kt: result.max_wind_speed,
            landfall_time: result
                .landfall_time()
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            landfall_lon: result.landfall_point().map(|p| p.lon),
            landfall_lat: result.landfall_point().map(|p| p.lat),
        }
    }
}

/// Writes the target-class landfalls of `outcome` to `out`.
///
/// # Errors
///
/// Returns [`ReportError`] if writing or serialization fails.
pub fn render(
    outcome: &AnalysisOutcome,
    format: ReportFormat,
    out: &mut dyn Write,
) -> Result<(), ReportError> {
    let landfalls: Vec<&LandfallResult> = outcome.landfalls().collect();

    match format {
        ReportFormat::Table => render_table(outcome, &landfalls, out)?,
        ReportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for result in &landfalls {
                writer.serialize(LandfallRow::from(*result))?;
            }
            writer.flush()?;
        }
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &landfalls)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn render_table(
    outcome: &AnalysisOutcome,
    landfalls: &[&LandfallResult],
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<12} {:>4} {:>7} {:<17} {:>9} {:>8}",
        "ID", "NAME", "YEAR", "WIND KT", "LANDFALL (UTC)", "LON", "LAT"
    )?;
    writeln!(out, "{}", "-".repeat(72))?;

    for result in landfalls {
        let wind = result
            .max_wind_speed
            .map_or_else(|| "-".to_string(), |w| w.to_string());
        let time = result
            .landfall_time()
            .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        let (lon, lat) = result
            .landfall_point()
            .map_or_else(
                || ("-".to_string(), "-".to_string()),
                |p| (format!("{:.3}", p.lon), format!("{:.3}", p.lat)),
            );

        writeln!(
            out,
            "{:<10} {:<12} {:>4} {:>7} {:<17} {:>9} {:>8}",
            result.storm_id, result.name, result.year, wind, time, lon, lat
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} landfalls among {} storms analyzed ({} outside year range)",
        landfalls.len(),
        outcome.results.len(),
        outcome.excluded_by_year
    )?;

    for failure in &outcome.failures {
        writeln!(
            out,
            "FAILED {} {}: {}",
            failure.storm_id, failure.name, failure.message
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use landfall_analysis_models::{
        CrossingKind, DetectionMethod, LandfallCrossing, StormFailure,
    };
    use landfall_track_models::Position;

    use super::*;

    fn result(id: &str, name: &str, landfall: Option<(f64, f64)>) -> LandfallResult {
        LandfallResult {
            storm_id: id.to_string(),
            name: name.to_string(),
            year: 1975,
            is_classified_as_target: true,
            method: DetectionMethod::Line,
            made_landfall: landfall.is_some(),
            landfall: landfall.map(|(lon, lat)| LandfallCrossing {
                point: Position::new(lon, lat),
                time: Utc.with_ymd_and_hms(1975, 9, 23, 12, 30, 0).unwrap(),
                kind: CrossingKind::Interpolated { segment_start: 4 },
            }),
            max_wind_speed: Some(110),
            min_pressure: Some(955),
            warnings: vec![],
        }
    }

    fn outcome() -> AnalysisOutcome {
        AnalysisOutcome {
            results: vec![
                result("AL051975", "ELOISE", Some((-86.25, 30.25))),
                result("AL061975", "FAYE", None),
            ],
            failures: vec![StormFailure {
                storm_id: "AL071975".to_string(),
                name: "GLADYS".to_string(),
                message: "boundary query failed".to_string(),
            }],
            excluded_by_year: 3,
        }
    }

    fn rendered(format: ReportFormat) -> String {
        let mut buf = Vec::new();
        render(&outcome(), format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn table_lists_landfalls_and_summary() {
        let table = rendered(ReportFormat::Table);

        assert!(table.contains("ELOISE"));
        assert!(table.contains("1975-09-23 12:30"));
        assert!(table.contains("-86.250"));
        assert!(!table.contains("FAYE"));
        assert!(table.contains("1 landfalls among 2 storms analyzed (3 outside year range)"));
        assert!(table.contains("FAILED AL071975 GLADYS"));
    }

    #[test]
    fn csv_has_header_and_one_row_per_landfall() {
        let csv = rendered(ReportFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "id,name,year,max_wind_kt,landfall_time,landfall_lon,landfall_lat"
        );
        assert_eq!(
            lines[1],
            "AL051975,ELOISE,1975,110,1975-09-23T12:30:00Z,-86.25,30.25"
        );
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn json_is_an_array_of_results() {
        let json: serde_json::Value = serde_json::from_str(&rendered(ReportFormat::Json)).unwrap();
        let array = json.as_array().unwrap();

        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["stormId"], "AL051975");
        assert_eq!(array[0]["landfall"]["segmentStart"], 4);
    }
}
