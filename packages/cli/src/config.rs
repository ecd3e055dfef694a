//! Analysis settings from flags and an optional TOML file.
//!
//! A settings file holds any subset of:
//!
//! ```toml
//! method = "line"
//! min_year = 1950
//! max_year = 2022
//! target_status = "HU"
//! ```
//!
//! Flags given on the command line override values from the file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use landfall_analysis_models::{AnalysisConfig, ConfigError, DetectionMethod};
use landfall_track_models::StormStatus;

/// Errors resolving analysis settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// The resolved settings are inconsistent.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Flags shared by every command that runs an analysis.
#[derive(Debug, Default, Args)]
pub struct AnalysisArgs {
    /// Landfall detection method: `point` or `line`
    #[arg(long, value_parser = parse_method)]
    pub method: Option<DetectionMethod>,
    /// First season year to include (default 1900)
    #[arg(long, allow_negative_numbers = true)]
    pub min_year: Option<i32>,
    /// Last season year to include (default: latest year in the dataset)
    #[arg(long, allow_negative_numbers = true)]
    pub max_year: Option<i32>,
    /// Classification a storm must reach, as a HURDAT2 status code (e.g. `HU`)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<StormStatus>,
    /// TOML file with analysis settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip malformed storms in the dataset instead of aborting
    #[arg(long)]
    pub lenient: bool,
}

impl AnalysisArgs {
    /// Loads the settings file (if any), applies flag overrides, and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] if the file cannot be read or parsed, or
    /// the resulting year range is invalid.
    pub fn resolve(&self) -> Result<AnalysisConfig, SettingsError> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => AnalysisConfig::default(),
        };

        let config = self.apply(base);
        config.validate()?;

        Ok(config)
    }

    fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(min_year) = self.min_year {
            config.min_year = min_year;
        }
        if let Some(max_year) = self.max_year {
            config.max_year = Some(max_year);
        }
        if let Some(status) = self.status {
            config.target_status = status;
        }
        config
    }
}

/// Reads a TOML settings file.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] or [`SettingsError::Toml`].
pub fn load_config(path: &Path) -> Result<AnalysisConfig, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Parses TOML settings. Missing keys keep their defaults.
///
/// # Errors
///
/// Returns [`SettingsError::Toml`] on malformed input or unknown keys.
pub fn parse_config(contents: &str) -> Result<AnalysisConfig, SettingsError> {
    Ok(toml::de::from_str(contents)?)
}

fn parse_method(s: &str) -> Result<DetectionMethod, String> {
    DetectionMethod::from_str(s).map_err(|_| {
        let valid: Vec<&str> = DetectionMethod::all().iter().map(AsRef::as_ref).collect();
        format!("unknown method '{s}' (expected one of: {})", valid.join(", "))
    })
}

fn parse_status(s: &str) -> Result<StormStatus, String> {
    StormStatus::from_str(s).map_err(|_| {
        let valid: Vec<&str> = StormStatus::all().iter().map(AsRef::as_ref).collect();
        format!("unknown status '{s}' (expected one of: {})", valid.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = parse_config(
            r#"
            method = "line"
            min_year = 1950
            max_year = 2022
            target_status = "TS"
            "#,
        )
        .unwrap();

        assert_eq!(config.method, DetectionMethod::Line);
        assert_eq!(config.min_year, 1950);
        assert_eq!(config.max_year, Some(2022));
        assert_eq!(config.target_status, StormStatus::TropicalStorm);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let config = parse_config("method = \"line\"").unwrap();
        assert_eq!(config.min_year, 1900);
        assert_eq!(config.max_year, None);
        assert_eq!(config.target_status, StormStatus::Hurricane);

        assert_eq!(parse_config("").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            parse_config("methd = \"line\""),
            Err(SettingsError::Toml(_))
        ));
        assert!(matches!(
            parse_config("method = \"spline\""),
            Err(SettingsError::Toml(_))
        ));
    }

    #[test]
    fn flags_override_file_values() {
        let file = parse_config("method = \"line\"\nmin_year = 1950").unwrap();
        let args = AnalysisArgs {
            min_year: Some(1975),
            status: Some(StormStatus::TropicalStorm),
            ..AnalysisArgs::default()
        };

        let config = args.apply(file);
        assert_eq!(config.method, DetectionMethod::Line);
        assert_eq!(config.min_year, 1975);
        assert_eq!(config.target_status, StormStatus::TropicalStorm);
    }

    #[test]
    fn resolve_validates_years() {
        let args = AnalysisArgs {
            min_year: Some(2000),
            max_year: Some(1990),
            ..AnalysisArgs::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(SettingsError::Invalid(ConfigError::InvertedYearRange { .. }))
        ));

        let negative = AnalysisArgs {
            min_year: Some(-1),
            ..AnalysisArgs::default()
        };
        assert!(matches!(
            negative.resolve(),
            Err(SettingsError::Invalid(ConfigError::NegativeYear { year: -1 }))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let args = AnalysisArgs {
            config: Some(PathBuf::from("/nonexistent/landfall.toml")),
            ..AnalysisArgs::default()
        };
        assert!(matches!(args.resolve(), Err(SettingsError::Io { .. })));
    }

    #[test]
    fn flag_values_parse_case_insensitively() {
        assert_eq!(parse_method("Line"), Ok(DetectionMethod::Line));
        assert_eq!(parse_status("hu"), Ok(StormStatus::Hurricane));

        let err = parse_method("spline").unwrap_err();
        assert!(err.contains("point, line"));
    }
}
