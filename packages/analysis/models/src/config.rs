//! Caller-supplied analysis settings.

use landfall_track_models::StormStatus;
use serde::{Deserialize, Serialize};

use crate::DetectionMethod;

/// Default lower bound of the year filter.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Invalid analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A year bound is negative.
    #[error("Year cannot be negative: {year}")]
    NegativeYear {
        /// The offending year.
        year: i32,
    },

    /// The year range is inverted.
    #[error("Minimum year {min_year} is greater than maximum year {max_year}")]
    InvertedYearRange {
        /// Lower bound.
        min_year: i32,
        /// Upper bound.
        max_year: i32,
    },
}

/// What to analyze and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Landfall detection strategy.
    pub method: DetectionMethod,
    /// Inclusive lower bound of the season year filter.
    pub min_year: i32,
    /// Inclusive upper bound of the season year filter. `None` means the
    /// latest year present in the dataset.
    pub max_year: Option<i32>,
    /// Classification a storm must reach at least once to be a target.
    pub target_status: StormStatus,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            method: DetectionMethod::default(),
            min_year: DEFAULT_MIN_YEAR,
            max_year: None,
            target_status: StormStatus::Hurricane,
        }
    }
}

impl AnalysisConfig {
    /// Checks year bounds.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NegativeYear`] if either bound is negative.
    /// * [`ConfigError::InvertedYearRange`] if `min_year > max_year`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_year < 0 {
            return Err(ConfigError::NegativeYear {
                year: self.min_year,
            });
        }
        if let Some(max_year) = self.max_year {
            if max_year < 0 {
                return Err(ConfigError::NegativeYear { year: max_year });
            }
            if self.min_year > max_year {
                return Err(ConfigError::InvertedYearRange {
                    min_year: self.min_year,
                    max_year,
                });
            }
        }
        Ok(())
    }

    /// The inclusive year range, resolving an open upper bound to
    /// `latest_year` (or `i32::MAX` for an empty dataset).
    #[must_use]
    pub fn year_range(&self, latest_year: Option<i32>) -> (i32, i32) {
        let max_year = self
            .max_year
            .or(latest_year)
            .unwrap_or(i32::MAX);
        (self.min_year, max_year)
    }
}
