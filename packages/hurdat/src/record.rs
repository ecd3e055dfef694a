//! Line-level parsing of HURDAT2 header and data records.
//!
//! Header lines look like:
//!
//! ```text
//! AL051975,             ELOISE,     37,
//! ```
//!
//! and data lines like:
//!
//! ```text
//! 19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955, ...
//! ```
//!
//! Wind radii columns after the pressure are ignored.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use landfall_track_models::{Fix, RecordIdentifier, StormStatus};

/// HURDAT2 sentinel for a missing maximum sustained wind.
pub const MISSING_WIND: i32 = -99;

/// HURDAT2 sentinel for a missing minimum central pressure.
pub const MISSING_PRESSURE: i32 = -999;

/// A parsed storm header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Full storm code (e.g. `"AL051975"`).
    pub code: String,
    /// Basin prefix (e.g. `"AL"`).
    pub basin: String,
    /// Cyclone number within the season.
    pub cyclone_number: u8,
    /// Season year encoded in the storm code.
    pub year: i32,
    /// Storm name, `"UNNAMED"` for most pre-1950 storms.
    pub name: String,
    /// Number of data lines that follow.
    pub fix_count: usize,
}

/// Problems found in a single header or data line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The line has fewer comma-separated columns than required.
    #[error("expected at least {expected} {kind} fields, found {found}")]
    TooFewFields {
        /// `"header"` or `"data"`.
        kind: &'static str,
        /// Minimum column count.
        expected: usize,
        /// Columns present.
        found: usize,
    },

    /// The storm code is not two letters followed by six digits.
    #[error("invalid storm code '{0}'")]
    InvalidStormCode(String),

    /// The fix count column is not a non-negative integer.
    #[error("invalid fix count '{0}'")]
    InvalidFixCount(String),

    /// The date column is not `YYYYMMDD`.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// The time column is not `HHMM`.
    #[error("invalid time '{0}'")]
    InvalidTime(String),

    /// Date and time are well-formed but name no real instant.
    #[error("out-of-range date/time '{date} {time}'")]
    TimestampOutOfRange {
        /// Date column.
        date: String,
        /// Time column.
        time: String,
    },

    /// The record identifier column holds an unknown code.
    #[error("unknown record identifier '{0}'")]
    UnknownRecordIdentifier(String),

    /// The status column holds an unknown code.
    #[error("unknown status code '{0}'")]
    UnknownStatus(String),

    /// A coordinate is empty, lacks its hemisphere letter, or is not a number.
    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),

    /// A coordinate exceeds the limit for its axis.
    #[error("coordinate '{0}' out of range")]
    CoordinateOutOfRange(String),

    /// A wind or pressure column is not an integer.
    #[error("invalid {what} '{value}'")]
    InvalidMeasurement {
        /// `"wind speed"` or `"pressure"`.
        what: &'static str,
        /// Column text.
        value: String,
    },

    /// A wind or pressure value is negative (and not the sentinel) or too
    /// large.
    #[error("{what} '{value}' out of range")]
    MeasurementOutOfRange {
        /// `"wind speed"` or `"pressure"`.
        what: &'static str,
        /// Column text.
        value: String,
    },
}

/// Returns `true` if the line starts with a storm code (two letters then
/// six digits), which is how header lines are told apart from data lines.
#[must_use]
pub fn looks_like_header(line: &str) -> bool {
    let code = line.split(',').next().unwrap_or_default().trim();
    code.len() == 8
        && code.is_ascii()
        && code[..2].chars().all(|c| c.is_ascii_alphabetic())
        && code[2..].chars().all(|c| c.is_ascii_digit())
}

/// Parses a header line.
///
/// # Errors
///
/// Returns a [`RecordError`] if the line is not a well-formed header.
pub fn parse_header(line: &str) -> Result<Header, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(RecordError::TooFewFields {
            kind: "header",
            expected: 3,
            found: fields.len(),
        });
    }

    let code = fields[0];
    if !looks_like_header(code) {
        return Err(RecordError::InvalidStormCode(code.to_string()));
    }

    let invalid_code = || RecordError::InvalidStormCode(code.to_string());
    let cyclone_number = code[2..4].parse::<u8>().map_err(|_| invalid_code())?;
    let year = code[4..8].parse::<i32>().map_err(|_| invalid_code())?;
    let fix_count = fields[2]
        .parse::<usize>()
        .map_err(|_| RecordError::InvalidFixCount(fields[2].to_string()))?;

    Ok(Header {
        code: code.to_string(),
        basin: code[..2].to_string(),
        cyclone_number,
        year,
        name: fields[1].to_string(),
        fix_count,
    })
}

/// Parses a data line into a [`Fix`].
///
/// # Errors
///
/// Returns a [`RecordError`] if any required column is missing or
/// malformed.
pub fn parse_fix(line: &str) -> Result<Fix, RecordError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 7 {
        return Err(RecordError::TooFewFields {
            kind: "data",
            expected: 7,
            found: fields.len(),
        });
    }

    let timestamp = parse_timestamp(fields[0], fields[1])?;

    let record_identifier = if fields[2].is_empty() {
        None
    } else {
        Some(
            RecordIdentifier::from_str(fields[2])
                .map_err(|_| RecordError::UnknownRecordIdentifier(fields[2].to_string()))?,
        )
    };

    let status = StormStatus::from_str(fields[3])
        .map_err(|_| RecordError::UnknownStatus(fields[3].to_string()))?;

    let latitude = parse_coordinate(fields[4], 'N', 'S', 90.0)?;
    let longitude = parse_coordinate(fields[5], 'E', 'W', 360.0)?;

    let wind_speed = parse_measurement(fields[6], MISSING_WIND, "wind speed")?;
    let min_pressure = match fields.get(7) {
        Some(field) if !field.is_empty() => {
            parse_measurement(field, MISSING_PRESSURE, "pressure")?
        }
        _ => None,
    };

    Ok(Fix::new(timestamp, longitude, latitude, status)
        .with_wind_speed(wind_speed)
        .with_min_pressure(min_pressure)
        .with_record_identifier(record_identifier))
}

/// Parses `YYYYMMDD` and `HHMM` columns into a UTC timestamp.
fn parse_timestamp(date: &str, time: &str) -> Result<DateTime<Utc>, RecordError> {
    if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecordError::InvalidDate(date.to_string()));
    }
    if time.len() != 4 || !time.chars().all(|c| c.is_ascii_digit()) {
        return Err(RecordError::InvalidTime(time.to_string()));
    }

    let invalid_date = || RecordError::InvalidDate(date.to_string());
    let invalid_time = || RecordError::InvalidTime(time.to_string());
    let year = date[..4].parse::<i32>().map_err(|_| invalid_date())?;
    let month = date[4..6].parse::<u32>().map_err(|_| invalid_date())?;
    let day = date[6..].parse::<u32>().map_err(|_| invalid_date())?;
    let hour = time[..2].parse::<u32>().map_err(|_| invalid_time())?;
    let minute = time[2..].parse::<u32>().map_err(|_| invalid_time())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RecordError::TimestampOutOfRange {
            date: date.to_string(),
            time: time.to_string(),
        })
}

/// Parses a hemisphere-suffixed coordinate such as `"28.0N"` or `"94.8W"`.
///
/// The negative hemisphere flips the sign.
fn parse_coordinate(
    field: &str,
    positive: char,
    negative: char,
    limit: f64,
) -> Result<f64, RecordError> {
    let invalid = || RecordError::InvalidCoordinate(field.to_string());

    let hemisphere = field.chars().last().ok_or_else(invalid)?;
    let sign = match hemisphere.to_ascii_uppercase() {
        c if c == positive => 1.0,
        c if c == negative => -1.0,
        _ => return Err(invalid()),
    };

    let degrees = field[..field.len() - hemisphere.len_utf8()]
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid())?;

    if !degrees.is_finite() || !(0.0..=limit).contains(&degrees) {
        return Err(RecordError::CoordinateOutOfRange(field.to_string()));
    }

    Ok(sign * degrees)
}

/// Parses a non-negative integer column where `sentinel` means missing.
fn parse_measurement(
    field: &str,
    sentinel: i32,
    what: &'static str,
) -> Result<Option<u16>, RecordError> {
    let value = field
        .parse::<i32>()
        .map_err(|_| RecordError::InvalidMeasurement {
            what,
            value: field.to_string(),
        })?;

    if value == sentinel {
        return Ok(None);
    }

    u16::try_from(value)
        .map(Some)
        .map_err(|_| RecordError::MeasurementOutOfRange {
            what,
            value: field.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn parses_header() {
        let header = parse_header("AL051975,             ELOISE,     37,").unwrap();
        assert_eq!(header.code, "AL051975");
        assert_eq!(header.basin, "AL");
        assert_eq!(header.cyclone_number, 5);
        assert_eq!(header.year, 1975);
        assert_eq!(header.name, "ELOISE");
        assert_eq!(header.fix_count, 37);
    }

    #[test]
    fn rejects_header_with_bad_count() {
        assert_eq!(
            parse_header("AL051975, ELOISE, lots,"),
            Err(RecordError::InvalidFixCount("lots".to_string()))
        );
    }

    #[test]
    fn rejects_short_header() {
        assert_eq!(
            parse_header("AL051975, ELOISE"),
            Err(RecordError::TooFewFields {
                kind: "header",
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn distinguishes_headers_from_data() {
        assert!(looks_like_header("AL011851,            UNNAMED,     14,"));
        assert!(!looks_like_header(
            "18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,"
        ));
        assert!(!looks_like_header(""));
    }

    #[test]
    fn parses_data_line() {
        let fix = parse_fix(
            "19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955,  150,  120,   60,  100,",
        )
        .unwrap();
        assert_eq!(
            fix.timestamp,
            Utc.with_ymd_and_hms(1975, 9, 23, 12, 0, 0).unwrap()
        );
        assert_eq!(fix.record_identifier, Some(RecordIdentifier::Landfall));
        assert_eq!(fix.status, StormStatus::Hurricane);
        assert!((fix.latitude - 30.2).abs() < f64::EPSILON);
        assert!((fix.longitude - -86.3).abs() < f64::EPSILON);
        assert_eq!(fix.wind_speed, Some(110));
        assert_eq!(fix.min_pressure, Some(955));
    }

    #[test]
    fn maps_sentinels_to_missing() {
        let fix = parse_fix("18510625, 0000,  , HU, 28.0N,  94.8W, -99, -999,").unwrap();
        assert_eq!(fix.record_identifier, None);
        assert_eq!(fix.wind_speed, None);
        assert_eq!(fix.min_pressure, None);
    }

    #[test]
    fn southern_and_eastern_hemispheres() {
        let fix = parse_fix("20040328, 0000,  , HU, 28.2S,  48.0E,  85, -999,").unwrap();
        assert!((fix.latitude - -28.2).abs() < f64::EPSILON);
        assert!((fix.longitude - 48.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pressure_column_is_optional() {
        let fix = parse_fix("18510625, 0000,  , HU, 28.0N,  94.8W,  80").unwrap();
        assert_eq!(fix.wind_speed, Some(80));
        assert_eq!(fix.min_pressure, None);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = parse_fix("18510625, 0000,  , ZZ, 28.0N,  94.8W,  80, -999,").unwrap_err();
        assert_eq!(err, RecordError::UnknownStatus("ZZ".to_string()));
        assert_eq!(err.to_string(), "unknown status code 'ZZ'");
    }

    #[test]
    fn rejects_coordinate_without_hemisphere() {
        assert_eq!(
            parse_fix("18510625, 0000,  , HU, 28.0,  94.8W,  80, -999,"),
            Err(RecordError::InvalidCoordinate("28.0".to_string()))
        );
    }

    #[test]
    fn rejects_latitude_past_the_pole() {
        assert_eq!(
            parse_fix("18510625, 0000,  , HU, 91.0N,  94.8W,  80, -999,"),
            Err(RecordError::CoordinateOutOfRange("91.0N".to_string()))
        );
    }

    #[test]
    fn rejects_negative_wind_that_is_not_the_sentinel() {
        assert_eq!(
            parse_fix("18510625, 0000,  , HU, 28.0N,  94.8W,  -5, -999,"),
            Err(RecordError::MeasurementOutOfRange {
                what: "wind speed",
                value: "-5".to_string(),
            })
        );
    }

    #[test]
    fn rejects_impossible_date() {
        assert!(matches!(
            parse_fix("18510231, 0000,  , HU, 28.0N,  94.8W,  80, -999,"),
            Err(RecordError::TimestampOutOfRange { .. })
        ));
    }
}
