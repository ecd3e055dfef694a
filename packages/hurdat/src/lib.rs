#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HURDAT2 best-track loader.
//!
//! Turns the line-oriented HURDAT2 text format into a validated
//! [`StormDataset`]. Every storm block is checked up front (header fields,
//! fix count, coordinates, status codes, timestamps) so that the analysis
//! never has to deal with half-parsed records.
//!
//! Two modes are supported:
//!
//! * [`ParseMode::Strict`] stops at the first malformed storm.
//! * [`ParseMode::Lenient`] skips malformed storms, resynchronizes at the
//!   next header line, and reports each skipped storm as a
//!   [`RejectedStorm`].

pub mod record;

use std::iter::Peekable;
use std::path::Path;

use landfall_track_models::{StormDataset, Track, TrackError};

use crate::record::{Header, RecordError, looks_like_header, parse_fix, parse_header};

/// Errors that can occur while loading HURDAT2 data.
#[derive(Debug, thiserror::Error)]
pub enum HurdatError {
    /// Reading the input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storm header line could not be parsed.
    #[error("Line {line}: malformed header: {source}")]
    Header {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        source: RecordError,
    },

    /// A data line could not be parsed.
    #[error("Line {line}: malformed fix for {storm_id}: {source}")]
    Fix {
        /// 1-based line number.
        line: usize,
        /// Storm the fix belongs to.
        storm_id: String,
        /// What was wrong with the line.
        source: RecordError,
    },

    /// The input ended (or a new header started) before all fixes announced
    /// by a header were read.
    #[error("Line {line}: storm {storm_id} announces {expected} fixes but only {found} follow")]
    Truncated {
        /// 1-based line number of the header.
        line: usize,
        /// Storm identifier.
        storm_id: String,
        /// Fix count from the header.
        expected: usize,
        /// Fixes actually present.
        found: usize,
    },

    /// The fixes of a storm violate a track invariant.
    #[error("Line {line}: {source}")]
    Track {
        /// 1-based line number of the header.
        line: usize,
        /// The violated invariant.
        source: TrackError,
    },

    /// The assembled dataset violates a dataset invariant.
    #[error("Dataset error: {0}")]
    Dataset(TrackError),
}

/// Upper bound on fixes reserved up front for one storm.
const MAX_RESERVED_FIXES: usize = 256;

/// How malformed storms are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort on the first malformed storm.
    #[default]
    Strict,
    /// Skip malformed storms and keep going.
    Lenient,
}

/// A storm block that was skipped in [`ParseMode::Lenient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedStorm {
    /// 1-based line number where the problem was found.
    pub line: usize,
    /// Storm code, if the header itself was readable.
    pub storm_id: Option<String>,
    /// Description of the problem.
    pub reason: String,
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    /// All well-formed storms in file order.
    pub dataset: StormDataset,
    /// Storms skipped in lenient mode. Always empty in strict mode.
    pub rejected: Vec<RejectedStorm>,
}

/// Reads and parses a HURDAT2 file.
///
/// # Errors
///
/// Returns [`HurdatError::Io`] if the file cannot be read, or any parse
/// error allowed to surface by `mode`.
pub fn load_file(path: &Path, mode: ParseMode) -> Result<ParsedDataset, HurdatError> {
    log::info!("Loading HURDAT2 data from {}", path.display());
    let input = std::fs::read_to_string(path)?;
    let parsed = parse_str(&input, mode)?;

    log::info!(
        "Loaded {} storms ({} rejected)",
        parsed.dataset.len(),
        parsed.rejected.len()
    );

    Ok(parsed)
}

/// Parses HURDAT2 text.
///
/// # Errors
///
/// In [`ParseMode::Strict`], returns the first header, fix, truncation or
/// track error. In both modes, returns [`HurdatError::Dataset`] if two
/// storms share an identifier.
pub fn parse_str(input: &str, mode: ParseMode) -> Result<ParsedDataset, HurdatError> {
    let mut lines = input.lines().enumerate().map(|(i, l)| (i + 1, l)).peekable();
    let mut tracks = Vec::new();
    let mut rejected = Vec::new();

    while let Some((line_no, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }

        let header = match parse_header(line) {
            Ok(header) => header,
            Err(source) => {
                let err = HurdatError::Header {
                    line: line_no,
                    source,
                };
                reject(mode, &mut rejected, line_no, None, err)?;
                skip_to_next_header(&mut lines);
                continue;
            }
        };

        match read_storm(&header, line_no, &mut lines) {
            Ok(track) => tracks.push(track),
            Err(err) => {
                let at = error_line(&err).unwrap_or(line_no);
                reject(mode, &mut rejected, at, Some(header.code.clone()), err)?;
                skip_to_next_header(&mut lines);
            }
        }
    }

    let dataset = StormDataset::new(tracks).map_err(HurdatError::Dataset)?;

    Ok(ParsedDataset { dataset, rejected })
}

/// Consumes the fix lines announced by `header` and assembles the track.
fn read_storm<'a, I>(
    header: &Header,
    header_line: usize,
    lines: &mut Peekable<I>,
) -> Result<Track, HurdatError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    // The announced count is untrusted; a short block fails as `Truncated`.
    let mut fixes = Vec::with_capacity(header.fix_count.min(MAX_RESERVED_FIXES));

    while fixes.len() < header.fix_count {
        let Some(&(line_no, line)) = lines.peek() else {
            break;
        };
        if looks_like_header(line) {
            break;
        }
        lines.next();

        if line.trim().is_empty() {
            continue;
        }

        let fix = parse_fix(line).map_err(|source| HurdatError::Fix {
            line: line_no,
            storm_id: header.code.clone(),
            source,
        })?;
        fixes.push(fix);
    }

    if fixes.len() < header.fix_count {
        return Err(HurdatError::Truncated {
            line: header_line,
            storm_id: header.code.clone(),
            expected: header.fix_count,
            found: fixes.len(),
        });
    }

    let track = Track::new(header.code.as_str(), header.name.as_str(), fixes)
        .map_err(|source| HurdatError::Track {
            line: header_line,
            source,
        })?
        .with_year(header.year)
        .with_designation(header.basin.as_str(), header.cyclone_number);

    log::trace!(
        "Parsed {} ({} fixes)",
        track.id(),
        track.fixes().len()
    );

    Ok(track)
}

/// Drops lines until the next header (or end of input).
fn skip_to_next_header<'a, I>(lines: &mut Peekable<I>)
where
    I: Iterator<Item = (usize, &'a str)>,
{
    while let Some(&(_, line)) = lines.peek() {
        if looks_like_header(line) {
            break;
        }
        lines.next();
    }
}

/// Records a rejected storm in lenient mode, or surfaces the error in
/// strict mode.
fn reject(
    mode: ParseMode,
    rejected: &mut Vec<RejectedStorm>,
    line: usize,
    storm_id: Option<String>,
    err: HurdatError,
) -> Result<(), HurdatError> {
    match mode {
        ParseMode::Strict => Err(err),
        ParseMode::Lenient => {
            log::warn!("Skipping malformed storm: {err}");
            rejected.push(RejectedStorm {
                line,
                storm_id,
                reason: err.to_string(),
            });
            Ok(())
        }
    }
}

const fn error_line(err: &HurdatError) -> Option<usize> {
    match err {
        HurdatError::Header { line, .. }
        | HurdatError::Fix { line, .. }
        | HurdatError::Truncated { line, .. }
        | HurdatError::Track { line, .. } => Some(*line),
        HurdatError::Io(_) | HurdatError::Dataset(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use landfall_track_models::StormStatus;

    use super::*;

    const SAMPLE: &str = "\
AL011851,            UNNAMED,      3,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
18510625, 0600,  , HU, 28.0N,  95.4W,  80, -999,
18510625, 1200,  , HU, 28.0N,  96.0W,  80, -999,
AL051975,             ELOISE,      2,
19750923, 0600,  , HU, 29.0N,  86.7W, 110,  960,
19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955,
";

    #[test]
    fn parses_storm_blocks() {
        let parsed = parse_str(SAMPLE, ParseMode::Strict).unwrap();
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.dataset.len(), 2);

        let eloise = parsed.dataset.get("AL051975").unwrap();
        assert_eq!(eloise.name(), "ELOISE");
        assert_eq!(eloise.year(), 1975);
        assert_eq!(eloise.basin(), Some("AL"));
        assert_eq!(eloise.cyclone_number(), Some(5));
        assert_eq!(eloise.fixes().len(), 2);
        assert_eq!(eloise.fixes()[1].status, StormStatus::Hurricane);
    }

    #[test]
    fn year_comes_from_storm_code() {
        // Storm code year wins over the first fix's calendar year.
        let input = "\
AL011900,            UNNAMED,      1,
18991231, 1800,  , TS, 15.0N,  60.0W,  40, -999,
";
        let parsed = parse_str(input, ParseMode::Strict).unwrap();
        assert_eq!(parsed.dataset.get("AL011900").unwrap().year(), 1900);
    }

    #[test]
    fn sorts_out_of_order_fixes() {
        let input = "\
AL021950,               ABLE,      2,
19500812, 1200,  , TS, 18.0N,  60.0W,  50, -999,
19500812, 0600,  , TS, 17.5N,  59.0W,  45, -999,
";
        let parsed = parse_str(input, ParseMode::Strict).unwrap();
        let fixes = parsed.dataset.get("AL021950").unwrap().fixes();
        assert!(fixes[0].timestamp < fixes[1].timestamp);
    }

    #[test]
    fn strict_mode_reports_line_of_bad_fix() {
        let input = "\
AL011851,            UNNAMED,      2,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
18510625, 0600,  , HU, 28.0N,  banana,  80, -999,
";
        let err = parse_str(input, ParseMode::Strict).unwrap_err();
        match err {
            HurdatError::Fix {
                line,
                storm_id,
                source,
            } => {
                assert_eq!(line, 3);
                assert_eq!(storm_id, "AL011851");
                assert_eq!(source, RecordError::InvalidCoordinate("banana".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_detects_truncated_storm() {
        let input = "\
AL011851,            UNNAMED,      3,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
AL051975,             ELOISE,      1,
19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955,
";
        let err = parse_str(input, ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            HurdatError::Truncated {
                expected: 3,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn lenient_mode_skips_bad_storm_and_keeps_the_rest() {
        let input = "\
AL011851,            UNNAMED,      2,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
18510625, 0600,  , QQ, 28.0N,  95.4W,  80, -999,
AL051975,             ELOISE,      1,
19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955,
";
        let parsed = parse_str(input, ParseMode::Lenient).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert!(parsed.dataset.get("AL051975").is_some());
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 3);
        assert_eq!(parsed.rejected[0].storm_id.as_deref(), Some("AL011851"));
    }

    const HUGE_FIX_COUNT: &str = "\
AL011851,            UNNAMED, 18446744073709551615,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
AL021851,            UNNAMED,      1,
18510705, 1200,  , HU, 22.2N,  97.6W,  80, -999,
";

    #[test]
    fn lenient_mode_skips_storm_with_absurd_fix_count() {
        let parsed = parse_str(HUGE_FIX_COUNT, ParseMode::Lenient).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert!(parsed.dataset.get("AL021851").is_some());
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 1);
        assert_eq!(parsed.rejected[0].storm_id.as_deref(), Some("AL011851"));
    }

    #[test]
    fn strict_mode_reports_absurd_fix_count_as_truncated() {
        let err = parse_str(HUGE_FIX_COUNT, ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            HurdatError::Truncated {
                line: 1,
                expected: usize::MAX,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn bad_header_carries_record_error() {
        let err = parse_str("AL011851, UNNAMED, many,\n", ParseMode::Strict).unwrap_err();
        match err {
            HurdatError::Header { line, source } => {
                assert_eq!(line, 1);
                assert_eq!(source, RecordError::InvalidFixCount("many".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_mode_resyncs_after_bad_header() {
        let input = "\
garbage header line
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
AL051975,             ELOISE,      1,
19750923, 1200, L, HU, 30.2N,  86.3W, 110,  955,
";
        let parsed = parse_str(input, ParseMode::Lenient).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].storm_id, None);
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let input = "\
AL011851,            UNNAMED,      2,
18510625, 0000,  , HU, 28.0N,  94.8W,  80, -999,
18510625, 0000,  , HU, 28.1N,  94.9W,  80, -999,
";
        let err = parse_str(input, ParseMode::Strict).unwrap_err();
        assert!(matches!(err, HurdatError::Track { line: 1, .. }));
    }

    #[test]
    fn rejects_storm_with_zero_fixes() {
        let input = "AL011851,            UNNAMED,      0,\n";
        let err = parse_str(input, ParseMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            HurdatError::Track {
                source: TrackError::Empty { .. },
                ..
            }
        ));
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let parsed = parse_str("", ParseMode::Strict).unwrap();
        assert!(parsed.dataset.is_empty());
    }
}
