//! Immutable collection of tracks for one analysis run.

use std::collections::BTreeMap;

use crate::{Track, TrackError};

/// All storms loaded for an analysis run.
///
/// Built once by the caller and passed by reference into the analysis
/// driver. Track order is preserved from construction.
#[derive(Debug, Clone, Default)]
pub struct StormDataset {
    tracks: Vec<Track>,
    /// storm id -> index into `tracks`
    index: BTreeMap<String, usize>,
}

impl StormDataset {
    /// Builds a dataset from tracks in source order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::DuplicateStorm`] if two tracks share an id.
    pub fn new(tracks: Vec<Track>) -> Result<Self, TrackError> {
        let mut index = BTreeMap::new();
        for (i, track) in tracks.iter().enumerate() {
            if index.insert(track.id().to_string(), i).is_some() {
                return Err(TrackError::DuplicateStorm {
                    id: track.id().to_string(),
                });
            }
        }

        Ok(Self { tracks, index })
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Looks up a storm by id (case-sensitive, e.g. `"AL051975"`).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.index.get(id).map(|&i| &self.tracks[i])
    }

    /// Most recent season year present, the default upper bound of a
    /// year-range filter.
    #[must_use]
    pub fn latest_year(&self) -> Option<i32> {
        self.tracks.iter().map(Track::year).max()
    }

    #[must_use]
    pub fn earliest_year(&self) -> Option<i32> {
        self.tracks.iter().map(Track::year).min()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}

impl<'a> IntoIterator for &'a StormDataset {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{Fix, StormStatus};

    fn track(id: &str, year: i32) -> Track {
        let ts = Utc.with_ymd_and_hms(year, 8, 1, 0, 0, 0).unwrap();
        Track::new(
            id,
            "UNNAMED",
            vec![Fix::new(ts, -80.0, 25.0, StormStatus::Hurricane)],
        )
        .unwrap()
    }

    #[test]
    fn year_bounds() {
        let dataset =
            StormDataset::new(vec![track("AL011950", 1950), track("AL012022", 2022)]).unwrap();
        assert_eq!(dataset.earliest_year(), Some(1950));
        assert_eq!(dataset.latest_year(), Some(2022));
    }

    #[test]
    fn empty_dataset_has_no_years() {
        let dataset = StormDataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.latest_year(), None);
    }

    #[test]
    fn lookup_by_id() {
        let dataset =
            StormDataset::new(vec![track("AL011950", 1950), track("AL012022", 2022)]).unwrap();
        assert_eq!(dataset.get("AL012022").map(Track::year), Some(2022));
        assert!(dataset.get("AL991999").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err =
            StormDataset::new(vec![track("AL011950", 1950), track("AL011950", 1950)]).unwrap_err();
        assert_eq!(
            err,
            TrackError::DuplicateStorm {
                id: "AL011950".to_string()
            }
        );
    }
}
