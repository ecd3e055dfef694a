#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary used as the landfall test surface.
//!
//! The analysis only needs two questions answered about a landmass: "is
//! this point inside?" and "where does this segment first touch it?". The
//! [`RegionBoundary`] trait captures exactly those two queries so that the
//! detection code never depends on a particular geometry library.
//!
//! [`GeoBoundary`] is the production implementation: all polygons of the
//! input are merged into one `geo` [`MultiPolygon`](geo::MultiPolygon) and
//! every ring edge is bulk-loaded into an `rstar` R-tree, so a segment
//! query only tests the handful of edges whose envelopes overlap it.

pub mod load;
mod region;

use landfall_track_models::Position;
use serde::{Deserialize, Serialize};

pub use region::GeoBoundary;

/// Errors that can occur while loading or querying a boundary.
#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    /// Reading the boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing or conversion failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The input contained no polygonal geometry.
    #[error("Boundary contains no polygons")]
    Empty,

    /// A ring has too few coordinates to enclose any area.
    #[error("Polygon {polygon} has a ring with only {coords} coordinates")]
    InvalidRing {
        /// Index of the offending polygon.
        polygon: usize,
        /// Number of coordinates in the ring (including the closing one).
        coords: usize,
    },

    /// A polygon contains a NaN or infinite coordinate.
    #[error("Polygon {polygon} contains a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending polygon.
        polygon: usize,
    },

    /// A query was made with a NaN or infinite coordinate.
    #[error("Cannot query boundary at non-finite position ({lon}, {lat})")]
    NonFiniteQuery {
        /// Queried longitude.
        lon: f64,
        /// Queried latitude.
        lat: f64,
    },
}

/// The two geometric queries landfall detection needs.
///
/// Implementations must be immutable once constructed; they are shared by
/// reference across worker threads.
pub trait RegionBoundary: Send + Sync {
    /// Whether `(lon, lat)` lies inside the region. Points on the boundary
    /// itself count as inside.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the query cannot be evaluated.
    fn contains(&self, lon: f64, lat: f64) -> Result<bool, BoundaryError>;

    /// Returns a point where the straight segment `from -> to` meets the
    /// region, or `None` if it does not.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the query cannot be evaluated.
    fn intersects_segment(
        &self,
        from: Position,
        to: Position,
    ) -> Result<Option<Position>, BoundaryError>;
}

/// Axis-aligned extent of a boundary in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Grows each side by `fraction` of the extent along that axis
    /// (`0.3` gives the 30% plotting margin).
    #[must_use]
    pub fn expanded(self, fraction: f64) -> Self {
        let dx = (self.max_lon - self.min_lon) * fraction;
        let dy = (self.max_lat - self.min_lat) * fraction;
        Self {
            min_lon: self.min_lon - dx,
            min_lat: self.min_lat - dy,
            max_lon: self.max_lon + dx,
            max_lat: self.max_lat + dy,
        }
    }

    /// `[min_lon, min_lat, max_lon, max_lat]`, the `GeoJSON` bbox order.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_by_fraction_of_extent() {
        let bounds = Bounds {
            min_lon: -87.0,
            min_lat: 25.0,
            max_lon: -80.0,
            max_lat: 31.0,
        }
        .expanded(0.5);

        assert!((bounds.min_lon - -90.5).abs() < 1e-12);
        assert!((bounds.max_lon - -76.5).abs() < 1e-12);
        assert!((bounds.min_lat - 22.0).abs() < 1e-12);
        assert!((bounds.max_lat - 34.0).abs() < 1e-12);
    }
}
