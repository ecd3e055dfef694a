use std::cmp::Ordering;
use std::path::Path;

use geo::line_intersection::{LineIntersection, line_intersection};
use geo::{BoundingRect, Coord, Intersects, Line, MultiPolygon, Point, Rect};
use landfall_track_models::Position;
use rstar::{AABB, RTree, RTreeObject};

use crate::{Bounds, BoundaryError, RegionBoundary};

/// One ring edge stored in the R-tree.
struct BoundaryEdge {
    line: Line<f64>,
    envelope: AABB<[f64; 2]>,
}

impl BoundaryEdge {
    fn new(line: Line<f64>) -> Self {
        let envelope = AABB::from_corners([line.start.x, line.start.y], [line.end.x, line.end.y]);
        Self { line, envelope }
    }
}

impl RTreeObject for BoundaryEdge {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A merged (multi)polygon landmass with an edge index.
///
/// Constructed once, never mutated, and safe to share across threads.
pub struct GeoBoundary {
    area: MultiPolygon<f64>,
    extent: Rect<f64>,
    edges: RTree<BoundaryEdge>,
}

impl std::fmt::Debug for GeoBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoBoundary")
            .field("polygons", &self.area.0.len())
            .field("edges", &self.edges.size())
            .field("extent", &self.extent)
            .finish()
    }
}

impl GeoBoundary {
    /// Validates `area` and builds the edge index.
    ///
    /// # Errors
    ///
    /// * [`BoundaryError::Empty`] if `area` has no polygons.
    /// * [`BoundaryError::InvalidRing`] if any ring has fewer than four
    ///   coordinates.
    /// * [`BoundaryError::NonFiniteCoordinate`] if any coordinate is NaN or
    ///   infinite.
    pub fn new(area: MultiPolygon<f64>) -> Result<Self, BoundaryError> {
        if area.0.is_empty() {
            return Err(BoundaryError::Empty);
        }

        let mut edges = Vec::new();
        for (i, polygon) in area.0.iter().enumerate() {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                if ring.0.len() < 4 {
                    return Err(BoundaryError::InvalidRing {
                        polygon: i,
                        coords: ring.0.len(),
                    });
                }
                if ring.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
                    return Err(BoundaryError::NonFiniteCoordinate { polygon: i });
                }
                edges.extend(ring.lines().map(BoundaryEdge::new));
            }
        }

        let extent = area.bounding_rect().ok_or(BoundaryError::Empty)?;
        let edges = RTree::bulk_load(edges);

        log::debug!(
            "Built boundary index: {} polygons, {} edges",
            area.0.len(),
            edges.size()
        );

        Ok(Self {
            area,
            extent,
            edges,
        })
    }

    /// Parses a `GeoJSON` document into a boundary.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if parsing fails or the geometry is invalid.
    pub fn from_geojson_str(geojson_str: &str) -> Result<Self, BoundaryError> {
        Self::new(crate::load::parse_geojson(geojson_str)?)
    }

    /// Reads a `GeoJSON` file into a boundary.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the file cannot be read, parsing fails,
    /// or the geometry is invalid.
    pub fn load(path: &Path) -> Result<Self, BoundaryError> {
        log::info!("Loading boundary from {}", path.display());
        let boundary = Self::from_geojson_str(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded boundary with {} polygons ({} edges)",
            boundary.polygon_count(),
            boundary.edge_count()
        );
        Ok(boundary)
    }

    /// The merged test surface.
    #[must_use]
    pub const fn area(&self) -> &MultiPolygon<f64> {
        &self.area
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.area.0.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.size()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_lon: self.extent.min().x,
            min_lat: self.extent.min().y,
            max_lon: self.extent.max().x,
            max_lat: self.extent.max().y,
        }
    }

    fn in_extent(&self, coord: Coord<f64>) -> bool {
        let (min, max) = (self.extent.min(), self.extent.max());
        coord.x >= min.x && coord.x <= max.x && coord.y >= min.y && coord.y <= max.y
    }

    /// Boundary crossings of `segment`, keeping the one closest to its
    /// start. Ties are broken on coordinates so the answer does not depend
    /// on R-tree iteration order.
    fn nearest_crossing(&self, segment: Line<f64>) -> Option<Coord<f64>> {
        let query = AABB::from_corners(
            [segment.start.x, segment.start.y],
            [segment.end.x, segment.end.y],
        );
        let origin = segment.start;

        self.edges
            .locate_in_envelope_intersecting(&query)
            .filter_map(|edge| match line_intersection(segment, edge.line)? {
                LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
                LineIntersection::Collinear { intersection } => {
                    Some(closer_to(origin, intersection.start, intersection.end))
                }
            })
            .min_by(|a, b| compare_from(origin, *a, *b))
    }
}

impl RegionBoundary for GeoBoundary {
    fn contains(&self, lon: f64, lat: f64) -> Result<bool, BoundaryError> {
        let position = Position::new(lon, lat);
        if !position.is_finite() {
            return Err(BoundaryError::NonFiniteQuery { lon, lat });
        }

        let coord = Coord { x: lon, y: lat };
        if !self.in_extent(coord) {
            return Ok(false);
        }

        // `intersects` rather than `contains`: points on an edge count.
        Ok(self.area.intersects(&Point::from(coord)))
    }

    fn intersects_segment(
        &self,
        from: Position,
        to: Position,
    ) -> Result<Option<Position>, BoundaryError> {
        for p in [from, to] {
            if !p.is_finite() {
                return Err(BoundaryError::NonFiniteQuery {
                    lon: p.lon,
                    lat: p.lat,
                });
            }
        }

        if self.contains(from.lon, from.lat)? {
            return Ok(Some(from));
        }
        if from == to {
            return Ok(None);
        }

        let segment = Line::new(
            Coord {
                x: from.lon,
                y: from.lat,
            },
            Coord {
                x: to.lon,
                y: to.lat,
            },
        );

        Ok(self
            .nearest_crossing(segment)
            .map(|c| Position::new(c.x, c.y)))
    }
}

fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

fn closer_to(origin: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Coord<f64> {
    if compare_from(origin, a, b) == Ordering::Greater {
        b
    } else {
        a
    }
}

fn compare_from(origin: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Ordering {
    distance(origin, a)
        .total_cmp(&distance(origin, b))
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| a.y.total_cmp(&b.y))
}
