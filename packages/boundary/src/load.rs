//! `GeoJSON` boundary input.
//!
//! Accepts a bare geometry, a feature, or a feature collection. Every
//! `Polygon` and `MultiPolygon` found is merged into a single
//! [`MultiPolygon`], which is the unified test surface used for landfall
//! detection. Other geometry types are skipped with a warning.

use geo::{Geometry, MultiPolygon, Polygon};
use geojson::GeoJson;

use crate::BoundaryError;

/// Parses a `GeoJSON` string into one merged [`MultiPolygon`].
///
/// # Errors
///
/// * [`BoundaryError::GeoJson`] if the text is not valid `GeoJSON` or a
///   geometry cannot be converted.
/// * [`BoundaryError::Empty`] if no polygonal geometry is present.
pub fn parse_geojson(geojson_str: &str) -> Result<MultiPolygon<f64>, BoundaryError> {
    let geojson: GeoJson = geojson_str.parse()?;

    let geometries: Vec<geojson::Geometry> = match geojson {
        GeoJson::Geometry(geom) => vec![geom],
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    let mut polygons = Vec::new();
    for geom in geometries {
        let geo_geom: Geometry<f64> = geom.try_into()?;
        collect_polygons(geo_geom, &mut polygons);
    }

    if polygons.is_empty() {
        return Err(BoundaryError::Empty);
    }

    log::debug!("Merged {} polygons from GeoJSON", polygons.len());

    Ok(MultiPolygon(polygons))
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_polygons(inner, out);
            }
        }
        Geometry::Rect(rect) => out.push(rect.to_polygon()),
        Geometry::Triangle(triangle) => out.push(triangle.to_polygon()),
        other => log::warn!("Ignoring non-polygonal boundary geometry: {other:?}"),
    }
}
