//! `GeoJSON` export of a storm path for external plotting.
//!
//! The collection holds, in order: the path as a `LineString`, one `Point`
//! per fix, and the landfall `Point` when there is one. Every feature has a
//! `kind` property (`path`, `fix`, `landfall`). The collection `bbox` is the
//! boundary extent with a 30% margin on each side.

use chrono::SecondsFormat;
use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use landfall_analysis_models::{CrossingKind, PathTrace};
use landfall_boundary::Bounds;

/// Margin added around the boundary extent, as a fraction of its size.
pub const PLOT_MARGIN: f64 = 0.3;

/// Builds the plotting collection for `trace` framed by `bounds`.
#[must_use]
pub fn trace_collection(trace: &PathTrace, bounds: Bounds) -> FeatureCollection {
    let mut features = Vec::with_capacity(trace.points.len() + 2);

    // A LineString needs at least two positions.
    if trace.points.len() >= 2 {
        let path = trace
            .points
            .iter()
            .map(|point| (point.lon, point.lat))
            .collect::<LineString<f64>>();
        features.push(feature(
            Value::from(&path),
            serde_json::json!({
                "kind": "path",
                "stormId": trace.storm_id,
                "title": trace.title(),
            }),
        ));
    }

    for (index, point) in trace.points.iter().enumerate() {
        features.push(feature(
            Value::from(&Point::new(point.lon, point.lat)),
            serde_json::json!({
                "kind": "fix",
                "index": index,
                "time": point.time.to_rfc3339_opts(SecondsFormat::Secs, true),
                "status": point.status.as_ref(),
                "windSpeed": point.wind_speed,
            }),
        ));
    }

    if let Some(crossing) = &trace.landfall {
        let interpolated = matches!(crossing.kind, CrossingKind::Interpolated { .. });
        features.push(feature(
            Value::from(&Point::new(crossing.point.lon, crossing.point.lat)),
            serde_json::json!({
                "kind": "landfall",
                "time": crossing.time.to_rfc3339_opts(SecondsFormat::Millis, true),
                "interpolated": interpolated,
            }),
        ));
    }

    FeatureCollection {
        bbox: Some(bounds.expanded(PLOT_MARGIN).to_array().to_vec()),
        features,
        foreign_members: None,
    }
}

fn feature(value: Value, properties: serde_json::Value) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: as_object(properties),
        foreign_members: None,
    }
}

fn as_object(value: serde_json::Value) -> Option<JsonObject> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use landfall_analysis_models::{LandfallCrossing, TracePoint};
    use landfall_track_models::{Position, StormStatus};

    use super::*;

    fn trace(points: u32, landfall: bool) -> PathTrace {
        let start = Utc.with_ymd_and_hms(1975, 9, 22, 0, 0, 0).unwrap();
        PathTrace {
            storm_id: "AL051975".to_string(),
            name: "ELOISE".to_string(),
            year: 1975,
            points: (0..points)
                .map(|i| TracePoint {
                    lon: -87.0 + f64::from(i) * 0.2,
                    lat: 28.0 + f64::from(i),
                    time: start + chrono::TimeDelta::hours(6 * i64::from(i)),
                    status: StormStatus::Hurricane,
                    wind_speed: Some(100),
                })
                .collect(),
            landfall: landfall.then(|| LandfallCrossing {
                point: Position::new(-86.4, 30.0),
                time: start + chrono::TimeDelta::minutes(750),
                kind: CrossingKind::Interpolated { segment_start: 2 },
            }),
        }
    }

    fn bounds() -> Bounds {
        Bounds {
            min_lon: -88.0,
            min_lat: 30.0,
            max_lon: -78.0,
            max_lat: 35.0,
        }
    }

    fn kinds(collection: &FeatureCollection) -> Vec<String> {
        collection
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["kind"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn path_fixes_then_landfall() {
        let collection = trace_collection(&trace(3, true), bounds());

        assert_eq!(
            kinds(&collection),
            vec!["path", "fix", "fix", "fix", "landfall"]
        );

        let landfall = collection.features[4].properties.as_ref().unwrap();
        assert_eq!(landfall["time"], "1975-09-22T12:30:00.000Z");
        assert_eq!(landfall["interpolated"], true);
    }

    #[test]
    fn bbox_has_plot_margin() {
        let collection = trace_collection(&trace(2, false), bounds());
        let bbox = collection.bbox.unwrap();

        let expected = [-91.0, 28.5, -75.0, 36.5];
        for (actual, expected) in bbox.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn single_fix_has_no_path_line() {
        let collection = trace_collection(&trace(1, false), bounds());
        assert_eq!(kinds(&collection), vec!["fix"]);
    }

    #[test]
    fn serializes_as_feature_collection() {
        let json = serde_json::to_value(trace_collection(&trace(2, true), bounds())).unwrap();

        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(json["features"][1]["properties"]["status"], "HU");
    }
}
