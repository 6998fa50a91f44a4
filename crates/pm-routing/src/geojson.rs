//! GeoJSON import of networks and export of routes — enabled with the
//! `geojson` Cargo feature (on by default).
//!
//! # Axis order
//!
//! GeoJSON positions are `[longitude, latitude, ...]` (RFC 7946 §3.1.1).
//! They are converted to [`GeoPoint`] `{ lat, lon }` on the way in and back
//! to `[lon, lat]` on the way out.  Extra ordinates (altitude) are dropped.
//!
//! # What is loaded
//!
//! `LineString`, `Point` and `Polygon` map to the matching [`Geometry`]
//! variants; every other kind (including `MultiLineString` and
//! `GeometryCollection`) becomes [`Geometry::Other`] and is not routable.
//! Features without a geometry are skipped.

use std::path::Path;

use ::geojson::{Feature, GeoJson, Geometry as GjGeometry, JsonObject, Value};
use serde_json::json;

use pm_core::GeoPoint;

use crate::geometry::Geometry;
use crate::router::Route;
use crate::{RoutingError, RoutingResult};

// ── Import ────────────────────────────────────────────────────────────────────

/// Read and parse a GeoJSON file into a geometry collection.
pub fn load_geojson(path: &Path) -> RoutingResult<Vec<Geometry>> {
    let text = std::fs::read_to_string(path)?;
    parse_geojson(&text)
}

/// Parse GeoJSON text into a geometry collection.
pub fn parse_geojson(text: &str) -> RoutingResult<Vec<Geometry>> {
    let doc: GeoJson = text
        .parse()
        .map_err(|e: ::geojson::Error| RoutingError::GeoJson(e.to_string()))?;
    geometries_from_geojson(&doc)
}

/// Flatten a GeoJSON document (collection, single feature, or bare geometry)
/// into a geometry collection, preserving document order.
pub fn geometries_from_geojson(doc: &GeoJson) -> RoutingResult<Vec<Geometry>> {
    match doc {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .map(convert_geometry)
            .collect(),
        GeoJson::Feature(f) => f.geometry.iter().map(convert_geometry).collect(),
        GeoJson::Geometry(g) => Ok(vec![convert_geometry(g)?]),
    }
}

fn convert_geometry(geometry: &GjGeometry) -> RoutingResult<Geometry> {
    Ok(match &geometry.value {
        Value::LineString(positions) => Geometry::LineString(convert_positions(positions)?),
        Value::Point(position) => Geometry::Point(convert_position(position)?),
        Value::Polygon(rings) => Geometry::Polygon(
            rings
                .iter()
                .map(|ring| convert_positions(ring))
                .collect::<RoutingResult<_>>()?,
        ),
        _ => Geometry::Other,
    })
}

fn convert_positions(positions: &[Vec<f64>]) -> RoutingResult<Vec<GeoPoint>> {
    positions.iter().map(|p| convert_position(p)).collect()
}

fn convert_position(position: &[f64]) -> RoutingResult<GeoPoint> {
    match position {
        [lon, lat, ..] => Ok(GeoPoint::new(*lat, *lon)),
        _ => Err(RoutingError::GeoJson(format!(
            "position needs at least 2 ordinates, got {}",
            position.len()
        ))),
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Convert a route to a GeoJSON `Feature`.
///
/// Properties: `length_m` and `node_count`.  An empty route has a `null`
/// geometry, since a `LineString` needs at least two positions.
pub fn route_to_feature(route: &Route) -> Feature {
    let geometry = (!route.is_empty()).then(|| {
        let coords = route.points.iter().map(|p| vec![p.lon, p.lat]).collect();
        GjGeometry::new(Value::LineString(coords))
    });

    let mut properties = JsonObject::new();
    properties.insert("length_m".to_string(), json!(route.length_m));
    properties.insert("node_count".to_string(), json!(route.len()));

    Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serialize a route as a GeoJSON `Feature` string.
pub fn route_to_geojson_string(route: &Route, pretty: bool) -> RoutingResult<String> {
    let feature = route_to_feature(route);
    let out = if pretty {
        serde_json::to_string_pretty(&feature)
    } else {
        serde_json::to_string(&feature)
    };
    out.map_err(|e| RoutingError::GeoJson(e.to_string()))
}
