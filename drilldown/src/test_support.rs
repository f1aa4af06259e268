//! Shared builders for unit tests.

use geo::{LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value, json};

use crate::feature::{Feature, FeatureCollection};

/// Axis-aligned square in (lon, lat) degrees with its lower-left at `(lon, lat)`.
pub fn square(lon: f64, lat: f64, size: f64) -> MultiPolygon<f64> {
    let ring = LineString::from(vec![
        (lon, lat),
        (lon + size, lat),
        (lon + size, lat + size),
        (lon, lat + size),
        (lon, lat),
    ]);
    MultiPolygon::new(vec![Polygon::new(ring, vec![])])
}

fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn county(name: &str, lon: f64, lat: f64) -> Feature {
    Feature::new(square(lon, lat, 0.2), props(json!({ "name": name, "COUNTYNAME": name })))
}

pub fn town(county: &str, name: &str, lon: f64, lat: f64) -> Feature {
    Feature::new(
        square(lon, lat, 0.05),
        props(json!({ "name": name, "COUNTYNAME": county, "TOWNNAME": name })),
    )
}

pub fn village(county: &str, town: &str, name: &str, lon: f64, lat: f64) -> Feature {
    Feature::new(
        square(lon, lat, 0.01),
        props(json!({ "name": name, "COUNTYNAME": county, "TOWNNAME": town, "VILLAGENAM": name })),
    )
}

/// Taipei, Taichung, and Penghu.
pub fn counties() -> FeatureCollection {
    FeatureCollection::new(vec![
        county("臺北市", 121.4, 25.0),
        county("臺中市", 120.6, 24.1),
        county("澎湖縣", 119.5, 23.5),
    ])
}

pub fn towns_of(county_name: &str) -> FeatureCollection {
    FeatureCollection::new(vec![
        town(county_name, "甲區", 121.45, 25.05),
        town(county_name, "乙區", 121.5, 25.1),
    ])
}

pub fn villages_of(county_name: &str, town_name: &str) -> FeatureCollection {
    FeatureCollection::new(vec![
        village(county_name, town_name, "一里", 121.46, 25.06),
        village(county_name, town_name, "二里", 121.48, 25.07),
    ])
}
