//! Map configuration: canvas size, projection defaults, zoom scales, and the
//! outlying-island registry.
//!
//! A host may hand the engine a JSON blob to override any field; missing
//! fields fall back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CANVAS_HEIGHT, CANVAS_WIDTH, COUNTY_ZOOM_SCALE, INITIAL_CENTER, INITIAL_SCALE, TOWN_ZOOM_SCALE, ZOOM_DURATION_MS,
};

/// A county drawn at a fixed position away from its true location.
///
/// `dx` / `dy` are pixels from the canvas center, so the placement follows
/// the configured canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlyingRegion {
    pub name: String,
    pub dx: f64,
    pub dy: f64,
}

/// Static configuration for one map instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    /// Initial center as (longitude, latitude) in degrees.
    pub initial_center: (f64, f64),
    pub initial_scale: f64,
    pub county_zoom_scale: f64,
    pub town_zoom_scale: f64,
    pub zoom_duration_ms: f64,
    pub outlying_regions: Vec<OutlyingRegion>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            initial_center: INITIAL_CENTER,
            initial_scale: INITIAL_SCALE,
            county_zoom_scale: COUNTY_ZOOM_SCALE,
            town_zoom_scale: TOWN_ZOOM_SCALE,
            zoom_duration_ms: ZOOM_DURATION_MS,
            outlying_regions: default_outlying_regions(),
        }
    }
}

impl MapConfig {
    /// Parse a config from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Canvas midpoint in CSS pixels.
    #[must_use]
    pub fn canvas_center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Kinmen, Matsu (Lienchiang) and Penghu.
#[must_use]
pub fn default_outlying_regions() -> Vec<OutlyingRegion> {
    vec![
        OutlyingRegion { name: "金門縣".into(), dx: 80.0, dy: 0.0 },
        OutlyingRegion { name: "連江縣".into(), dx: 50.0, dy: 100.0 },
        OutlyingRegion { name: "澎湖縣".into(), dx: 0.0, dy: 0.0 },
    ]
}
