//! Boundary lookup handlers.

use axum::Json;
use axum::extract::{Path, State};
use geojson::FeatureCollection;

use crate::state::AppState;

/// `GET /api/taiwan-county`
pub async fn counties(State(state): State<AppState>) -> Json<FeatureCollection> {
    Json(state.geo.counties())
}

/// `GET /api/taiwan-town/{county}`
pub async fn towns(State(state): State<AppState>, Path(county): Path<String>) -> Json<FeatureCollection> {
    let towns = state.geo.towns_of(&county);
    tracing::debug!(%county, count = towns.features.len(), "towns lookup");
    Json(towns)
}

/// `GET /api/taiwan-village/{town}`
pub async fn villages(State(state): State<AppState>, Path(town): Path<String>) -> Json<FeatureCollection> {
    let villages = state.geo.villages_of(&town);
    tracing::debug!(%town, count = villages.features.len(), "villages lookup");
    Json(villages)
}

#[cfg(test)]
#[path = "geo_test.rs"]
mod tests;
