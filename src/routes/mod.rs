//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the three boundary lookups the drill-down map fetches, plus a health
//! check. Paths are built from the segment constants the map's HTTP source
//! requests.

pub mod geo;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use drilldown::source::{API_SEGMENT, COUNTIES_SEGMENT, TOWNS_SEGMENT, VILLAGES_SEGMENT};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(&format!("/{API_SEGMENT}/{COUNTIES_SEGMENT}"), get(geo::counties))
        .route(&format!("/{API_SEGMENT}/{TOWNS_SEGMENT}/{{county}}"), get(geo::towns))
        .route(&format!("/{API_SEGMENT}/{VILLAGES_SEGMENT}/{{town}}"), get(geo::villages))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
