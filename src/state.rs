//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! boundary layers are immutable after startup, so they sit behind a plain
//! `Arc` with no lock.

use std::sync::Arc;

use crate::geodata::GeoStore;

#[derive(Clone)]
pub struct AppState {
    pub geo: Arc<GeoStore>,
}

impl AppState {
    #[must_use]
    pub fn new(geo: GeoStore) -> Self {
        Self { geo: Arc::new(geo) }
    }
}
