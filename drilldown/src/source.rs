//! Geo feature source: where feature collections come from.
//!
//! The controller never performs I/O. It emits a [`FetchRequest`] and the
//! host (or [`crate::session::MapSession`]) resolves it through a
//! [`FeatureSource`], feeding the result back.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-success statuses, and undecodable bodies all
//! surface as [`SourceError`]. The controller treats them alike: log and
//! stay on the current level.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use async_trait::async_trait;
use reqwest::Url;

use crate::feature::{FeatureCollection, ParseError};

/// Leading path segment shared by every lookup endpoint.
pub const API_SEGMENT: &str = "api";
/// Endpoint segment listing all counties.
pub const COUNTIES_SEGMENT: &str = "taiwan-county";
/// Endpoint segment listing the towns of one county.
pub const TOWNS_SEGMENT: &str = "taiwan-town";
/// Endpoint segment listing the villages of one town.
pub const VILLAGES_SEGMENT: &str = "taiwan-village";

/// One of the three lookups the map consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FetchRequest {
    Counties,
    Towns { county: String },
    Villages { town: String },
}

impl FetchRequest {
    /// URL path segments, unescaped.
    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Counties => vec![API_SEGMENT, COUNTIES_SEGMENT],
            Self::Towns { county } => vec![API_SEGMENT, TOWNS_SEGMENT, county],
            Self::Villages { town } => vec![API_SEGMENT, VILLAGES_SEGMENT, town],
        }
    }
}

/// Errors produced while fetching a feature collection.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The base URL cannot carry path segments.
    #[error("invalid source url: {0}")]
    Url(String),

    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("source returned status {status}")]
    Status { status: u16 },

    /// The body is not a feature collection.
    #[error("data failure: {0}")]
    Data(#[from] ParseError),
}

/// Supplies feature collections for fetch requests.
#[async_trait(?Send)]
pub trait FeatureSource {
    /// Resolve one lookup.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the collection cannot be obtained.
    async fn fetch(&self, request: &FetchRequest) -> Result<FeatureCollection, SourceError>;
}

/// [`FeatureSource`] backed by the HTTP geo feature service.
#[derive(Debug, Clone)]
pub struct HttpFeatureSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFeatureSource {
    /// Build a source rooted at `base_url` (e.g. `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Url`] if `base_url` does not parse.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let base_url = Url::parse(base_url).map_err(|e| SourceError::Url(e.to_string()))?;
        Ok(Self { client: reqwest::Client::new(), base_url })
    }

    /// Absolute URL for a request, with each segment percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Url`] if the base URL cannot take a path.
    pub fn url_for(&self, request: &FetchRequest) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SourceError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(request.segments());
        Ok(url)
    }
}

#[async_trait(?Send)]
impl FeatureSource for HttpFeatureSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<FeatureCollection, SourceError> {
        let url = self.url_for(request)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(SourceError::Status { status: resp.status().as_u16() });
        }
        let body = resp.text().await.map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(FeatureCollection::from_geojson_str(&body)?)
    }
}
