//! Boundary data store.
//!
//! DESIGN
//! ======
//! The three boundary files are read and decoded once at startup. Lookups
//! filter the town and village layers by their parent's name property and
//! return a fresh collection; an unknown parent yields an empty one.

use std::fs;
use std::path::{Path, PathBuf};

use drilldown::feature::{COUNTY_KEY, TOWN_KEY};
use geojson::{FeatureCollection, GeoJson};
use serde_json::Value;

pub const COUNTY_FILE: &str = "twCounty2010.geo.json";
pub const TOWN_FILE: &str = "twTown1982.geo.json";
pub const VILLAGE_FILE: &str = "twVillage1982.geo.json";

/// Errors raised while loading boundary files.
#[derive(Debug, thiserror::Error)]
pub enum GeoDataError {
    /// The file could not be read.
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    /// The file is not GeoJSON.
    #[error("decoding {}: {source}", path.display())]
    Decode { path: PathBuf, source: geojson::Error },

    /// The file is GeoJSON but not a feature collection.
    #[error("{} is not a FeatureCollection", path.display())]
    NotCollection { path: PathBuf },
}

/// County, town, and village layers held in memory.
#[derive(Debug, Clone)]
pub struct GeoStore {
    counties: FeatureCollection,
    towns: FeatureCollection,
    villages: FeatureCollection,
}

impl GeoStore {
    #[must_use]
    pub fn new(counties: FeatureCollection, towns: FeatureCollection, villages: FeatureCollection) -> Self {
        Self { counties, towns, villages }
    }

    /// Load the three layers from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoDataError`] naming the first file that fails.
    pub fn load(dir: &Path) -> Result<Self, GeoDataError> {
        let store = Self::new(
            read_collection(&dir.join(COUNTY_FILE))?,
            read_collection(&dir.join(TOWN_FILE))?,
            read_collection(&dir.join(VILLAGE_FILE))?,
        );
        tracing::info!(
            dir = %dir.display(),
            counties = store.counties.features.len(),
            towns = store.towns.features.len(),
            villages = store.villages.features.len(),
            "boundary data loaded"
        );
        Ok(store)
    }

    #[must_use]
    pub fn counties(&self) -> FeatureCollection {
        self.counties.clone()
    }

    /// Towns whose `COUNTYNAME` is `county`.
    #[must_use]
    pub fn towns_of(&self, county: &str) -> FeatureCollection {
        filter_by(&self.towns, COUNTY_KEY, county)
    }

    /// Villages whose `TOWNNAME` is `town`.
    #[must_use]
    pub fn villages_of(&self, town: &str) -> FeatureCollection {
        filter_by(&self.villages, TOWN_KEY, town)
    }
}

fn read_collection(path: &Path) -> Result<FeatureCollection, GeoDataError> {
    let text = fs::read_to_string(path).map_err(|source| GeoDataError::Read { path: path.to_owned(), source })?;
    let doc = text
        .parse::<GeoJson>()
        .map_err(|source| GeoDataError::Decode { path: path.to_owned(), source })?;
    match doc {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(GeoDataError::NotCollection { path: path.to_owned() }),
    }
}

fn filter_by(layer: &FeatureCollection, key: &str, value: &str) -> FeatureCollection {
    let features = layer
        .features
        .iter()
        .filter(|f| f.property(key).and_then(Value::as_str) == Some(value))
        .cloned()
        .collect();
    FeatureCollection { bbox: None, features, foreign_members: None }
}

#[cfg(test)]
#[path = "geodata_test.rs"]
mod tests;
