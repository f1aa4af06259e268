//! Feature model: administrative levels, feature identity, and collections.
//!
//! Data flows into this layer from the geo feature service as GeoJSON. Each
//! feature is reduced to a `MultiPolygon` plus its raw properties object; a
//! typed accessor (`Props`) reads the administrative keys. Collections are
//! shared with the scene through `Arc` so a level's geometry stays alive
//! exactly as long as something still draws it.

#[cfg(test)]
#[path = "feature_test.rs"]
mod feature_test;

use std::sync::Arc;

use geo::{Geometry, MultiPolygon};
use geojson::GeoJson;
use serde_json::{Map, Value};

/// Property key carrying the human-readable name.
pub const NAME_KEY: &str = "name";
/// Property key carrying the county name.
pub const COUNTY_KEY: &str = "COUNTYNAME";
/// Property key carrying the town name.
pub const TOWN_KEY: &str = "TOWNNAME";
/// Property key carrying the village name.
pub const VILLAGE_KEY: &str = "VILLAGENAM";

/// Administrative granularity of a rendered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    #[default]
    County,
    Town,
    Village,
}

impl Level {
    /// Class tag attached to every path drawn at this level.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::County => "county",
            Self::Town => "town",
            Self::Village => "village",
        }
    }

    /// The level below this one, or `None` for villages.
    #[must_use]
    pub fn child(self) -> Option<Self> {
        match self {
            Self::County => Some(Self::Town),
            Self::Town => Some(Self::Village),
            Self::Village => None,
        }
    }
}

/// Stable identity of a feature across collections.
///
/// Built from the administrative names rather than the collection position,
/// so a county keeps its key when the same county list is fetched again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureKey {
    pub level: Level,
    pub county: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
}

/// Errors produced while decoding a feature collection.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The payload is not valid GeoJSON.
    #[error("invalid geojson: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The payload is GeoJSON but not a `FeatureCollection`.
    #[error("expected a FeatureCollection, got {0}")]
    NotCollection(&'static str),
}

/// Typed access to the administrative keys of a feature's properties.
pub struct Props<'a> {
    value: &'a Map<String, Value>,
}

impl<'a> Props<'a> {
    #[must_use]
    pub fn new(value: &'a Map<String, Value>) -> Self {
        Self { value }
    }

    fn str_of(&self, key: &str) -> Option<&'a str> {
        self.value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Display name (`name`), when present.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.str_of(NAME_KEY)
    }

    /// County name (`COUNTYNAME`), when present.
    #[must_use]
    pub fn county(&self) -> Option<&'a str> {
        self.str_of(COUNTY_KEY)
    }

    /// Town name (`TOWNNAME`), when present.
    #[must_use]
    pub fn town(&self) -> Option<&'a str> {
        self.str_of(TOWN_KEY)
    }

    /// Village name (`VILLAGENAM`), when present.
    #[must_use]
    pub fn village(&self) -> Option<&'a str> {
        self.str_of(VILLAGE_KEY)
    }
}

/// One geographic region.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: MultiPolygon<f64>,
    pub properties: Map<String, Value>,
}

impl Feature {
    #[must_use]
    pub fn new(geometry: MultiPolygon<f64>, properties: Map<String, Value>) -> Self {
        Self { geometry, properties }
    }

    #[must_use]
    pub fn props(&self) -> Props<'_> {
        Props::new(&self.properties)
    }

    /// Level this feature belongs to, decided by its deepest identifier.
    #[must_use]
    pub fn level(&self) -> Level {
        let props = self.props();
        if props.village().is_some() {
            Level::Village
        } else if props.town().is_some() {
            Level::Town
        } else {
            Level::County
        }
    }

    /// Name surfaced to the host on selection.
    ///
    /// Falls back to the deepest identifier when `name` is absent.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let props = self.props();
        props
            .name()
            .or_else(|| props.village())
            .or_else(|| props.town())
            .or_else(|| props.county())
            .unwrap_or("")
    }

    /// Name of the enclosing county, or the display name for a bare county.
    #[must_use]
    pub fn county_name(&self) -> Option<&str> {
        let props = self.props();
        props.county().or_else(|| match self.level() {
            Level::County => props.name(),
            Level::Town | Level::Village => None,
        })
    }

    #[must_use]
    pub fn key(&self) -> FeatureKey {
        let props = self.props();
        FeatureKey {
            level: self.level(),
            county: self.county_name().map(str::to_owned),
            town: props.town().map(str::to_owned),
            village: props.village().map(str::to_owned),
        }
    }
}

/// Ordered features for one rendered level.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Arc<Feature>>,
}

impl FeatureCollection {
    #[must_use]
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features: features.into_iter().map(Arc::new).collect() }
    }

    /// Decode a GeoJSON `FeatureCollection` document.
    ///
    /// Features without polygonal geometry are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is not GeoJSON or not a collection.
    pub fn from_geojson_str(text: &str) -> Result<Self, ParseError> {
        Self::from_geojson(text.parse::<GeoJson>()?)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the value is not a GeoJSON collection.
    pub fn from_json_value(value: Value) -> Result<Self, ParseError> {
        Self::from_geojson(GeoJson::from_json_value(value)?)
    }

    fn from_geojson(doc: GeoJson) -> Result<Self, ParseError> {
        let fc = match doc {
            GeoJson::FeatureCollection(fc) => fc,
            GeoJson::Feature(_) => return Err(ParseError::NotCollection("Feature")),
            GeoJson::Geometry(_) => return Err(ParseError::NotCollection("Geometry")),
        };

        let mut features = Vec::with_capacity(fc.features.len());
        for feature in fc.features {
            let Some(geometry) = feature.geometry else {
                continue;
            };
            let geometry: Geometry<f64> = geometry.value.try_into()?;
            let multi = match geometry {
                Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
                Geometry::MultiPolygon(m) => m,
                _ => continue,
            };
            features.push(Feature::new(multi, feature.properties.unwrap_or_default()));
        }
        Ok(Self::new(features))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<Feature>> {
        self.features.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Feature>> {
        self.features.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
