//! Fixed-offset placement for outlying-island counties.
//!
//! Offsets are absolute canvas positions: the canvas center means "leave the
//! feature where the projection puts it". A resolved offset is cached per
//! [`FeatureKey`] so the highlight outline is placed exactly like the base
//! path it emphasizes.

#[cfg(test)]
#[path = "offset_test.rs"]
mod offset_test;

use std::collections::HashMap;

use crate::config::MapConfig;
use crate::feature::{Feature, FeatureKey};

/// Absolute placement of a feature's render origin, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// County name → fixed offset, resolved against the canvas center. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct OutlyingRegionRegistry {
    regions: HashMap<String, Offset>,
}

impl OutlyingRegionRegistry {
    #[must_use]
    pub fn from_config(config: &MapConfig) -> Self {
        let (cx, cy) = config.canvas_center();
        let regions = config
            .outlying_regions
            .iter()
            .map(|r| (r.name.clone(), Offset::new(cx + r.dx, cy + r.dy)))
            .collect();
        Self { regions }
    }

    #[must_use]
    pub fn get(&self, county: &str) -> Option<Offset> {
        self.regions.get(county).copied()
    }

    #[must_use]
    pub fn contains(&self, county: &str) -> bool {
        self.regions.contains_key(county)
    }
}

/// Resolves and remembers per-feature offsets.
#[derive(Debug, Clone)]
pub struct OffsetPolicy {
    registry: OutlyingRegionRegistry,
    center: Offset,
    cache: HashMap<FeatureKey, Offset>,
}

impl OffsetPolicy {
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        let (cx, cy) = config.canvas_center();
        Self {
            registry: OutlyingRegionRegistry::from_config(config),
            center: Offset::new(cx, cy),
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &OutlyingRegionRegistry {
        &self.registry
    }

    /// The "no displacement" offset.
    #[must_use]
    pub fn center(&self) -> Offset {
        self.center
    }

    /// Net `translate(dx, dy)` for an offset on this canvas.
    #[must_use]
    pub fn translation(&self, offset: Offset) -> (f64, f64) {
        (offset.x - self.center.x, offset.y - self.center.y)
    }

    /// Offset for a county name without touching the cache.
    #[must_use]
    pub fn offset_for_county(&self, county: Option<&str>) -> Offset {
        county
            .and_then(|name| self.registry.get(name))
            .unwrap_or(self.center)
    }

    /// Resolve the offset for `feature` and cache it under its key.
    ///
    /// The feature's own county name wins; `county_context` covers features
    /// whose properties omit their parent county.
    pub fn offset_for(&mut self, feature: &Feature, county_context: Option<&str>) -> Offset {
        let key = feature.key();
        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }
        let offset = self.offset_for_county(feature.county_name().or(county_context));
        self.cache.insert(key, offset);
        offset
    }

    /// Previously resolved offset, if the feature has been rendered.
    #[must_use]
    pub fn cached(&self, key: &FeatureKey) -> Option<Offset> {
        self.cache.get(key).copied()
    }

    /// Forget every resolved offset.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
