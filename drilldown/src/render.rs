//! Level rendering: turns a feature collection into scene paths.
//!
//! This module writes to the [`Scene`] only. It never clears the map group
//! itself; the controller empties it before drawing a new level.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::sync::Arc;

use crate::feature::{Feature, FeatureCollection, Level};
use crate::offset::OffsetPolicy;
use crate::projection::Projection;
use crate::scene::{IslandBox, PathElement, Scene};

/// Draw every feature of `collection` at `level`.
///
/// `county_context` names the county the level belongs to (for towns and
/// villages) and is used when a feature's properties omit it.
pub fn render_level(
    scene: &mut Scene,
    collection: &FeatureCollection,
    level: Level,
    projection: &Projection,
    policy: &mut OffsetPolicy,
    county_context: Option<&str>,
) {
    for (index, feature) in collection.iter().enumerate() {
        let offset = policy.offset_for(feature, county_context);
        let translate = policy.translation(offset);

        if feature.level() == Level::County && policy.registry().contains(feature.display_name()) {
            draw_island_box(scene, feature, projection, translate);
        }

        scene.push_path(PathElement {
            index: Some(index),
            feature: Arc::clone(feature),
            class: level.class(),
            d: projection.path(&feature.geometry),
            translate,
        });
    }
}

fn draw_island_box(scene: &mut Scene, feature: &Feature, projection: &Projection, translate: (f64, f64)) {
    let Some(bounds) = projection.bounds(&feature.geometry) else {
        return;
    };
    scene.replace_box(IslandBox { name: feature.display_name().to_owned(), bounds, translate });
}
