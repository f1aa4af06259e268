//! Drawing surface: the retained set of shapes currently on screen.
//!
//! The scene mirrors the three SVG groups the map draws into, bottom to top:
//! island boxes, level paths, and the single highlight outline. It holds
//! path data already projected, and each path keeps its feature so the
//! projection can be re-applied during animation without touching offsets.
//!
//! Renderers write here; [`crate::svg`] and [`crate::hit`] only read.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::sync::Arc;

use crate::feature::Feature;
use crate::projection::{Bounds, Projection};

/// Class tag on the highlight outline.
pub const HIGHLIGHT_CLASS: &str = "highlighted";

/// One projected feature outline.
#[derive(Debug, Clone)]
pub struct PathElement {
    /// Position in the rendered collection; `None` for the highlight.
    pub index: Option<usize>,
    pub feature: Arc<Feature>,
    pub class: &'static str,
    /// SVG path data under the current projection.
    pub d: String,
    /// Fixed `translate(dx, dy)` from the offset policy.
    pub translate: (f64, f64),
}

/// Frame drawn around a relocated outlying island.
#[derive(Debug, Clone, PartialEq)]
pub struct IslandBox {
    pub name: String,
    pub bounds: Bounds,
    pub translate: (f64, f64),
}

/// The three drawing groups.
#[derive(Debug, Default)]
pub struct Scene {
    boxes: Vec<IslandBox>,
    map: Vec<PathElement>,
    highlight: Option<PathElement>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- map group ---

    pub fn push_path(&mut self, path: PathElement) {
        self.map.push(path);
    }

    #[must_use]
    pub fn map_paths(&self) -> &[PathElement] {
        &self.map
    }

    /// Remove every level path.
    pub fn clear_map(&mut self) {
        self.map.clear();
    }

    // --- highlight group ---

    /// Replace the highlight outline.
    pub fn set_highlight(&mut self, path: PathElement) {
        self.highlight = Some(path);
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    #[must_use]
    pub fn highlight(&self) -> Option<&PathElement> {
        self.highlight.as_ref()
    }

    // --- boxes group ---

    /// Add a box, dropping any earlier box with the same name.
    pub fn replace_box(&mut self, island: IslandBox) {
        self.boxes.retain(|b| b.name != island.name);
        self.boxes.push(island);
    }

    pub fn clear_boxes(&mut self) {
        self.boxes.clear();
    }

    #[must_use]
    pub fn boxes(&self) -> &[IslandBox] {
        &self.boxes
    }

    // --- whole scene ---

    /// Recompute path data for every path under `projection`.
    ///
    /// Translations and boxes stay as they are.
    pub fn reproject(&mut self, projection: &Projection) {
        for path in self.map.iter_mut().chain(self.highlight.iter_mut()) {
            path.d = projection.path(&path.feature.geometry);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.map.is_empty() && self.highlight.is_none()
    }
}
