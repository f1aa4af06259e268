//! Selection highlighting: one emphasized outline for the last-clicked feature.

#[cfg(test)]
#[path = "highlight_test.rs"]
mod highlight_test;

use std::sync::Arc;

use crate::feature::Feature;
use crate::offset::OffsetPolicy;
use crate::projection::Projection;
use crate::scene::{HIGHLIGHT_CLASS, PathElement, Scene};

/// Replace the highlight outline with one for `feature`.
///
/// Uses the offset cached when the feature was rendered, so the outline sits
/// exactly on its base path; a feature never rendered gets no displacement.
pub fn highlight(scene: &mut Scene, feature: &Arc<Feature>, projection: &Projection, policy: &OffsetPolicy) {
    let offset = policy.cached(&feature.key()).unwrap_or(policy.center());
    scene.set_highlight(PathElement {
        index: None,
        feature: Arc::clone(feature),
        class: HIGHLIGHT_CLASS,
        d: projection.path(&feature.geometry),
        translate: policy.translation(offset),
    });
}

/// Remove the highlight outline, if any.
pub fn clear(scene: &mut Scene) {
    scene.clear_highlight();
}
