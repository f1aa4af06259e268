#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::projection::{Point, Projection};
use crate::scene::{PathElement, Scene};

/// Index of the topmost level path under `screen_pt`, if any.
///
/// Paths later in the map group are drawn above earlier ones, so they are
/// tested first. The highlight group never takes clicks.
#[must_use]
pub fn hit_feature(scene: &Scene, projection: &Projection, screen_pt: Point) -> Option<usize> {
    scene
        .map_paths()
        .iter()
        .rev()
        .find(|path| contains(path, projection, screen_pt))
        .and_then(|path| path.index)
}

/// Even-odd containment against every ring of the path's feature.
fn contains(path: &PathElement, projection: &Projection, screen_pt: Point) -> bool {
    // Undo the offset translation instead of shifting every vertex.
    let pt = Point::new(screen_pt.x - path.translate.0, screen_pt.y - path.translate.1);
    let mut inside = false;
    for ring in projection.rings(&path.feature.geometry) {
        if ring_crossings_odd(&ring, pt) {
            inside = !inside;
        }
    }
    inside
}

fn ring_crossings_odd(ring: &[Point], pt: Point) -> bool {
    let mut odd = false;
    let Some(mut prev) = ring.last().copied() else {
        return false;
    };
    for &cur in ring {
        if (cur.y > pt.y) != (prev.y > pt.y) {
            let x_at = cur.x + (pt.y - cur.y) * (prev.x - cur.x) / (prev.y - cur.y);
            if pt.x < x_at {
                odd = !odd;
            }
        }
        prev = cur;
    }
    odd
}
