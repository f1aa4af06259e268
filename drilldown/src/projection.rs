//! Mercator projection from (longitude, latitude) degrees to canvas pixels.
//!
//! Matches the conventions of a d3 `geoMercator` with no rotation: the
//! projection center maps to `translate`, `scale` is pixels per radian, and
//! screen y grows downward.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use std::f64::consts::FRAC_PI_4;

use geo::{Coord, LineString, MultiPolygon};

use crate::config::MapConfig;
use crate::consts::PATH_PRECISION;

/// A point in canvas space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Projection center and scale: the part of the map in view and its zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// (longitude, latitude) in degrees.
    pub center: (f64, f64),
    pub scale: f64,
}

/// Axis-aligned box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Mercator projection state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    viewport: Viewport,
    translate: Point,
}

impl Projection {
    /// Projection at the configured initial center and scale, with the center
    /// translated to the canvas midpoint.
    #[must_use]
    pub fn initial(config: &MapConfig) -> Self {
        let (tx, ty) = config.canvas_center();
        Self {
            viewport: Viewport { center: config.initial_center, scale: config.initial_scale },
            translate: Point::new(tx, ty),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Project one geographic coordinate (x = longitude, y = latitude).
    #[must_use]
    pub fn project(&self, coord: Coord<f64>) -> Point {
        let (cx, cy) = mercator(self.viewport.center.0, self.viewport.center.1);
        let (mx, my) = mercator(coord.x, coord.y);
        let k = self.viewport.scale;
        Point::new(self.translate.x + k * (mx - cx), self.translate.y - k * (my - cy))
    }

    /// SVG path data for a multipolygon: one closed subpath per ring.
    #[must_use]
    pub fn path(&self, geometry: &MultiPolygon<f64>) -> String {
        let mut d = String::new();
        for polygon in geometry {
            self.write_ring(&mut d, polygon.exterior());
            for hole in polygon.interiors() {
                self.write_ring(&mut d, hole);
            }
        }
        d
    }

    fn write_ring(&self, d: &mut String, ring: &LineString<f64>) {
        // Closed rings repeat the first coordinate; `Z` already closes the subpath.
        let coords = if ring.is_closed() && ring.0.len() > 1 {
            &ring.0[..ring.0.len() - 1]
        } else {
            &ring.0[..]
        };
        for (i, coord) in coords.iter().enumerate() {
            let p = self.project(*coord);
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd}{:.prec$},{:.prec$}", p.x, p.y, prec = PATH_PRECISION));
        }
        if !coords.is_empty() {
            d.push('Z');
        }
    }

    /// Projected rings, exterior first, for hit testing.
    #[must_use]
    pub fn rings(&self, geometry: &MultiPolygon<f64>) -> Vec<Vec<Point>> {
        geometry
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
            .map(|ring| ring.coords().map(|c| self.project(*c)).collect())
            .collect()
    }

    /// Canvas-space bounding box of the projected geometry.
    #[must_use]
    pub fn bounds(&self, geometry: &MultiPolygon<f64>) -> Option<Bounds> {
        let mut points = geometry
            .iter()
            .flat_map(|polygon| polygon.exterior().coords())
            .map(|c| self.project(*c));
        let first = points.next()?;
        let init = Bounds { min: first, max: first };
        Some(points.fold(init, |b, p| Bounds {
            min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }
}

/// Raw spherical Mercator in radians.
fn mercator(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let lambda = lon_deg.to_radians();
    let phi = lat_deg.to_radians();
    (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
}
