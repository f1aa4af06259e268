//! Shared numeric constants for the drill-down map.

// ── Canvas ──────────────────────────────────────────────────────

/// Drawing surface width in CSS pixels.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Drawing surface height in CSS pixels.
pub const CANVAS_HEIGHT: f64 = 860.0;

// ── Projection ──────────────────────────────────────────────────

/// Initial projection center as (longitude, latitude) in degrees.
pub const INITIAL_CENTER: (f64, f64) = (120.0, 24.0);

/// Initial Mercator scale (pixels per radian).
pub const INITIAL_SCALE: f64 = 10_000.0;

/// Scale used when zooming onto a clicked county.
pub const COUNTY_ZOOM_SCALE: f64 = 20_000.0;

/// Scale used when zooming onto a clicked town.
pub const TOWN_ZOOM_SCALE: f64 = 100_000.0;

/// Decimal places emitted in SVG path data.
pub const PATH_PRECISION: usize = 3;

// ── Animation ───────────────────────────────────────────────────

/// Duration of a viewport zoom, in milliseconds.
pub const ZOOM_DURATION_MS: f64 = 800.0;
