//! Drill-down administrative map for Taiwan.
//!
//! The map opens on all counties. Clicking a county zooms onto it and swaps
//! in its towns; clicking a town does the same with its villages. Outlying
//! island counties are drawn displaced toward the main island and framed by a
//! box. This crate holds the whole map core: feature decoding, projection,
//! offsets, the scene, hit-testing, zoom animation, and the drill-down state
//! machine. It compiles to WebAssembly for the browser, where [`engine`]
//! writes the scene into the page as SVG, and runs natively for tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | Drill-down state machine [`controller::DrillDownCore`] |
//! | [`session`] | Async driver tying the core to a source and a host |
//! | [`engine`] | DOM-owning wrapper around the core |
//! | [`source`] | Fetch requests and the HTTP feature source |
//! | [`feature`] | GeoJSON features, levels, property lookup |
//! | [`projection`] | Mercator projection and SVG path generation |
//! | [`offset`] | Outlying-island registry and per-feature offsets |
//! | [`render`] | Draws a collection into the scene |
//! | [`highlight`] | Selected-feature overlay |
//! | [`animate`] | Eased viewport interpolation |
//! | [`scene`] | Retained groups of drawn shapes |
//! | [`hit`] | Point-in-feature hit-testing |
//! | [`svg`] | Scene serialization |
//! | [`config`] | Map configuration |
//! | [`consts`] | Canvas size, scales, and timings |

pub mod animate;
pub mod config;
pub mod consts;
pub mod controller;
pub mod engine;
pub mod feature;
pub mod highlight;
pub mod hit;
pub mod offset;
pub mod projection;
pub mod render;
pub mod scene;
pub mod session;
pub mod source;
pub mod svg;

#[cfg(test)]
mod test_support;
