//! Browser-facing map engine.
//!
//! `Engine` wraps [`DrillDownCore`] and owns the container element the SVG
//! scene is written into. Every input returns the core's [`Action`]s
//! unchanged; the embedding page resolves fetches (or uses
//! [`crate::session::MapSession`]) and calls [`Engine::render`] on
//! `RenderNeeded`.
//!
//! CONSUMERS
//! =========
//! Nothing in this workspace constructs `Engine` or `DomHost`. They are the
//! Rust API for a WebAssembly front-end crate that owns the page; this crate
//! exports no `wasm_bindgen` bindings, so a plain JS page cannot call it
//! directly.

use web_sys::Element;

use crate::config::MapConfig;
use crate::controller::{Action, DrillDownCore, Ticket};
use crate::feature::{FeatureCollection, Level};
use crate::projection::{Point, Viewport};
use crate::scene::Scene;
use crate::session::MapHost;
use crate::source::SourceError;
use crate::svg;

/// The full map engine. Wraps `DrillDownCore` and owns the DOM container.
pub struct Engine {
    container: Element,
    label: Option<Element>,
    pub core: DrillDownCore,
}

impl Engine {
    #[must_use]
    pub fn new(container: Element, config: MapConfig) -> Self {
        Self { container, label: None, core: DrillDownCore::new(config) }
    }

    /// Element whose text shows the selected region's name.
    #[must_use]
    pub fn with_label(mut self, label: Element) -> Self {
        self.label = Some(label);
        self
    }

    // --- Delegated lifecycle ---

    pub fn start(&mut self) -> Vec<Action> {
        self.core.start()
    }

    /// Reset to the county level and clear the name label.
    pub fn reset(&mut self) -> Vec<Action> {
        if let Some(label) = &self.label {
            label.set_text_content(None);
        }
        self.core.reset()
    }

    // --- Delegated inputs ---

    pub fn click_feature(&mut self, index: usize) -> Vec<Action> {
        let actions = self.core.click_feature(index);
        self.show_selection(&actions);
        actions
    }

    pub fn click_at(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.click_at(screen_pt);
        self.show_selection(&actions);
        actions
    }

    pub fn apply_fetch(&mut self, ticket: Ticket, result: Result<FeatureCollection, SourceError>) -> Vec<Action> {
        self.core.apply_fetch(ticket, result)
    }

    pub fn tick(&mut self, now: f64) -> Vec<Action> {
        self.core.tick(now)
    }

    fn show_selection(&self, actions: &[Action]) {
        let Some(label) = &self.label else { return };
        for action in actions {
            if let Action::RegionSelected(name) = action {
                label.set_text_content(Some(name));
            }
        }
    }

    // --- Render ---

    /// Write the current scene into the container.
    pub fn render(&self) {
        let config = self.core.config();
        self.container
            .set_inner_html(&svg::to_svg(self.core.scene(), config.width, config.height));
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn level(&self) -> Level {
        self.core.level()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport()
    }
}

/// Lets a [`crate::session::MapSession`] drive the DOM directly.
pub struct DomHost {
    container: Element,
    label: Option<Element>,
    width: f64,
    height: f64,
}

impl DomHost {
    #[must_use]
    pub fn new(container: Element, label: Option<Element>, config: &MapConfig) -> Self {
        Self { container, label, width: config.width, height: config.height }
    }
}

impl MapHost for DomHost {
    fn region_selected(&mut self, name: &str) {
        if let Some(label) = &self.label {
            label.set_text_content(Some(name));
        }
    }

    fn render(&mut self, scene: &Scene) {
        self.container
            .set_inner_html(&svg::to_svg(scene, self.width, self.height));
    }
}
