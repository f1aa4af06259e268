//! Async session: drives a [`DrillDownCore`] against a feature source and a host.
//!
//! The core only describes work as [`Action`]s. `MapSession` carries it out:
//! fetches go to the [`FeatureSource`] and their outcome is fed straight back
//! into the core; everything else is forwarded to the [`MapHost`]. Actions run
//! in the order the core emitted them, so a click repaints the highlight and
//! reports the region name before its fetch is awaited.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::VecDeque;

use crate::config::MapConfig;
use crate::controller::{Action, DrillDownCore};
use crate::projection::Point;
use crate::scene::Scene;
use crate::source::FeatureSource;

/// Receives the visible effects of the map.
pub trait MapHost {
    /// A feature was clicked; `name` is its display name.
    fn region_selected(&mut self, name: &str);

    /// The scene changed.
    fn render(&mut self, _scene: &Scene) {}

    /// A zoom is running; call [`MapSession::frame`] on the next frame.
    fn request_frame(&mut self) {}
}

/// A drill-down map wired to its data and its display.
pub struct MapSession<S, H> {
    core: DrillDownCore,
    source: S,
    host: H,
}

impl<S: FeatureSource, H: MapHost> MapSession<S, H> {
    #[must_use]
    pub fn new(config: MapConfig, source: S, host: H) -> Self {
        Self { core: DrillDownCore::new(config), source, host }
    }

    /// Load and draw the county level.
    pub async fn load(&mut self) {
        let actions = self.core.start();
        self.run(actions).await;
    }

    pub async fn click_feature(&mut self, index: usize) {
        let actions = self.core.click_feature(index);
        self.run(actions).await;
    }

    pub async fn click_at(&mut self, screen_pt: Point) {
        let actions = self.core.click_at(screen_pt);
        self.run(actions).await;
    }

    /// Return to the county level and reload it.
    pub async fn reset(&mut self) {
        let actions = self.core.reset();
        self.run(actions).await;
    }

    /// Advance a running zoom to `now` (milliseconds).
    pub async fn frame(&mut self, now: f64) {
        let actions = self.core.tick(now);
        self.run(actions).await;
    }

    async fn run(&mut self, actions: Vec<Action>) {
        let mut queue = VecDeque::from(actions);
        while let Some(action) = queue.pop_front() {
            match action {
                Action::Fetch { ticket, request } => {
                    let result = self.source.fetch(&request).await;
                    queue.extend(self.core.apply_fetch(ticket, result));
                }
                Action::RegionSelected(name) => self.host.region_selected(&name),
                Action::RenderNeeded => self.host.render(self.core.scene()),
                Action::RequestFrame => self.host.request_frame(),
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn core(&self) -> &DrillDownCore {
        &self.core
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}
