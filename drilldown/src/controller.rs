//! Drill-down controller: the county → town → village state machine.
//!
//! `DrillDownCore` owns every piece of mutable map state (level, projection,
//! animation, offsets, scene) and changes it only through its methods. It
//! performs no I/O: methods return [`Action`]s for the host, and fetch
//! results come back through [`DrillDownCore::apply_fetch`].
//!
//! TRANSITIONS
//! ===========
//! A click always highlights the feature and reports its name first. Then:
//! - county feature → fetch its towns, zoom to `county_zoom_scale`
//! - town feature → fetch its villages, zoom to `town_zoom_scale`
//! - village feature → nothing more; villages are the last level
//!
//! The level only advances when the fetch succeeds. A failed fetch is logged
//! and leaves the current level, collection, and highlight in place.
//!
//! Only the newest outstanding fetch is honoured: a response whose ticket
//! was superseded by a later click or a reset is dropped.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::Arc;

use geo::Centroid;

use crate::animate::Animator;
use crate::config::MapConfig;
use crate::feature::{Feature, FeatureCollection, Level};
use crate::offset::OffsetPolicy;
use crate::projection::{Point, Projection, Viewport};
use crate::scene::Scene;
use crate::source::{FetchRequest, SourceError};
use crate::{highlight, hit, render};

/// Identifies one issued fetch.
pub type Ticket = u64;

/// Work the host must carry out after a controller call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Resolve `request` and pass the outcome to `apply_fetch` with `ticket`.
    Fetch { ticket: Ticket, request: FetchRequest },
    /// A feature was clicked; carries its display name.
    RegionSelected(String),
    /// The scene changed and should be repainted.
    RenderNeeded,
    /// An animation is running; call `tick` on the next frame.
    RequestFrame,
}

/// A fetch in flight and what to do when it lands.
#[derive(Debug, Clone)]
struct PendingFetch {
    ticket: Ticket,
    request: FetchRequest,
    target: Level,
    county_context: Option<String>,
    /// Feature to zoom onto and the scale to reach.
    zoom: Option<(Arc<Feature>, f64)>,
}

/// Core controller state: everything that does not depend on the DOM.
///
/// Separated from [`crate::engine::Engine`] so it can be tested without a
/// browser.
#[derive(Debug)]
pub struct DrillDownCore {
    config: MapConfig,
    level: Level,
    projection: Projection,
    animator: Animator,
    policy: OffsetPolicy,
    scene: Scene,
    collection: FeatureCollection,
    county_context: Option<String>,
    selected: Option<String>,
    pending: Option<PendingFetch>,
    next_ticket: Ticket,
}

impl Default for DrillDownCore {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl DrillDownCore {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self {
            level: Level::County,
            projection: Projection::initial(&config),
            animator: Animator::new(),
            policy: OffsetPolicy::new(&config),
            scene: Scene::new(),
            collection: FeatureCollection::default(),
            county_context: None,
            selected: None,
            pending: None,
            next_ticket: 0,
            config,
        }
    }

    // --- Lifecycle ---

    /// Request the root county collection onto an empty canvas.
    pub fn start(&mut self) -> Vec<Action> {
        vec![self.issue(FetchRequest::Counties, Level::County, None, None)]
    }

    /// Return to the root county level.
    ///
    /// Drops the highlight, every drawn shape, any running zoom, cached
    /// offsets, and outstanding fetches, recreates the projection, then asks
    /// for the county collection again. The host's own record of the selected
    /// region is left to the host.
    pub fn reset(&mut self) -> Vec<Action> {
        highlight::clear(&mut self.scene);
        self.scene.clear_map();
        self.scene.clear_boxes();
        self.animator.cancel();
        self.projection = Projection::initial(&self.config);
        self.policy.clear_cache();
        self.collection = FeatureCollection::default();
        self.level = Level::County;
        self.county_context = None;
        self.selected = None;
        self.pending = None;
        tracing::debug!("map reset to county level");

        vec![Action::RenderNeeded, self.issue(FetchRequest::Counties, Level::County, None, None)]
    }

    // --- Input ---

    /// Handle a click on the rendered feature at `index`.
    pub fn click_feature(&mut self, index: usize) -> Vec<Action> {
        let Some(feature) = self.collection.get(index).cloned() else {
            tracing::debug!(index, "click on unknown feature ignored");
            return Vec::new();
        };

        highlight::highlight(&mut self.scene, &feature, &self.projection, &self.policy);
        let name = feature.display_name().to_owned();
        self.selected = Some(name.clone());
        let mut actions = vec![Action::RenderNeeded, Action::RegionSelected(name)];

        let Some(target) = feature.level().child() else {
            tracing::debug!(village = feature.display_name(), "village level reached; no further drill-down");
            return actions;
        };

        let props = feature.props();
        let next = match feature.level() {
            Level::County => feature.county_name().map(|county| {
                let request = FetchRequest::Towns { county: county.to_owned() };
                (request, Some(county.to_owned()), self.config.county_zoom_scale)
            }),
            Level::Town => props.town().map(|town| {
                let request = FetchRequest::Villages { town: town.to_owned() };
                let context = feature.county_name().map(str::to_owned).or_else(|| self.county_context.clone());
                (request, context, self.config.town_zoom_scale)
            }),
            Level::Village => None,
        };

        if let Some((request, context, scale)) = next {
            let zoom = Some((Arc::clone(&feature), scale));
            actions.push(self.issue(request, target, context, zoom));
        }
        actions
    }

    /// Handle a click at a canvas position.
    pub fn click_at(&mut self, screen_pt: Point) -> Vec<Action> {
        match hit::hit_feature(&self.scene, &self.projection, screen_pt) {
            Some(index) => self.click_feature(index),
            None => Vec::new(),
        }
    }

    // --- Data inputs ---

    /// Deliver the outcome of the fetch identified by `ticket`.
    pub fn apply_fetch(&mut self, ticket: Ticket, result: Result<FeatureCollection, SourceError>) -> Vec<Action> {
        let Some(pending) = self.pending.take_if(|p| p.ticket == ticket) else {
            tracing::debug!(ticket, "discarding superseded fetch response");
            return Vec::new();
        };

        let collection = match result {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!(error = %e, request = ?pending.request, level = ?self.level, "feature fetch failed; staying on current level");
                return Vec::new();
            }
        };

        tracing::info!(level = ?pending.target, features = collection.len(), "rendering level");
        self.level = pending.target;
        self.county_context = pending.county_context;
        self.scene.clear_map();
        render::render_level(
            &mut self.scene,
            &collection,
            self.level,
            &self.projection,
            &mut self.policy,
            self.county_context.as_deref(),
        );
        self.collection = collection;

        let mut actions = vec![Action::RenderNeeded];
        if let Some((feature, scale)) = pending.zoom {
            if self.zoom_to(&feature, scale) {
                actions.push(Action::RequestFrame);
            }
        }
        actions
    }

    /// Advance the running zoom to timestamp `now` (milliseconds).
    pub fn tick(&mut self, now: f64) -> Vec<Action> {
        let Some(frame) = self.animator.frame(now) else {
            return Vec::new();
        };
        self.projection.set_viewport(frame.viewport);
        self.scene.reproject(&self.projection);
        if frame.done {
            vec![Action::RenderNeeded]
        } else {
            vec![Action::RenderNeeded, Action::RequestFrame]
        }
    }

    /// Start zooming onto `feature`'s centroid at `scale`.
    ///
    /// Replaces any zoom in flight. Returns `false` when no animation was
    /// scheduled: the feature has no area, or the viewport is already there.
    pub fn zoom_to(&mut self, feature: &Feature, scale: f64) -> bool {
        let Some(centroid) = feature.geometry.centroid() else {
            return false;
        };
        let target = Viewport { center: (centroid.x(), centroid.y()), scale };
        let started = self
            .animator
            .start(self.projection.viewport(), target, self.config.zoom_duration_ms);
        if started {
            self.scene.clear_boxes();
        }
        started
    }

    fn issue(
        &mut self,
        request: FetchRequest,
        target: Level,
        county_context: Option<String>,
        zoom: Option<(Arc<Feature>, f64)>,
    ) -> Action {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        if let Some(prev) = &self.pending {
            tracing::debug!(superseded = prev.ticket, ticket, "new fetch supersedes outstanding one");
        }
        self.pending = Some(PendingFetch { ticket, request: request.clone(), target, county_context, zoom });
        Action::Fetch { ticket, request }
    }

    // --- Queries ---

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.projection.viewport()
    }

    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Display name of the last clicked feature since the last reset.
    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}
