#![allow(clippy::float_cmp)]

use geo::coord;

use super::*;
use crate::feature::ParseError;
use crate::test_support::{counties, county, towns_of, villages_of};

// =============================================================
// Helpers
// =============================================================

fn fetches(actions: &[Action]) -> Vec<(Ticket, FetchRequest)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Fetch { ticket, request } => Some((*ticket, request.clone())),
            _ => None,
        })
        .collect()
}

fn only_fetch(actions: &[Action]) -> (Ticket, FetchRequest) {
    let mut all = fetches(actions);
    assert_eq!(all.len(), 1, "expected exactly one fetch in {actions:?}");
    all.remove(0)
}

fn has_render_needed(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RenderNeeded))
}

fn has_request_frame(actions: &[Action]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RequestFrame))
}

fn selected(actions: &[Action]) -> Option<String> {
    actions.iter().find_map(|a| match a {
        Action::RegionSelected(name) => Some(name.clone()),
        _ => None,
    })
}

fn index_of(core: &DrillDownCore, name: &str) -> usize {
    core.collection()
        .iter()
        .position(|f| f.display_name() == name)
        .unwrap()
}

/// Core with the county level loaded.
fn loaded() -> DrillDownCore {
    let mut core = DrillDownCore::default();
    let (ticket, _) = only_fetch(&core.start());
    core.apply_fetch(ticket, Ok(counties()));
    core
}

/// Run the running zoom to completion.
fn finish_animation(core: &mut DrillDownCore) {
    core.tick(0.0);
    core.tick(10_000.0);
    assert!(!core.is_animating());
}

/// Core drilled into the towns of 臺北市.
fn at_towns() -> DrillDownCore {
    let mut core = loaded();
    let i = index_of(&core, "臺北市");
    let (ticket, _) = only_fetch(&core.click_feature(i));
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    finish_animation(&mut core);
    core
}

fn network_error() -> SourceError {
    SourceError::Network("connection refused".into())
}

// =============================================================
// Construction and start
// =============================================================

#[test]
fn new_core_is_at_county_with_empty_scene() {
    let core = DrillDownCore::default();
    assert_eq!(core.level(), Level::County);
    assert!(core.scene().is_empty());
    assert!(core.collection().is_empty());
    assert!(core.selected_name().is_none());
    assert_eq!(core.viewport(), Viewport { center: (120.0, 24.0), scale: 10_000.0 });
}

#[test]
fn start_requests_counties() {
    let mut core = DrillDownCore::default();
    let (_, request) = only_fetch(&core.start());
    assert_eq!(request, FetchRequest::Counties);
    assert!(core.is_loading());
}

#[test]
fn county_load_renders_without_zoom() {
    let mut core = DrillDownCore::default();
    let (ticket, _) = only_fetch(&core.start());
    let actions = core.apply_fetch(ticket, Ok(counties()));
    assert!(has_render_needed(&actions));
    assert!(!has_request_frame(&actions));
    assert_eq!(core.scene().map_paths().len(), 3);
    assert!(core.scene().map_paths().iter().all(|p| p.class == "county"));
    assert!(!core.is_loading());
}

#[test]
fn county_load_failure_leaves_empty_canvas() {
    let mut core = DrillDownCore::default();
    let (ticket, _) = only_fetch(&core.start());
    let actions = core.apply_fetch(ticket, Err(SourceError::Status { status: 500 }));
    assert!(actions.is_empty());
    assert!(core.scene().is_empty());
    assert_eq!(core.level(), Level::County);
}

// =============================================================
// County → town
// =============================================================

#[test]
fn county_click_highlights_notifies_then_fetches_towns() {
    let mut core = loaded();
    let i = index_of(&core, "臺北市");
    let actions = core.click_feature(i);

    assert_eq!(actions[0], Action::RenderNeeded);
    assert_eq!(actions[1], Action::RegionSelected("臺北市".into()));
    let (_, request) = only_fetch(&actions);
    assert_eq!(request, FetchRequest::Towns { county: "臺北市".into() });
    assert_eq!(core.scene().highlight().map(|h| h.feature.display_name()), Some("臺北市"));
    assert_eq!(core.selected_name(), Some("臺北市"));
}

#[test]
fn level_does_not_advance_before_fetch_lands() {
    let mut core = loaded();
    core.click_feature(0);
    assert_eq!(core.level(), Level::County);
    assert_eq!(core.scene().map_paths().len(), 3);
}

#[test]
fn town_fetch_success_replaces_level_and_zooms() {
    let mut core = loaded();
    let i = index_of(&core, "臺北市");
    let (ticket, _) = only_fetch(&core.click_feature(i));
    let actions = core.apply_fetch(ticket, Ok(towns_of("臺北市")));

    assert!(has_render_needed(&actions));
    assert!(has_request_frame(&actions));
    assert_eq!(core.level(), Level::Town);
    assert_eq!(core.scene().map_paths().len(), 2);
    assert!(core.scene().map_paths().iter().all(|p| p.class == "town"));
    assert!(core.is_animating());
}

#[test]
fn zoom_lands_on_clicked_county_centroid_at_county_scale() {
    let mut core = at_towns();
    let vp = core.viewport();
    assert!((vp.center.0 - 121.5).abs() < 1e-9);
    assert!((vp.center.1 - 25.1).abs() < 1e-9);
    assert_eq!(vp.scale, 20_000.0);
}

#[test]
fn highlight_survives_level_change() {
    let core = at_towns();
    assert_eq!(core.scene().highlight().map(|h| h.feature.display_name()), Some("臺北市"));
}

#[test]
fn town_fetch_failure_stays_at_county() {
    let mut core = loaded();
    let i = index_of(&core, "臺中市");
    let (ticket, _) = only_fetch(&core.click_feature(i));
    let actions = core.apply_fetch(ticket, Err(network_error()));

    assert!(actions.is_empty());
    assert_eq!(core.level(), Level::County);
    assert_eq!(core.scene().map_paths().len(), 3);
    assert!(core.scene().map_paths().iter().all(|p| p.class == "county"));
    // Highlight was applied before the fetch and stays.
    assert_eq!(core.scene().highlight().map(|h| h.feature.display_name()), Some("臺中市"));
    assert!(!core.is_animating());
}

#[test]
fn data_failure_is_handled_like_network_failure() {
    let mut core = loaded();
    let (ticket, _) = only_fetch(&core.click_feature(0));
    let bad = FeatureCollection::from_geojson_str("{}").map_err(SourceError::from);
    assert!(matches!(bad, Err(SourceError::Data(ParseError::GeoJson(_)))));
    core.apply_fetch(ticket, bad);
    assert_eq!(core.level(), Level::County);
    assert_eq!(core.collection().len(), 3);
}

#[test]
fn failed_drill_can_be_retried_by_clicking_again() {
    let mut core = loaded();
    let (ticket, _) = only_fetch(&core.click_feature(0));
    core.apply_fetch(ticket, Err(network_error()));
    let (ticket, request) = only_fetch(&core.click_feature(0));
    assert_eq!(request, FetchRequest::Towns { county: "臺北市".into() });
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    assert_eq!(core.level(), Level::Town);
}

// =============================================================
// Town → village → terminal
// =============================================================

#[test]
fn town_click_fetches_villages_and_zooms_to_town_scale() {
    let mut core = at_towns();
    let i = index_of(&core, "乙區");
    let actions = core.click_feature(i);
    assert_eq!(selected(&actions).as_deref(), Some("乙區"));
    let (ticket, request) = only_fetch(&actions);
    assert_eq!(request, FetchRequest::Villages { town: "乙區".into() });

    core.apply_fetch(ticket, Ok(villages_of("臺北市", "乙區")));
    assert_eq!(core.level(), Level::Village);
    finish_animation(&mut core);
    assert_eq!(core.viewport().scale, 100_000.0);
}

#[test]
fn full_drill_issues_two_fetches_in_order() {
    let mut core = loaded();
    let mut issued = Vec::new();

    let actions = core.click_feature(index_of(&core, "臺北市"));
    let (ticket, request) = only_fetch(&actions);
    issued.push(request);
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));

    let actions = core.click_feature(index_of(&core, "甲區"));
    let (ticket, request) = only_fetch(&actions);
    issued.push(request);
    core.apply_fetch(ticket, Ok(villages_of("臺北市", "甲區")));

    assert_eq!(
        issued,
        vec![FetchRequest::Towns { county: "臺北市".into() }, FetchRequest::Villages { town: "甲區".into() }]
    );
    assert_eq!(core.level(), Level::Village);
}

#[test]
fn village_click_never_fetches_or_changes_level() {
    let mut core = at_towns();
    let (ticket, _) = only_fetch(&core.click_feature(0));
    core.apply_fetch(ticket, Ok(villages_of("臺北市", "甲區")));
    finish_animation(&mut core);
    let viewport = core.viewport();

    for i in 0..core.collection().len() {
        let actions = core.click_feature(i);
        assert!(fetches(&actions).is_empty());
        assert!(selected(&actions).is_some());
        assert_eq!(core.level(), Level::Village);
    }
    assert!(!core.is_loading());
    assert!(!core.is_animating());
    assert_eq!(core.viewport(), viewport);
    assert_eq!(core.scene().highlight().map(|h| h.feature.display_name()), Some("二里"));
}

#[test]
fn click_on_unknown_index_is_ignored() {
    let mut core = loaded();
    assert!(core.click_feature(99).is_empty());
    assert!(core.scene().highlight().is_none());
}

#[test]
fn click_at_routes_through_hit_test() {
    let mut core = loaded();
    let pt = core.projection().project(coord! { x: 120.7, y: 24.2 });
    let actions = core.click_at(pt);
    assert_eq!(selected(&actions).as_deref(), Some("臺中市"));
}

#[test]
fn click_at_empty_space_does_nothing() {
    let mut core = loaded();
    assert!(core.click_at(Point::new(-500.0, -500.0)).is_empty());
}

// =============================================================
// Outlying islands
// =============================================================

#[test]
fn penghu_towns_use_registered_offset_and_box_is_single() {
    let mut core = loaded();
    assert_eq!(core.scene().boxes().iter().filter(|b| b.name == "澎湖縣").count(), 1);

    let i = index_of(&core, "澎湖縣");
    let (ticket, request) = only_fetch(&core.click_feature(i));
    assert_eq!(request, FetchRequest::Towns { county: "澎湖縣".into() });
    core.apply_fetch(ticket, Ok(towns_of("澎湖縣")));

    let registered = core.config().outlying_regions.iter().find(|r| r.name == "澎湖縣").unwrap();
    let expected = (registered.dx, registered.dy);
    assert!(core.scene().map_paths().iter().all(|p| p.translate == expected));

    // Re-rendering counties keeps exactly one box for the island.
    let (ticket, _) = only_fetch(&core.reset());
    core.apply_fetch(ticket, Ok(counties()));
    let (ticket, _) = only_fetch(&core.reset());
    core.apply_fetch(ticket, Ok(counties()));
    assert_eq!(core.scene().boxes().iter().filter(|b| b.name == "澎湖縣").count(), 1);
}

#[test]
fn kinmen_towns_are_shifted_by_its_registered_offset() {
    let mut core = DrillDownCore::default();
    let (ticket, _) = only_fetch(&core.start());
    core.apply_fetch(ticket, Ok(FeatureCollection::new(vec![county("金門縣", 118.3, 24.4)])));
    assert_eq!(core.scene().map_paths()[0].translate, (80.0, 0.0));

    let (ticket, _) = only_fetch(&core.click_feature(0));
    core.apply_fetch(ticket, Ok(towns_of("金門縣")));
    assert_eq!(core.level(), Level::Town);
    assert_eq!(core.scene().map_paths().len(), 2);
    assert!(core.scene().map_paths().iter().all(|p| p.translate == (80.0, 0.0)));
    assert_eq!(core.scene().highlight().map(|h| h.translate), Some((80.0, 0.0)));
}

#[test]
fn zoom_clears_island_boxes() {
    let mut core = loaded();
    assert!(!core.scene().boxes().is_empty());
    let (ticket, _) = only_fetch(&core.click_feature(index_of(&core, "臺北市")));
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    assert!(core.scene().boxes().is_empty());
}

// =============================================================
// Animation
// =============================================================

#[test]
fn tick_without_animation_does_nothing() {
    let mut core = loaded();
    assert!(core.tick(16.0).is_empty());
}

#[test]
fn tick_reprojects_paths_but_keeps_translations() {
    let mut core = loaded();
    let (ticket, _) = only_fetch(&core.click_feature(index_of(&core, "臺北市")));
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    let before: Vec<(String, (f64, f64))> = core
        .scene()
        .map_paths()
        .iter()
        .map(|p| (p.d.clone(), p.translate))
        .collect();

    core.tick(0.0);
    let actions = core.tick(400.0);
    assert!(has_render_needed(&actions));
    assert!(has_request_frame(&actions));
    for (path, (d, translate)) in core.scene().map_paths().iter().zip(before) {
        assert_ne!(path.d, d);
        assert_eq!(path.translate, translate);
    }
    let hl = core.scene().highlight().unwrap();
    assert_eq!(hl.d, core.projection().path(&hl.feature.geometry));
}

#[test]
fn final_tick_stops_requesting_frames() {
    let mut core = loaded();
    let (ticket, _) = only_fetch(&core.click_feature(0));
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    core.tick(0.0);
    let actions = core.tick(800.0);
    assert!(has_render_needed(&actions));
    assert!(!has_request_frame(&actions));
    assert!(!core.is_animating());
}

#[test]
fn zoom_to_current_viewport_is_a_no_op() {
    let mut core = loaded();
    let feature = Arc::clone(core.collection().get(0).unwrap());
    let c = feature.geometry.centroid().unwrap();
    // Put the projection exactly on the feature first.
    assert!(core.zoom_to(&feature, 20_000.0));
    finish_animation(&mut core);
    let scene_before: Vec<String> = core.scene().map_paths().iter().map(|p| p.d.clone()).collect();

    assert!(!core.zoom_to(&feature, 20_000.0));
    assert!(!core.is_animating());
    assert!(core.tick(5_000.0).is_empty());
    assert_eq!(core.viewport(), Viewport { center: (c.x(), c.y()), scale: 20_000.0 });
    let scene_after: Vec<String> = core.scene().map_paths().iter().map(|p| p.d.clone()).collect();
    assert_eq!(scene_before, scene_after);
}

#[test]
fn second_zoom_cancels_first() {
    let mut core = loaded();
    let a = Arc::clone(core.collection().get(0).unwrap());
    let b = Arc::clone(core.collection().get(1).unwrap());
    core.zoom_to(&a, 20_000.0);
    core.tick(0.0);
    core.tick(300.0);
    core.zoom_to(&b, 50_000.0);
    finish_animation(&mut core);
    let c = b.geometry.centroid().unwrap();
    assert_eq!(core.viewport(), Viewport { center: (c.x(), c.y()), scale: 50_000.0 });
}

// =============================================================
// Superseded fetches
// =============================================================

#[test]
fn later_click_supersedes_outstanding_fetch() {
    let mut core = loaded();
    let (first, _) = only_fetch(&core.click_feature(index_of(&core, "臺北市")));
    let (second, _) = only_fetch(&core.click_feature(index_of(&core, "臺中市")));

    assert!(core.apply_fetch(second, Ok(towns_of("臺中市"))).contains(&Action::RenderNeeded));
    assert!(core.apply_fetch(first, Ok(towns_of("臺北市"))).is_empty());
    assert_eq!(core.level(), Level::Town);
    assert!(core.collection().iter().all(|f| f.county_name() == Some("臺中市")));
}

#[test]
fn response_after_reset_is_dropped() {
    let mut core = loaded();
    let (stale, _) = only_fetch(&core.click_feature(0));
    core.reset();
    assert!(core.apply_fetch(stale, Ok(towns_of("臺北市"))).is_empty());
    assert_eq!(core.level(), Level::County);
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_from_every_level_returns_to_counties() {
    for depth in 0..3 {
        let mut core = loaded();
        if depth >= 1 {
            let (t, _) = only_fetch(&core.click_feature(0));
            core.apply_fetch(t, Ok(towns_of("臺北市")));
        }
        if depth >= 2 {
            let (t, _) = only_fetch(&core.click_feature(0));
            core.apply_fetch(t, Ok(villages_of("臺北市", "甲區")));
            core.click_feature(1);
        }

        let actions = core.reset();
        assert!(has_render_needed(&actions));
        let (ticket, request) = only_fetch(&actions);
        assert_eq!(request, FetchRequest::Counties);
        assert_eq!(core.level(), Level::County);
        assert!(core.scene().is_empty());
        assert!(!core.is_animating());
        assert_eq!(core.viewport(), Viewport { center: (120.0, 24.0), scale: 10_000.0 });

        core.apply_fetch(ticket, Ok(counties()));
        assert_eq!(core.level(), Level::County);
        assert_eq!(core.scene().map_paths().len(), 3);
        assert!(core.scene().map_paths().iter().all(|p| p.class == "county"));
        assert!(core.scene().highlight().is_none());
    }
}

#[test]
fn reset_does_not_emit_selection_event() {
    let mut core = at_towns();
    let actions = core.reset();
    assert!(selected(&actions).is_none());
    assert!(core.selected_name().is_none());
}

#[test]
fn reset_mid_animation_discards_zoom() {
    let mut core = loaded();
    let (ticket, _) = only_fetch(&core.click_feature(0));
    core.apply_fetch(ticket, Ok(towns_of("臺北市")));
    core.tick(0.0);
    core.tick(200.0);
    core.reset();
    assert!(core.tick(400.0).is_empty());
    assert_eq!(core.viewport(), Viewport { center: (120.0, 24.0), scale: 10_000.0 });
}
