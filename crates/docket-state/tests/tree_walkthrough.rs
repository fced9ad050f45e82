//! # Strategy Tree Walkthrough Tests
//!
//! End-to-end interaction sequences against the bundled fixtures, driven
//! through the public API only: the dashboard, its tree view, and the
//! rendered screens.

use docket_core::fixture::ResponseKey;
use docket_core::{CascadePolicy, FixtureBundle, MoveId, PhaseId};
use docket_state::{Dashboard, Layout, MoveState, Screen, TreeView};

fn bundle() -> FixtureBundle {
    FixtureBundle::bundled(CascadePolicy::Strict).expect("bundled fixtures load")
}

fn phase(s: &str) -> PhaseId {
    PhaseId::new(s).expect("valid phase id")
}

/// Drive the gauge to completion.
fn load(dash: &mut Dashboard<'_>) {
    while !dash.view().is_loaded() {
        dash.view_mut().tick();
    }
}

#[test]
fn discovery_third_move_response_b_reveals_one_counter() {
    let b = bundle();
    let mut dash = Dashboard::new(TreeView::new(&b.tree).expect("tree has phases"));
    dash.choose_phase(&phase("phase-1")).expect("phase-1 exists");
    load(&mut dash);

    let third = dash.view().phase_moves()[2].id.clone();
    assert_eq!(third.as_str(), "m1-3");

    dash.view_mut().toggle_move(&third).expect("toggle");
    dash.view_mut()
        .select_response(&third, ResponseKey::B)
        .expect("select B");

    let Screen::SinglePhase { cards, prompt, .. } = dash.render().expect("render") else {
        panic!("expected the single-phase tree");
    };
    let revealed: Vec<_> = cards.iter().filter_map(|c| c.counter).collect();
    assert_eq!(revealed.len(), 1, "exactly one counter is revealed");
    assert_eq!(revealed[0].0, ResponseKey::B);
    assert_eq!(revealed[0].1.next_action, "Draft suppression predicate");

    let card = cards.iter().find(|c| c.mv.id == third).expect("card for m1-3");
    assert_eq!(card.outcomes.map(|o| o.iter().count()), Some(4));
    let cascade = card.cascade.as_ref().expect("win cascades");
    assert_eq!(cascade.label, "Motion to Suppress Device Evidence");
    assert!(prompt.expect("prompt").enabled);

    // Collapse and re-expand restores B.
    assert_eq!(dash.view_mut().toggle_move(&third).expect("collapse"), MoveState::Collapsed);
    assert_eq!(
        dash.view_mut().toggle_move(&third).expect("expand"),
        MoveState::Responding(ResponseKey::B)
    );
}

#[test]
fn switching_phase_away_and_back_keeps_choices() {
    let b = bundle();
    let mut dash = Dashboard::new(TreeView::new(&b.tree).expect("tree has phases"));
    let m = MoveId::new("m1-3").expect("valid move id");

    dash.choose_phase(&phase("phase-1")).expect("phase-1");
    dash.view_mut().toggle_move(&m).expect("toggle");
    dash.view_mut().select_response(&m, ResponseKey::B).expect("select");

    dash.choose_phase(&phase("phase-4")).expect("phase-4");
    assert_eq!(dash.view().gauge().percent(), 0);
    assert!(matches!(dash.render().expect("render"), Screen::Loading { .. }));

    dash.choose_phase(&phase("phase-1")).expect("back to phase-1");
    assert!(dash.view().is_reviewed(&m));
    assert!(dash.view().can_advance());
    assert_eq!(dash.view().move_state(&m), MoveState::Responding(ResponseKey::B));
}

#[test]
fn advancing_through_every_phase_requires_a_review_each_time() {
    let b = bundle();
    let mut view = TreeView::new(&b.tree).expect("tree has phases");
    let mut visited = vec![view.phase().clone()];
    loop {
        assert!(!view.can_advance());
        let first = view.phase_moves()[0].id.clone();
        view.toggle_move(&first).expect("toggle first move");
        match view.advance_phase() {
            Ok(next) => visited.push(next.clone()),
            Err(docket_state::TreeError::FinalPhase(_)) => break,
            Err(other) => panic!("unexpected error {other}"),
        }
    }
    let ids: Vec<_> = visited.iter().map(PhaseId::as_str).collect();
    assert_eq!(
        ids,
        ["phase-0", "phase-1", "phase-2", "phase-3", "phase-4", "phase-5", "phase-6"]
    );
}

#[test]
fn overview_pick_returns_to_tree_on_that_phase() {
    let b = bundle();
    let mut dash = Dashboard::new(TreeView::new(&b.tree).expect("tree has phases"));
    dash.show(Layout::OverviewMap);
    dash.open_glossary();
    dash.close_glossary();
    assert_eq!(dash.mode().layout(), Layout::OverviewMap);
    dash.choose_phase(&phase("phase-2")).expect("phase-2");
    load(&mut dash);
    let Screen::SinglePhase { phase: shown, cards, .. } = dash.render().expect("render") else {
        panic!("expected the single-phase tree");
    };
    assert_eq!(shown.name, "Motion Battle");
    assert_eq!(cards.len(), 2);
}

#[test]
fn screens_serialize_with_tag() {
    let b = bundle();
    let mut dash = Dashboard::new(TreeView::new(&b.tree).expect("tree has phases"));
    dash.show(Layout::AllPhases);
    let json = serde_json::to_value(dash.render().expect("render")).expect("serialize");
    assert_eq!(json["screen"], "all_phases");
    assert_eq!(json["columns"].as_array().map(Vec::len), Some(5));
}
