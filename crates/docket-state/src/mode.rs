//! # Render Modes
//!
//! The dashboard shows the strategy tree in one of three layouts, with the
//! motions glossary as a modal that can sit over any of them. The active
//! mode is a single tagged enum; [`Dashboard::render`] is the only place
//! that matches on it.
//!
//! ```text
//!   SinglePhase ◀──choose_phase── AllPhases
//!        ▲  ╲                       ▲
//!        │   ╲──choose_phase── OverviewMap
//!        │
//!   open_glossary / close_glossary (restores the layout underneath)
//! ```

use serde::Serialize;

use docket_core::fixture::{CategoryFilter, Motion, MotionCategory, Move, TreePhase};
use docket_core::{PhaseId, PhaseMetrics};

use crate::tree::{AdvancePrompt, MoveCard, TreeError, TreeView};

/// The non-modal layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// One phase as an interactive tree.
    #[default]
    SinglePhase,
    /// Grid of the core phases.
    AllPhases,
    /// Per-phase counts.
    OverviewMap,
}

/// The active render mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    SinglePhase,
    AllPhases,
    OverviewMap,
    /// The glossary modal, remembering the layout it covers.
    Glossary {
        under: Layout,
        filter: CategoryFilter,
        selected: Option<String>,
    },
}

impl RenderMode {
    /// The layout drawn, or drawn underneath the modal.
    pub fn layout(&self) -> Layout {
        match self {
            Self::SinglePhase => Layout::SinglePhase,
            Self::AllPhases => Layout::AllPhases,
            Self::OverviewMap => Layout::OverviewMap,
            Self::Glossary { under, .. } => *under,
        }
    }

    fn from_layout(layout: Layout) -> Self {
        match layout {
            Layout::SinglePhase => Self::SinglePhase,
            Layout::AllPhases => Self::AllPhases,
            Layout::OverviewMap => Self::OverviewMap,
        }
    }
}

// ─── Screens ────────────────────────────────────────────────────────

/// One column of the all-phases grid.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseColumn<'a> {
    pub phase: &'a TreePhase,
    /// Moves with their response counts.
    pub moves: Vec<(&'a Move, usize)>,
}

/// Totals across the core phases of the overview map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverviewTotals {
    pub phases: usize,
    pub motions: usize,
    pub counters: usize,
}

/// A glossary category with its motion count.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount<'a> {
    pub category: &'a MotionCategory,
    pub count: usize,
}

/// What to draw for the current mode.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen<'a> {
    /// The phase is still loading.
    Loading { phase: &'a TreePhase, percent: u8 },
    /// The interactive tree for one phase.
    SinglePhase {
        phase: &'a TreePhase,
        cards: Vec<MoveCard<'a>>,
        prompt: Option<AdvancePrompt>,
        /// The move shown in the detail panel. May belong to another phase.
        detail: Option<&'a Move>,
    },
    AllPhases { columns: Vec<PhaseColumn<'a>> },
    OverviewMap {
        metrics: Vec<PhaseMetrics>,
        totals: OverviewTotals,
    },
    /// The glossary modal over `under`.
    Glossary {
        under: Layout,
        total: usize,
        categories: Vec<CategoryCount<'a>>,
        motions: Vec<&'a Motion>,
        selected: Option<&'a Motion>,
    },
}

// ─── Dashboard ──────────────────────────────────────────────────────

/// Tree view state plus the active render mode.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    view: TreeView<'a>,
    mode: RenderMode,
}

impl<'a> Dashboard<'a> {
    pub fn new(view: TreeView<'a>) -> Self {
        Self {
            view,
            mode: RenderMode::default(),
        }
    }

    pub fn view(&self) -> &TreeView<'a> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TreeView<'a> {
        &mut self.view
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    /// Switch layout. Closes the glossary if it is open.
    pub fn show(&mut self, layout: Layout) {
        self.mode = RenderMode::from_layout(layout);
    }

    /// Jump to a phase from the grid or overview and show it as a tree.
    pub fn choose_phase(&mut self, phase: &PhaseId) -> Result<(), TreeError> {
        self.view.set_phase(phase)?;
        self.mode = RenderMode::SinglePhase;
        Ok(())
    }

    /// Open the glossary modal over the current layout. A no-op if already
    /// open.
    pub fn open_glossary(&mut self) {
        if !matches!(self.mode, RenderMode::Glossary { .. }) {
            self.mode = RenderMode::Glossary {
                under: self.mode.layout(),
                filter: CategoryFilter::All,
                selected: None,
            };
        }
    }

    /// Close the modal and restore the layout underneath.
    pub fn close_glossary(&mut self) {
        self.mode = RenderMode::from_layout(self.mode.layout());
    }

    /// Change the category filter. Opens the modal if needed and clears the
    /// selected motion.
    pub fn filter_glossary(&mut self, filter: CategoryFilter) -> Result<(), TreeError> {
        if let CategoryFilter::Category(id) = &filter {
            if self.view.tree().motions_glossary.category(id).is_none() {
                return Err(TreeError::UnknownCategory(id.clone()));
            }
        }
        self.open_glossary();
        if let RenderMode::Glossary {
            filter: current,
            selected,
            ..
        } = &mut self.mode
        {
            if *current != filter {
                *selected = None;
            }
            *current = filter;
        }
        Ok(())
    }

    /// Show one motion's details in the modal, or clear with `None`.
    pub fn select_motion(&mut self, motion: Option<&str>) -> Result<(), TreeError> {
        if let Some(id) = motion {
            if self.view.tree().motions_glossary.motion(id).is_none() {
                return Err(TreeError::UnknownMotion(id.to_string()));
            }
        }
        self.open_glossary();
        if let RenderMode::Glossary { selected, .. } = &mut self.mode {
            *selected = motion.map(str::to_string);
        }
        Ok(())
    }

    /// Build the screen for the current mode.
    pub fn render(&self) -> Result<Screen<'a>, TreeError> {
        let tree = self.view.tree();
        match &self.mode {
            RenderMode::SinglePhase => {
                let phase = self
                    .view
                    .phase_info()
                    .ok_or_else(|| TreeError::UnknownPhase(self.view.phase().clone()))?;
                if !self.view.is_loaded() {
                    return Ok(Screen::Loading {
                        phase,
                        percent: self.view.gauge().percent(),
                    });
                }
                Ok(Screen::SinglePhase {
                    phase,
                    cards: self.view.cards(),
                    prompt: self.view.advance_prompt(),
                    detail: self.view.selected_move(),
                })
            }
            RenderMode::AllPhases => {
                let columns = tree
                    .core_phases()
                    .iter()
                    .map(|phase| PhaseColumn {
                        phase,
                        moves: tree
                            .moves
                            .iter()
                            .filter(|m| m.phase == phase.id)
                            .map(|m| (m, m.responses.iter().count()))
                            .collect(),
                    })
                    .collect();
                Ok(Screen::AllPhases { columns })
            }
            RenderMode::OverviewMap => {
                let metrics = PhaseMetrics::core(tree);
                let totals = metrics.iter().fold(OverviewTotals::default(), |t, m| OverviewTotals {
                    phases: t.phases + 1,
                    motions: t.motions + m.motion_count,
                    counters: t.counters + m.counter_count,
                });
                Ok(Screen::OverviewMap { metrics, totals })
            }
            RenderMode::Glossary {
                under,
                filter,
                selected,
            } => {
                let glossary = &tree.motions_glossary;
                Ok(Screen::Glossary {
                    under: *under,
                    total: glossary.motions.len(),
                    categories: glossary
                        .categories
                        .iter()
                        .map(|category| CategoryCount {
                            category,
                            count: glossary.count_in(&category.id),
                        })
                        .collect(),
                    motions: glossary.motions.iter().filter(|m| filter.matches(m)).collect(),
                    selected: selected.as_deref().and_then(|id| glossary.motion(id)),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_core::{CascadePolicy, FixtureBundle, MoveId};

    fn bundle() -> FixtureBundle {
        FixtureBundle::bundled(CascadePolicy::Strict).unwrap()
    }

    fn phase(s: &str) -> PhaseId {
        PhaseId::new(s).unwrap()
    }

    #[test]
    fn test_single_phase_loads_then_shows_cards() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        match dash.render().unwrap() {
            Screen::Loading { percent, .. } => assert_eq!(percent, 0),
            other => panic!("expected loading, got {other:?}"),
        }
        for _ in 0..10 {
            dash.view_mut().tick();
        }
        match dash.render().unwrap() {
            Screen::SinglePhase { phase, cards, prompt, detail } => {
                assert_eq!(phase.id.as_str(), "phase-0");
                assert_eq!(cards.len(), 1);
                assert!(!prompt.unwrap().enabled);
                assert!(detail.is_none());
            }
            other => panic!("expected single phase, got {other:?}"),
        }
    }

    #[test]
    fn test_all_phases_grid_is_core_only() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        dash.show(Layout::AllPhases);
        let Screen::AllPhases { columns } = dash.render().unwrap() else {
            panic!("expected grid");
        };
        let ids: Vec<_> = columns.iter().map(|c| c.phase.id.as_str()).collect();
        assert_eq!(ids, ["phase-1", "phase-2", "phase-3", "phase-4", "phase-5"]);
        assert_eq!(columns[0].moves.len(), 4);
        assert!(columns.iter().flat_map(|c| &c.moves).all(|(_, n)| *n == 4));
    }

    #[test]
    fn test_overview_totals_exclude_bracketing_phases() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        dash.show(Layout::OverviewMap);
        let Screen::OverviewMap { metrics, totals } = dash.render().unwrap() else {
            panic!("expected overview");
        };
        assert_eq!(metrics.len(), 5);
        // 12 moves minus m0-1 and m6-1.
        assert_eq!(totals, OverviewTotals { phases: 5, motions: 10, counters: 40 });
        assert_eq!(metrics[0].motion_count, 4);
    }

    #[test]
    fn test_choose_phase_switches_to_tree() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        dash.show(Layout::OverviewMap);
        dash.choose_phase(&phase("phase-3")).unwrap();
        assert_eq!(dash.mode(), &RenderMode::SinglePhase);
        assert_eq!(dash.view().phase().as_str(), "phase-3");
        assert!(dash.choose_phase(&phase("phase-x")).is_err());
    }

    #[test]
    fn test_glossary_restores_layout() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        dash.show(Layout::AllPhases);
        dash.open_glossary();
        assert_eq!(dash.mode().layout(), Layout::AllPhases);
        dash.close_glossary();
        assert_eq!(dash.mode(), &RenderMode::AllPhases);
    }

    #[test]
    fn test_glossary_filter_and_counts() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        dash.select_motion(Some("mot-franks")).unwrap();
        dash.filter_glossary(CategoryFilter::parse("discovery-taint")).unwrap();
        let Screen::Glossary {
            total,
            categories,
            motions,
            selected,
            ..
        } = dash.render().unwrap()
        else {
            panic!("expected glossary");
        };
        assert_eq!(total, 7);
        let counts: Vec<_> = categories.iter().map(|c| c.count).collect();
        assert_eq!(counts, [1, 2, 2, 1, 1]);
        assert_eq!(motions.len(), 2);
        assert!(selected.is_none(), "filter change clears selection");
    }

    #[test]
    fn test_glossary_rejects_unknown_ids() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        assert_eq!(
            dash.filter_glossary(CategoryFilter::parse("nope")).unwrap_err(),
            TreeError::UnknownCategory("nope".into())
        );
        assert_eq!(
            dash.select_motion(Some("mot-nope")).unwrap_err(),
            TreeError::UnknownMotion("mot-nope".into())
        );
        assert_eq!(dash.mode(), &RenderMode::SinglePhase);
    }

    #[test]
    fn test_tree_state_survives_mode_switches() {
        let b = bundle();
        let mut dash = Dashboard::new(TreeView::new(&b.tree).unwrap());
        let m = MoveId::new("m0-1").unwrap();
        dash.view_mut().toggle_move(&m).unwrap();
        dash.show(Layout::AllPhases);
        dash.open_glossary();
        dash.close_glossary();
        dash.show(Layout::SinglePhase);
        assert!(dash.view().is_reviewed(&m));
    }
}
