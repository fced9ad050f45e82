//! # Strategy Tree Disclosure State Machine
//!
//! Presents one phase's moves as a cascading disclosure:
//! move → chosen response → counter → outcome set. Each move has its own
//! independent state, keyed by move id.
//!
//! ## States
//!
//! ```text
//!               toggle                  select(k)
//!  Collapsed ◀─────────▶ Expanded ◀─────────────────▶ Responding(k)
//!      ▲                                select(k) again     │
//!      │                                                    │ select(j), j≠k
//!      │                                                    ▼
//!      └──────────────── toggle ─────────────────── Responding(j)
//! ```
//!
//! Collapsing keeps the chosen response in memory; re-expanding restores
//! it. Every toggle marks the move reviewed, and the reviewed flag is never
//! cleared.
//!
//! ## Phase navigation
//!
//! The view holds exactly one current phase. Switching phase swaps the
//! visible move list and restarts the loading gauge; per-move state is
//! untouched. Advancing to the next phase requires at least one reviewed
//! move in the current phase.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use docket_core::fixture::{Counter, Move, Outcomes, ResponseKey, StrategyTree, TreePhase};
use docket_core::{MoveId, PhaseId};

// ─── Move State ─────────────────────────────────────────────────────

/// The visible state of one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoveState {
    /// Only the title is visible.
    Collapsed,
    /// The four responses are visible, none highlighted.
    Expanded,
    /// One response is highlighted; its counter and all outcomes are shown.
    Responding(ResponseKey),
}

impl std::fmt::Display for MoveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collapsed => f.write_str("COLLAPSED"),
            Self::Expanded => f.write_str("EXPANDED"),
            Self::Responding(k) => write!(f, "RESPONDING({k})"),
        }
    }
}

/// Per-move memory. `response` survives collapse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MoveMemory {
    expanded: bool,
    response: Option<ResponseKey>,
}

impl MoveMemory {
    fn state(&self) -> MoveState {
        match (self.expanded, self.response) {
            (false, _) => MoveState::Collapsed,
            (true, None) => MoveState::Expanded,
            (true, Some(k)) => MoveState::Responding(k),
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Errors raised by view-state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The fixture has no phases to show.
    #[error("strategy tree has no phases")]
    NoPhases,

    /// No move with this id exists.
    #[error("unknown move {0}")]
    UnknownMove(MoveId),

    /// No phase with this id exists.
    #[error("unknown phase {0}")]
    UnknownPhase(PhaseId),

    /// The move is not part of the current phase.
    #[error("move {move_id} is not in the current phase {phase}")]
    NotInPhase {
        /// The move activated.
        move_id: MoveId,
        /// The current phase.
        phase: PhaseId,
    },

    /// Responses can only be chosen while the move is expanded.
    #[error("move {0} is collapsed; expand it before choosing a response")]
    MoveCollapsed(MoveId),

    /// No move in the current phase has been reviewed yet.
    #[error("review at least one move in {0} before advancing")]
    PhaseGate(PhaseId),

    /// There is no phase after the current one.
    #[error("{0} is the final phase")]
    FinalPhase(PhaseId),

    /// No glossary category with this id exists.
    #[error("unknown glossary category {0:?}")]
    UnknownCategory(String),

    /// No motion with this id exists in the glossary.
    #[error("unknown motion {0:?}")]
    UnknownMotion(String),
}

// ─── Loading Gauge ──────────────────────────────────────────────────

/// Cosmetic progress gauge shown while a phase "loads". Advances by 10 per
/// tick and is complete at 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadGauge {
    percent: u8,
}

impl LoadGauge {
    /// Step size per tick.
    pub const STEP: u8 = 10;

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    /// Advance one step, saturating at 100. Returns the new percentage.
    pub fn tick(&mut self) -> u8 {
        self.percent = self.percent.saturating_add(Self::STEP).min(100);
        self.percent
    }

    /// Jump straight to complete.
    pub fn finish(&mut self) {
        self.percent = 100;
    }
}

// ─── Render Snapshot ────────────────────────────────────────────────

/// Pointer shown under a move whose `win` outcome cascades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadePointer {
    /// Target move id.
    pub target: MoveId,
    /// Target title, or the raw id if the target does not exist.
    pub label: String,
    /// Whether the target exists in the fixture.
    pub resolved: bool,
}

/// Everything needed to draw one move in the single-phase view.
#[derive(Debug, Clone, Serialize)]
pub struct MoveCard<'a> {
    #[serde(rename = "move")]
    pub mv: &'a Move,
    pub state: MoveState,
    pub reviewed: bool,
    pub selected: bool,
    /// Present when the move is expanded.
    pub responses_visible: bool,
    /// The chosen response's counter, when responding.
    pub counter: Option<(ResponseKey, &'a Counter)>,
    /// All four outcomes, when responding.
    pub outcomes: Option<&'a Outcomes>,
    pub cascade: Option<CascadePointer>,
}

/// Phase-advance prompt under the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancePrompt {
    pub reviewed: usize,
    pub total: usize,
    /// True iff at least one move is reviewed.
    pub enabled: bool,
    /// The phase the control leads to, if any.
    pub next_phase: Option<PhaseId>,
}

// ─── Tree View ──────────────────────────────────────────────────────

/// View state of the interactive strategy tree. Ephemeral; never persisted.
#[derive(Debug, Clone)]
pub struct TreeView<'a> {
    tree: &'a StrategyTree,
    phase: PhaseId,
    memory: HashMap<MoveId, MoveMemory>,
    reviewed: HashSet<MoveId>,
    selected: Option<MoveId>,
    gauge: LoadGauge,
}

impl<'a> TreeView<'a> {
    /// Start on the first phase with every move collapsed.
    pub fn new(tree: &'a StrategyTree) -> Result<Self, TreeError> {
        let first = tree.first_phase().ok_or(TreeError::NoPhases)?;
        Ok(Self {
            tree,
            phase: first.id.clone(),
            memory: HashMap::new(),
            reviewed: HashSet::new(),
            selected: None,
            gauge: LoadGauge::default(),
        })
    }

    pub fn tree(&self) -> &'a StrategyTree {
        self.tree
    }

    /// The current phase id.
    pub fn phase(&self) -> &PhaseId {
        &self.phase
    }

    /// The current phase record.
    pub fn phase_info(&self) -> Option<&'a TreePhase> {
        self.tree.phase(&self.phase)
    }

    /// Moves of the current phase, in fixture order.
    pub fn phase_moves(&self) -> Vec<&'a Move> {
        let tree: &'a StrategyTree = self.tree;
        tree.moves.iter().filter(|m| m.phase == self.phase).collect()
    }

    pub fn gauge(&self) -> LoadGauge {
        self.gauge
    }

    /// Advance the loading gauge one step.
    pub fn tick(&mut self) -> u8 {
        self.gauge.tick()
    }

    /// Whether the move list may be drawn.
    pub fn is_loaded(&self) -> bool {
        self.gauge.is_complete()
    }

    /// Complete the loading gauge immediately.
    pub fn finish_loading(&mut self) {
        self.gauge.finish();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Current state of a move. Unknown ids read as collapsed.
    pub fn move_state(&self, id: &MoveId) -> MoveState {
        self.memory.get(id).map_or(MoveState::Collapsed, MoveMemory::state)
    }

    /// The response remembered for a move, shown or not.
    pub fn remembered_response(&self, id: &MoveId) -> Option<ResponseKey> {
        self.memory.get(id).and_then(|m| m.response)
    }

    pub fn is_reviewed(&self, id: &MoveId) -> bool {
        self.reviewed.contains(id)
    }

    /// The move shown in the detail panel.
    pub fn selected_move(&self) -> Option<&'a Move> {
        self.selected.as_ref().and_then(|id| self.tree.find_move(id))
    }

    /// Reviewed moves in the current phase.
    pub fn reviewed_in_phase(&self) -> usize {
        self.phase_moves()
            .iter()
            .filter(|m| self.reviewed.contains(&m.id))
            .count()
    }

    /// True iff at least one move in the current phase has been reviewed.
    pub fn can_advance(&self) -> bool {
        self.reviewed_in_phase() > 0
    }

    /// Cascade pointer for a move: present only when the move is showing a
    /// chosen response and its `win` outcome names a target.
    pub fn cascade_pointer(&self, id: &MoveId) -> Option<CascadePointer> {
        if !matches!(self.move_state(id), MoveState::Responding(_)) {
            return None;
        }
        let target = self.tree.find_move(id)?.win_cascade()?;
        let resolved = self.tree.find_move(target);
        Some(CascadePointer {
            target: target.clone(),
            label: resolved.map_or_else(|| target.to_string(), |m| m.title.clone()),
            resolved: resolved.is_some(),
        })
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Activate a move's header: toggle expansion, mark it reviewed, and
    /// select it for the detail panel. Returns the new state.
    pub fn toggle_move(&mut self, id: &MoveId) -> Result<MoveState, TreeError> {
        self.require_in_phase(id)?;
        self.reviewed.insert(id.clone());
        self.selected = Some(id.clone());
        let memory = self.memory.entry(id.clone()).or_default();
        memory.expanded = !memory.expanded;
        let state = memory.state();
        tracing::debug!(move_id = %id, %state, "toggled move");
        Ok(state)
    }

    /// Activate a response key on an expanded move. The same key again
    /// clears the choice; a different key replaces it.
    pub fn select_response(&mut self, id: &MoveId, key: ResponseKey) -> Result<MoveState, TreeError> {
        self.require_in_phase(id)?;
        let memory = self.memory.entry(id.clone()).or_default();
        if !memory.expanded {
            return Err(TreeError::MoveCollapsed(id.clone()));
        }
        memory.response = if memory.response == Some(key) { None } else { Some(key) };
        let state = memory.state();
        tracing::debug!(move_id = %id, %state, "response activated");
        Ok(state)
    }

    /// Select any move for the detail panel without changing its state.
    pub fn select_move(&mut self, id: &MoveId) -> Result<(), TreeError> {
        if self.tree.find_move(id).is_none() {
            return Err(TreeError::UnknownMove(id.clone()));
        }
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Switch the current phase. A real change restarts the loading gauge.
    pub fn set_phase(&mut self, phase: &PhaseId) -> Result<(), TreeError> {
        if self.tree.phase(phase).is_none() {
            return Err(TreeError::UnknownPhase(phase.clone()));
        }
        if &self.phase != phase {
            tracing::debug!(from = %self.phase, to = %phase, "phase changed");
            self.phase = phase.clone();
            self.gauge = LoadGauge::default();
        }
        Ok(())
    }

    /// Move to the next phase in fixture order, subject to the review gate.
    pub fn advance_phase(&mut self) -> Result<&PhaseId, TreeError> {
        if !self.can_advance() {
            return Err(TreeError::PhaseGate(self.phase.clone()));
        }
        let next = self
            .tree
            .next_phase(&self.phase)
            .ok_or_else(|| TreeError::FinalPhase(self.phase.clone()))?
            .id
            .clone();
        self.set_phase(&next)?;
        Ok(&self.phase)
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Cards for every move in the current phase.
    pub fn cards(&self) -> Vec<MoveCard<'a>> {
        self.phase_moves()
            .into_iter()
            .map(|mv| {
                let state = self.move_state(&mv.id);
                let (counter, outcomes) = match state {
                    MoveState::Responding(k) => {
                        (Some((k, &mv.responses.get(k).counter)), Some(&mv.outcomes))
                    }
                    _ => (None, None),
                };
                MoveCard {
                    mv,
                    state,
                    reviewed: self.is_reviewed(&mv.id),
                    selected: self.selected.as_ref() == Some(&mv.id),
                    responses_visible: state != MoveState::Collapsed,
                    counter,
                    outcomes,
                    cascade: self.cascade_pointer(&mv.id),
                }
            })
            .collect()
    }

    /// The phase-advance prompt, or `None` for a phase with no moves.
    pub fn advance_prompt(&self) -> Option<AdvancePrompt> {
        let total = self.phase_moves().len();
        if total == 0 {
            return None;
        }
        let reviewed = self.reviewed_in_phase();
        Some(AdvancePrompt {
            reviewed,
            total,
            enabled: reviewed > 0,
            next_phase: self.tree.next_phase(&self.phase).map(|p| p.id.clone()),
        })
    }

    fn require_in_phase(&self, id: &MoveId) -> Result<(), TreeError> {
        let mv = self
            .tree
            .find_move(id)
            .ok_or_else(|| TreeError::UnknownMove(id.clone()))?;
        if mv.phase != self.phase {
            return Err(TreeError::NotInPhase {
                move_id: id.clone(),
                phase: self.phase.clone(),
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
