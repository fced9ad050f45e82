//! # Strategy Tree Fixture (`gametree.json`)
//!
//! A fixed tree of defense moves. Each move carries exactly four government
//! responses (`A`..`D`), each with one prepared counter, and exactly four
//! weighted outcomes. The "exactly four" invariant is structural: responses
//! and outcomes are fixed struct fields, not maps, so a fixture with a
//! missing or extra key fails to parse.
//!
//! ```text
//! Move ──▶ Response (A|B|C|D) ──▶ Counter
//!   └────▶ Outcomes { win, partial, statusQuo, lose } ──cascadeTo──▶ Move
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DocketError;
use crate::fixture::glossary::Glossary;
use crate::identity::{MoveId, PhaseId};

// ─── Document ───────────────────────────────────────────────────────

/// The strategy tree document: ordered phases, moves, and the motions
/// glossary shown by the glossary modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyTree {
    /// Phases in advancement order.
    pub phases: Vec<TreePhase>,
    /// Every move across all phases.
    pub moves: Vec<Move>,
    /// Motions reference.
    #[serde(default)]
    pub motions_glossary: Glossary,
}

/// A phase of the strategy tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreePhase {
    pub id: PhaseId,
    pub name: String,
    pub date_range: Option<String>,
    pub description: Option<String>,
}

impl StrategyTree {
    /// Look up a phase by id.
    pub fn phase(&self, id: &PhaseId) -> Option<&TreePhase> {
        self.phases.iter().find(|p| &p.id == id)
    }

    /// Position of a phase in the advancement order.
    pub fn phase_index(&self, id: &PhaseId) -> Option<usize> {
        self.phases.iter().position(|p| &p.id == id)
    }

    /// The phase after `id`, if any.
    pub fn next_phase(&self, id: &PhaseId) -> Option<&TreePhase> {
        self.phase_index(id).and_then(|i| self.phases.get(i + 1))
    }

    /// The first phase in the ordering.
    pub fn first_phase(&self) -> Option<&TreePhase> {
        self.phases.first()
    }

    /// The core phases: every phase except the first (preflight) and the
    /// last (trial oversight).
    pub fn core_phases(&self) -> &[TreePhase] {
        if self.phases.len() <= 2 {
            return &[];
        }
        &self.phases[1..self.phases.len() - 1]
    }

    /// Moves tagged with `phase`, in fixture order.
    pub fn moves_in<'a>(&'a self, phase: &'a PhaseId) -> impl Iterator<Item = &'a Move> + 'a {
        self.moves.iter().filter(move |m| &m.phase == phase)
    }

    /// Look up a move by id across all phases.
    pub fn find_move(&self, id: &MoveId) -> Option<&Move> {
        self.moves.iter().find(|m| &m.id == id)
    }
}

// ─── Move ───────────────────────────────────────────────────────────

/// A defense action within a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: MoveId,
    /// Kind of action (`filing`, `motion`, `hearing`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub phase: PhaseId,
    pub details: MoveDetails,
    pub responses: Responses,
    pub outcomes: Outcomes,
}

impl Move {
    /// The move this one unlocks when won, if any.
    pub fn win_cascade(&self) -> Option<&MoveId> {
        self.outcomes.win.cascade_to.as_ref()
    }
}

/// Scheduling and effort details for a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDetails {
    pub deadline: String,
    pub client_task: String,
    pub attorney_task: String,
    pub hours: u32,
    pub cost: Option<u64>,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
    pub minimum_acceptable: Option<String>,
    pub requested_continuance: Option<String>,
}

// ─── Responses ──────────────────────────────────────────────────────

/// Key of one of the four government responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResponseKey {
    A,
    B,
    C,
    D,
}

impl ResponseKey {
    /// All keys in display order.
    pub const ALL: [ResponseKey; 4] = [ResponseKey::A, ResponseKey::B, ResponseKey::C, ResponseKey::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl std::fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResponseKey {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            other => Err(DocketError::SchemaValidation(format!(
                "unknown response key {other:?} (expected A, B, C or D)"
            ))),
        }
    }
}

/// The four anticipated responses to a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responses {
    #[serde(rename = "A")]
    pub a: Response,
    #[serde(rename = "B")]
    pub b: Response,
    #[serde(rename = "C")]
    pub c: Response,
    #[serde(rename = "D")]
    pub d: Response,
}

impl Responses {
    pub fn get(&self, key: ResponseKey) -> &Response {
        match key {
            ResponseKey::A => &self.a,
            ResponseKey::B => &self.b,
            ResponseKey::C => &self.c,
            ResponseKey::D => &self.d,
        }
    }

    /// Responses paired with their keys, in `A`..`D` order.
    pub fn iter(&self) -> impl Iterator<Item = (ResponseKey, &Response)> {
        ResponseKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// One counterparty reaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Probability placeholder; the dashboard shows `TBD` for all of them.
    #[serde(default)]
    pub probability: f64,
    pub text: String,
    pub status: Option<String>,
    pub counter: Counter,
    pub govt_counter: Option<GovtCounter>,
}

/// The prepared rebuttal to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub brief: String,
    pub full: String,
    pub next_action: String,
}

/// What the government argues if the defense files, and the rebuttal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovtCounter {
    pub if_we_file: String,
    pub their_argument: String,
    pub our_rebuttal: GovtRebuttal,
}

/// Rebuttal to a government counter-argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovtRebuttal {
    pub brief: String,
    pub full: String,
    pub authority: Option<String>,
}

// ─── Outcomes ───────────────────────────────────────────────────────

/// Key of one of the four outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKey {
    Win,
    Partial,
    StatusQuo,
    Lose,
}

impl OutcomeKey {
    pub const ALL: [OutcomeKey; 4] = [
        OutcomeKey::Win,
        OutcomeKey::Partial,
        OutcomeKey::StatusQuo,
        OutcomeKey::Lose,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Partial => "Partial",
            Self::StatusQuo => "Status Quo",
            Self::Lose => "Lose",
        }
    }
}

/// The four outcomes of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcomes {
    pub win: Outcome,
    pub partial: Outcome,
    pub status_quo: Outcome,
    pub lose: Outcome,
}

impl Outcomes {
    pub fn get(&self, key: OutcomeKey) -> &Outcome {
        match key {
            OutcomeKey::Win => &self.win,
            OutcomeKey::Partial => &self.partial,
            OutcomeKey::StatusQuo => &self.status_quo,
            OutcomeKey::Lose => &self.lose,
        }
    }

    /// Outcomes paired with their keys, win first.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeKey, &Outcome)> {
        OutcomeKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

/// A weighted result of a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Move unlocked by this outcome. Explicit `null` in the fixture.
    #[serde(default)]
    pub cascade_to: Option<MoveId>,
    #[serde(default)]
    pub probability: f64,
    pub description: String,
}
