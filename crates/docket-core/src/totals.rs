//! # Aggregate Calculators
//!
//! Pure reductions over the fixture data. Every function here is
//! side-effect free and cheap enough to recompute on each render.
//!
//! - [`Totals`] — summed hour and cost ranges over the timeline move list.
//! - [`cascade_probabilities`] — running product of per-move success odds.
//! - [`cumulative_phase_costs`] — running cost range through the phases.
//! - [`PhaseMetrics`] — per-phase counts for the strategy-tree overview.
//! - [`rank_resolutions`] — effective hourly rate of each resolution stage.

use std::ops::Add;

use serde::Serialize;

use crate::fixture::{CostsData, ResolutionScenario, StrategyTree, TimelineNode};
use crate::identity::PhaseId;
use crate::schedule::TimelinePhase;

// ─── Totals ─────────────────────────────────────────────────────────

/// Hour and cost ranges summed across a set of timeline nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub attorney_hours_min: u32,
    pub attorney_hours_max: u32,
    pub travel_hours: u32,
    pub cost_min: u64,
    pub cost_max: u64,
}

impl Totals {
    /// The contribution of a single node.
    pub fn of(node: &TimelineNode) -> Self {
        Self {
            attorney_hours_min: node.attorney_hours_min,
            attorney_hours_max: node.attorney_hours_max,
            travel_hours: node.travel_hours,
            cost_min: node.estimated_cost_min,
            cost_max: node.estimated_cost_max,
        }
    }

    /// Sum over `nodes`. Order-independent.
    pub fn from_nodes<'a>(nodes: impl IntoIterator<Item = &'a TimelineNode>) -> Self {
        nodes.into_iter().map(Self::of).fold(Self::default(), Add::add)
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            attorney_hours_min: self.attorney_hours_min + rhs.attorney_hours_min,
            attorney_hours_max: self.attorney_hours_max + rhs.attorney_hours_max,
            travel_hours: self.travel_hours + rhs.travel_hours,
            cost_min: self.cost_min + rhs.cost_min,
            cost_max: self.cost_max + rhs.cost_max,
        }
    }
}

// ─── Probability ────────────────────────────────────────────────────

/// Probability of reaching each node, assuming every earlier node succeeds.
///
/// `result[i]` is the product of `nodes[0..=i].probability`.
pub fn cascade_probabilities(nodes: &[TimelineNode]) -> Vec<f64> {
    nodes
        .iter()
        .scan(1.0_f64, |acc, node| {
            *acc *= node.probability;
            Some(*acc)
        })
        .collect()
}

/// Coarse banding used to colour probability figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityBand {
    High,
    Medium,
    Low,
}

impl ProbabilityBand {
    /// `>= 0.7` high, `>= 0.4` medium, otherwise low.
    pub fn classify(probability: f64) -> Self {
        if probability >= 0.7 {
            Self::High
        } else if probability >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ─── Phases ─────────────────────────────────────────────────────────

/// Nodes grouped by phase, in litigation order. Phases without nodes are
/// omitted; node order within a phase follows the input.
pub fn group_by_phase(nodes: &[TimelineNode]) -> Vec<(TimelinePhase, Vec<&TimelineNode>)> {
    TimelinePhase::ALL
        .into_iter()
        .filter_map(|phase| {
            let members: Vec<_> = nodes.iter().filter(|n| n.phase == phase).collect();
            (!members.is_empty()).then_some((phase, members))
        })
        .collect()
}

/// Running cost range after each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeCost {
    pub phase: TimelinePhase,
    pub phase_min: u64,
    pub phase_max: u64,
    pub cumulative_min: u64,
    pub cumulative_max: u64,
}

/// Cost range accumulated through every phase in litigation order. A phase
/// missing from the cost table contributes zero.
pub fn cumulative_phase_costs(costs: &CostsData) -> Vec<CumulativeCost> {
    let mut min = 0;
    let mut max = 0;
    TimelinePhase::ALL
        .into_iter()
        .map(|phase| {
            let (phase_min, phase_max) = costs
                .phases
                .get(&phase)
                .map_or((0, 0), |p| (p.estimated_cost_min, p.estimated_cost_max));
            min += phase_min;
            max += phase_max;
            CumulativeCost {
                phase,
                phase_min,
                phase_max,
                cumulative_min: min,
                cumulative_max: max,
            }
        })
        .collect()
}

/// Counts for one strategy-tree phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseMetrics {
    pub phase: PhaseId,
    /// Number of moves in the phase.
    pub motion_count: usize,
    /// Prepared counters: four per move.
    pub counter_count: usize,
    /// Mean `win` outcome probability, zero for an empty phase.
    pub avg_win_probability: f64,
}

impl PhaseMetrics {
    pub fn for_phase(tree: &StrategyTree, phase: &PhaseId) -> Self {
        let (count, win_sum) = tree
            .moves_in(phase)
            .fold((0usize, 0.0_f64), |(n, sum), m| (n + 1, sum + m.outcomes.win.probability));
        Self {
            phase: phase.clone(),
            motion_count: count,
            counter_count: count * 4,
            avg_win_probability: if count == 0 { 0.0 } else { win_sum / count as f64 },
        }
    }

    /// Metrics for each core phase, in order.
    pub fn core(tree: &StrategyTree) -> Vec<Self> {
        tree.core_phases()
            .iter()
            .map(|p| Self::for_phase(tree, &p.id))
            .collect()
    }
}

// ─── Resolution ─────────────────────────────────────────────────────

/// Tier of a resolution stage, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTier {
    Optimal,
    Excellent,
    Good,
    Standard,
    Extended,
}

impl RateTier {
    pub const ALL: [RateTier; 5] = [
        Self::Optimal,
        Self::Excellent,
        Self::Good,
        Self::Standard,
        Self::Extended,
    ];

    /// Tier for the stage at `rank` (0 = highest effective rate). Ranks past
    /// the last tier stay `Extended`.
    pub fn for_rank(rank: usize) -> Self {
        Self::ALL[rank.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Standard => "standard",
            Self::Extended => "extended",
        }
    }
}

/// Fee divided by hours, rounded to whole dollars. `None` for zero hours.
pub fn effective_rate(total_fee: u64, hours: u32) -> Option<u64> {
    (hours > 0).then(|| (total_fee as f64 / f64::from(hours)).round() as u64)
}

/// A resolution stage with its effective rate and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResolution<'a> {
    pub scenario: &'a ResolutionScenario,
    pub effective_rate: Option<u64>,
    pub tier: RateTier,
}

/// Stages ordered by effective rate, highest first, with tiers assigned by
/// position. Stages without hours sort last; ties keep fixture order.
pub fn rank_resolutions(scenarios: &[ResolutionScenario]) -> Vec<RankedResolution<'_>> {
    let mut rated: Vec<_> = scenarios
        .iter()
        .map(|s| (s, effective_rate(s.total_fee, s.estimated_hours)))
        .collect();
    rated.sort_by(|a, b| b.1.cmp(&a.1));
    rated
        .into_iter()
        .enumerate()
        .map(|(rank, (scenario, effective_rate))| RankedResolution {
            scenario,
            effective_rate,
            tier: RateTier::for_rank(rank),
        })
        .collect()
}
