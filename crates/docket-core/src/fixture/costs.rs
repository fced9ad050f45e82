//! Cost tables (`costs.json`): per-phase budgets, resolution scenarios, and
//! evidence tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schedule::TimelinePhase;

/// The cost document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostsData {
    pub attorney: RateCard,
    /// Budget per timeline phase. Phases may be missing.
    pub phases: BTreeMap<TimelinePhase, PhaseCost>,
    /// Resolution scenarios keyed by identifier.
    pub scenarios: BTreeMap<String, Scenario>,
    pub summary: CostSummary,
    #[serde(default)]
    pub motion_priority_groups: BTreeMap<String, MotionPriorityGroup>,
    #[serde(default)]
    pub evidence_status: EvidenceStatus,
    #[serde(default)]
    pub outcomes: Vec<OutcomeEstimate>,
    /// What resolving the case at each stage looks like under the flat fee.
    #[serde(default)]
    pub resolution_scenarios: Vec<ResolutionScenario>,
}

/// Billing rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub name: String,
    pub hourly_rate: u32,
    pub travel_rate: u32,
}

/// Budget for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseCost {
    /// Timeline node ids in this phase.
    pub moves: Vec<u32>,
    pub total_attorney_hours_min: u32,
    pub total_attorney_hours_max: u32,
    pub total_travel_hours: u32,
    pub estimated_cost_min: u64,
    pub estimated_cost_max: u64,
    pub description: String,
}

/// A resolution scenario: which phases are incurred and at what cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub phases_included: Vec<TimelinePhase>,
    pub probability: Option<f64>,
    pub estimated_total_min: u64,
    pub estimated_total_max: u64,
    pub description: String,
}

/// Whole-matter cost summary as recorded in the fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_moves: u32,
    pub total_attorney_hours_min: u32,
    pub total_attorney_hours_max: u32,
    pub total_travel_hours: u32,
    pub minimum_cost: Option<u64>,
    pub maximum_cost: Option<u64>,
    pub expected_value: Option<u64>,
}

/// A labelled group of motions sharing a filing priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionPriorityGroup {
    pub label: String,
    pub motions: Vec<String>,
}

/// Evidence the defense has, needs, or must locate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceStatus {
    #[serde(default)]
    pub have: Vec<EvidenceItem>,
    #[serde(default)]
    pub need: Vec<EvidenceItem>,
    #[serde(default)]
    pub locate: Vec<EvidenceItem>,
}

/// One evidence item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub item: String,
    pub status: Option<String>,
    pub action: Option<String>,
    pub location: Option<String>,
}

/// A named case outcome with an optional probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEstimate {
    pub name: String,
    pub probability: Option<f64>,
    pub description: String,
}

/// The case resolving at a given stage: the fee is flat, so an earlier
/// resolution means fewer hours for the same amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionScenario {
    /// Stage label, e.g. `Phase 1` or `Phase 5-6`.
    pub phase: String,
    pub resolution: String,
    pub outcome: String,
    pub reason: String,
    pub total_fee: u64,
    pub estimated_hours: u32,
}
