//! # Fixture Schema
//!
//! Typed records for the five bundled JSON documents. They are loaded once
//! and never mutated.
//!
//! | Document        | Module         | Key style  |
//! |-----------------|----------------|------------|
//! | `case.json`     | [`case`]       | snake_case |
//! | `nodes.json`    | [`timeline`]   | snake_case |
//! | `costs.json`    | [`costs`]      | snake_case |
//! | `gametree.json` | [`tree`], [`glossary`] | camelCase |
//!
//! Fields the dashboard treats as optional are `Option<T>` and render as
//! `TBD` through [`display_or_tbd`].

pub mod case;
pub mod costs;
pub mod deliverables;
pub mod glossary;
pub mod timeline;
pub mod tree;

pub use case::{CaseAttorney, CaseData, Charges};
pub use costs::{
    CostSummary, CostsData, EvidenceItem, EvidenceStatus, MotionPriorityGroup, OutcomeEstimate,
    PhaseCost, RateCard, ResolutionScenario, Scenario,
};
pub use deliverables::{
    Deliverable, DeliverableCategory, DeliverableStatus, DeliverableSummary, DeliverablesData,
};
pub use glossary::{CategoryFilter, Glossary, Motion, MotionCategory};
pub use timeline::{GovtResponses, TimelineData, TimelineNode};
pub use tree::{
    Counter, GovtCounter, GovtRebuttal, Move, MoveDetails, Outcome, OutcomeKey, Outcomes,
    Response, ResponseKey, Responses, StrategyTree, TreePhase,
};

/// Placeholder shown for values the fixtures leave undetermined.
pub const TBD: &str = "TBD";

/// Render an optional value, or [`TBD`] when absent.
pub fn display_or_tbd<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| TBD.to_string(), |v| v.to_string())
}

/// Render an optional probability as a whole percentage, or [`TBD`].
pub fn percent_or_tbd(probability: Option<f64>) -> String {
    probability.map_or_else(
        || TBD.to_string(),
        |p| format!("{}%", (p * 100.0).round() as i64),
    )
}
