//! # Fixture Bundle
//!
//! Loads the five fixture documents as one immutable [`FixtureBundle`].
//! The default documents are compiled into the binary; a directory holding
//! files of the same names can replace them.
//!
//! ## Validation
//!
//! Loading runs [`FixtureBundle::validate`]:
//!
//! - duplicate move ids and moves tagged with unknown phases always fail;
//! - dangling `cascadeTo` targets fail under [`CascadePolicy::Strict`] and
//!   are logged and tolerated under [`CascadePolicy::Lenient`], where views
//!   fall back to showing the raw identifier.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::FixtureError;
use crate::fixture::{CaseData, CostsData, DeliverablesData, StrategyTree, TimelineData};
use crate::identity::MoveId;

const CASE_JSON: &str = include_str!("../fixtures/case.json");
const NODES_JSON: &str = include_str!("../fixtures/nodes.json");
const COSTS_JSON: &str = include_str!("../fixtures/costs.json");
const GAMETREE_JSON: &str = include_str!("../fixtures/gametree.json");
const DELIVERABLES_JSON: &str = include_str!("../fixtures/deliverables.json");

/// File names of the fixture documents.
pub const FIXTURE_FILES: [&str; 5] = [
    "case.json",
    "nodes.json",
    "costs.json",
    "gametree.json",
    "deliverables.json",
];

/// How to treat `cascadeTo` targets that name no move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CascadePolicy {
    /// Log and continue; views show the raw identifier.
    #[default]
    Lenient,
    /// Refuse to load.
    Strict,
}

/// Findings from [`FixtureBundle::validate`] that do not prevent loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// `(move, missing target)` pairs.
    pub dangling_cascades: Vec<(MoveId, MoveId)>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_cascades.is_empty()
    }
}

/// The complete, read-only fixture set.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureBundle {
    pub case: CaseData,
    pub timeline: TimelineData,
    pub costs: CostsData,
    pub tree: StrategyTree,
    pub deliverables: DeliverablesData,
}

impl FixtureBundle {
    /// The documents compiled into the binary.
    pub fn bundled(policy: CascadePolicy) -> Result<Self, FixtureError> {
        Self::from_sources(
            CASE_JSON,
            NODES_JSON,
            COSTS_JSON,
            GAMETREE_JSON,
            DELIVERABLES_JSON,
            policy,
        )
    }

    /// Read every document named in [`FIXTURE_FILES`] from `dir`.
    pub fn from_dir(dir: &Path, policy: CascadePolicy) -> Result<Self, FixtureError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| FixtureError::Read { path, source })
        };
        let case = read("case.json")?;
        let nodes = read("nodes.json")?;
        let costs = read("costs.json")?;
        let tree = read("gametree.json")?;
        let deliverables = read("deliverables.json")?;
        tracing::debug!(dir = %dir.display(), "loaded fixtures from directory");
        Self::from_sources(&case, &nodes, &costs, &tree, &deliverables, policy)
    }

    /// Parse the documents from JSON text and validate them.
    pub fn from_sources(
        case: &str,
        nodes: &str,
        costs: &str,
        tree: &str,
        deliverables: &str,
        policy: CascadePolicy,
    ) -> Result<Self, FixtureError> {
        let bundle = Self {
            case: parse("case.json", case)?,
            timeline: parse("nodes.json", nodes)?,
            costs: parse("costs.json", costs)?,
            tree: parse("gametree.json", tree)?,
            deliverables: parse("deliverables.json", deliverables)?,
        };

        let report = bundle.validate()?;
        if !report.is_clean() {
            match policy {
                CascadePolicy::Strict => {
                    return Err(FixtureError::DanglingCascades(report.dangling_cascades));
                }
                CascadePolicy::Lenient => {
                    for (from, to) in &report.dangling_cascades {
                        tracing::warn!(%from, %to, "cascade target names no move; showing raw id");
                    }
                }
            }
        }

        tracing::debug!(
            moves = bundle.tree.moves.len(),
            phases = bundle.tree.phases.len(),
            nodes = bundle.timeline.nodes.len(),
            "fixture bundle loaded"
        );
        Ok(bundle)
    }

    /// Check structural invariants. Hard violations are errors; dangling
    /// cascades are reported for the caller's policy to decide.
    pub fn validate(&self) -> Result<ValidationReport, FixtureError> {
        let mut seen = HashSet::new();
        for mv in &self.tree.moves {
            if !seen.insert(&mv.id) {
                return Err(FixtureError::DuplicateMove(mv.id.clone()));
            }
            if self.tree.phase(&mv.phase).is_none() {
                return Err(FixtureError::UnknownPhase {
                    move_id: mv.id.clone(),
                    phase: mv.phase.clone(),
                });
            }
        }

        let dangling_cascades = self
            .tree
            .moves
            .iter()
            .flat_map(|mv| {
                mv.outcomes
                    .iter()
                    .filter_map(|(_, outcome)| outcome.cascade_to.as_ref())
                    .filter(|target| !seen.contains(target))
                    .map(|target| (mv.id.clone(), target.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(ValidationReport { dangling_cascades })
    }

    /// Title of `id`, or the raw id when no such move exists.
    pub fn move_title_or_id(&self, id: &MoveId) -> String {
        self.tree
            .find_move(id)
            .map_or_else(|| id.to_string(), |m| m.title.clone())
    }
}

fn parse<T: DeserializeOwned>(name: &str, text: &str) -> Result<T, FixtureError> {
    serde_json::from_str(text).map_err(|source| FixtureError::Parse {
        name: name.to_string(),
        source,
    })
}
