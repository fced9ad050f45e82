//! # Error Types
//!
//! Errors raised while loading and validating fixtures. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! There are no fatal runtime paths once a bundle is loaded: missing optional
//! fields are `Option`s and render as placeholders. Failures here are limited
//! to fixtures that cannot be read, do not parse, or violate a structural
//! invariant under the strict cascade policy.

use std::path::PathBuf;

use thiserror::Error;

use crate::identity::{MoveId, PhaseId};

/// A single value failed to parse: an identifier, timestamp, attorney key or
/// phase name. Whole-document failures are [`FixtureError`]s.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocketError {
    #[error("schema validation error: {0}")]
    SchemaValidation(String),
}

/// Error loading or validating a fixture document.
#[derive(Error, Debug)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture {}: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The fixture document is not valid JSON for its schema.
    #[error("failed to parse fixture {name}: {source}")]
    Parse {
        /// Fixture name (e.g. `gametree.json`).
        name: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// Two moves share an identifier.
    #[error("duplicate move identifier: {0}")]
    DuplicateMove(MoveId),

    /// A move is tagged with a phase absent from the phase list.
    #[error("move {move_id} references unknown phase {phase}")]
    UnknownPhase {
        /// The offending move.
        move_id: MoveId,
        /// The phase it names.
        phase: PhaseId,
    },

    /// One or more `cascadeTo` targets name no move (strict policy only).
    #[error("{} dangling cascade reference(s): {}", .0.len(), format_dangling(.0))]
    DanglingCascades(Vec<(MoveId, MoveId)>),
}

fn format_dangling(pairs: &[(MoveId, MoveId)]) -> String {
    pairs
        .iter()
        .map(|(from, to)| format!("{from} -> {to}"))
        .collect::<Vec<_>>()
        .join(", ")
}
