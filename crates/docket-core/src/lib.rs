//! # docket-core — Foundational Types for the Litigation Tracker
//!
//! Defines the typed fixture schema, identifier newtypes, UTC timestamps,
//! the litigation schedule, and the pure aggregate calculators. Every other
//! crate in the workspace depends on `docket-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Fixtures are immutable.** A [`FixtureBundle`] is loaded once and
//!    shared by reference. Nothing in the workspace mutates it.
//!
//! 2. **Structural invariants live in the types.** A move has exactly four
//!    responses and four outcomes because they are struct fields, not map
//!    entries. Optional fixture fields are `Option<T>`.
//!
//! 3. **Identity is explicit.** [`Attorney`] is passed to whatever needs it;
//!    there is no global "current user".
//!
//! ## Crate Policy
//!
//! - No dependencies on other `docket-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod bundle;
pub mod error;
pub mod fixture;
pub mod identity;
pub mod schedule;
pub mod temporal;
pub mod totals;

pub use bundle::{CascadePolicy, FixtureBundle, ValidationReport};
pub use error::{DocketError, FixtureError};
pub use identity::{Attorney, AttorneyInfo, MoveId, PhaseId};
pub use schedule::TimelinePhase;
pub use temporal::Timestamp;
pub use totals::{PhaseMetrics, ProbabilityBand, RateTier, Totals};
