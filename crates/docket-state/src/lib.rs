//! # docket-state — View-State Machines
//!
//! Holds everything the dashboard remembers between interactions. None of it
//! is persisted except the progress board, which `docket-store` saves.
//!
//! ## State Machines
//!
//! - **Strategy tree** (`tree.rs`): per-move disclosure
//!   `Collapsed ⇄ Expanded ⇄ Responding(k)`, a monotonic reviewed set, the
//!   current phase with its advance gate, and the loading gauge.
//!
//! - **Render mode** (`mode.rs`): single phase, all phases, overview map, and
//!   the glossary modal. One enum, one `render` dispatch.
//!
//! - **Progress board** (`progress.rs`): tasks derived from timeline nodes
//!   moving freely between `todo`, `in_progress` and `done`.
//!
//! ## Design
//!
//! Views borrow the immutable fixture bundle. State is keyed by move id, so
//! switching phase or layout never loses a choice already made.

pub mod mode;
pub mod progress;
pub mod tree;

// ─── Tree re-exports ────────────────────────────────────────────────

pub use tree::{AdvancePrompt, CascadePointer, LoadGauge, MoveCard, MoveState, TreeError, TreeView};

// ─── Mode re-exports ────────────────────────────────────────────────

pub use mode::{CategoryCount, Dashboard, Layout, OverviewTotals, PhaseColumn, RenderMode, Screen};

// ─── Progress re-exports ────────────────────────────────────────────

pub use progress::{derive_tasks, Board, Columns, Completion, ProgressError, Task, TaskKind, TaskStatus};
