//! # docket-cli — Command-Line Front End
//!
//! Provides the `docket` binary. Each subcommand has an `Args` struct and a
//! `run_*` handler returning the process exit code.
//!
//! ## Subcommands
//!
//! - `docket case`: Case header, countdowns, current phase, timeline
//!   (optionally one `--phase`).
//! - `docket tree`: Strategy tree for one phase, after replaying `--do` steps.
//! - `docket phases`: Grid of the core phases.
//! - `docket overview`: Motion and counter counts per core phase.
//! - `docket glossary`: Motions glossary with category filter.
//! - `docket progress`: Per-attorney kanban board (show, set, reset).
//! - `docket forecast`: Totals, success cascade, phase costs, scenarios,
//!   effective rate per resolution stage.
//! - `docket deliverables`: Client checklist by category.
//! - `docket validate`: Fixture integrity report.
//!
//! ```bash
//! docket --attorney rush progress set 3 done
//! docket tree --phase phase-1 --do toggle=m1-3 --do respond=m1-3:B
//! docket --json overview
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separate from the handlers.
//! - Handlers delegate to the library crates; no domain logic here.

pub mod case;
pub mod config;
pub mod deliverables;
pub mod forecast;
pub mod progress;
pub mod render;
pub mod strategy;
pub mod validate;
