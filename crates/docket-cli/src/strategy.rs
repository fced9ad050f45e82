//! # Strategy Tree Subcommands
//!
//! `tree`, `phases`, `overview` and `glossary` all render the same
//! dashboard in different modes.
//!
//! The tree is interactive in the dashboard; here the interaction is given
//! up front as an ordered list of `--do` steps, replayed against a fresh
//! view before rendering:
//!
//! ```bash
//! docket tree --phase phase-1 --do toggle=m1-3 --do respond=m1-3:B
//! docket tree --do toggle=m0-1 --do advance --do toggle=m1-1
//! ```

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;

use docket_core::fixture::{CategoryFilter, ResponseKey};
use docket_core::{FixtureBundle, MoveId, PhaseId};
use docket_state::{Dashboard, Layout, TreeView};

use crate::config::Settings;
use crate::render::screen_text;

// ─── Steps ──────────────────────────────────────────────────────────

/// One interaction replayed against the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `toggle=<move>`
    Toggle(MoveId),
    /// `respond=<move>:<A|B|C|D>`
    Respond(MoveId, ResponseKey),
    /// `select=<move>`: show a move in the detail panel.
    Select(MoveId),
    /// `phase=<phase>`
    Phase(PhaseId),
    /// `advance`
    Advance,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = s.split_once('=').unwrap_or((s, ""));
        let move_id = |raw: &str| MoveId::new(raw.trim()).map_err(|e| format!("{s:?}: {e}"));
        match verb.trim() {
            "toggle" => Ok(Self::Toggle(move_id(arg)?)),
            "select" => Ok(Self::Select(move_id(arg)?)),
            "respond" => {
                let (mv, key) = arg
                    .rsplit_once(':')
                    .ok_or_else(|| format!("{s:?}: expected respond=<move>:<A-D>"))?;
                let key = key.parse::<ResponseKey>().map_err(|e| format!("{s:?}: {e}"))?;
                Ok(Self::Respond(move_id(mv)?, key))
            }
            "phase" => PhaseId::new(arg.trim())
                .map(Self::Phase)
                .map_err(|e| format!("{s:?}: {e}")),
            "advance" if arg.is_empty() => Ok(Self::Advance),
            _ => Err(format!(
                "unknown step {s:?} (expected toggle=, respond=, select=, phase= or advance)"
            )),
        }
    }
}

impl Step {
    fn apply(&self, view: &mut TreeView<'_>) -> Result<()> {
        match self {
            Self::Toggle(id) => {
                view.toggle_move(id)?;
            }
            Self::Respond(id, key) => {
                view.select_response(id, *key)?;
            }
            Self::Select(id) => view.select_move(id)?,
            Self::Phase(id) => view.set_phase(id)?,
            Self::Advance => {
                view.advance_phase()?;
            }
        }
        Ok(())
    }
}

// ─── Arguments ──────────────────────────────────────────────────────

/// Arguments for `docket tree`.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Phase to open on (e.g. "phase-1"). Defaults to the first phase.
    #[arg(long)]
    pub phase: Option<String>,

    /// Interaction step, applied in order. Repeatable.
    #[arg(long = "do", value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Stop the loading gauge after this many ticks instead of finishing it.
    #[arg(long)]
    pub ticks: Option<u8>,
}

/// Arguments for `docket glossary`.
#[derive(Args, Debug)]
pub struct GlossaryArgs {
    /// Category id to filter by, or "all".
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Motion id to show in full.
    #[arg(long)]
    pub motion: Option<String>,
}

// ─── Handlers ───────────────────────────────────────────────────────

fn new_dashboard(bundle: &FixtureBundle) -> Result<Dashboard<'_>> {
    Ok(Dashboard::new(TreeView::new(&bundle.tree)?))
}

fn emit(dash: &Dashboard<'_>, settings: &Settings) -> Result<u8> {
    let screen = dash.render()?;
    if settings.json {
        println!("{}", serde_json::to_string_pretty(&screen)?);
    } else {
        print!("{}", screen_text(&screen, settings.attorney));
    }
    Ok(0)
}

/// Replay steps against the tree and print the resulting screen.
pub fn run_tree(args: &TreeArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let mut dash = new_dashboard(&bundle)?;
    build_tree(&mut dash, args)?;
    emit(&dash, settings)
}

fn build_tree(dash: &mut Dashboard<'_>, args: &TreeArgs) -> Result<()> {
    if let Some(phase) = &args.phase {
        let phase = PhaseId::new(phase.as_str())?;
        dash.choose_phase(&phase)?;
    }
    for (i, step) in args.steps.iter().enumerate() {
        step.apply(dash.view_mut())
            .with_context(|| format!("step {} ({step:?}) failed", i + 1))?;
    }
    let view = dash.view_mut();
    match args.ticks {
        Some(n) => {
            for _ in 0..n {
                view.tick();
            }
        }
        None => {
            while !view.is_loaded() {
                let percent = view.tick();
                tracing::trace!(percent, "loading");
            }
        }
    }
    Ok(())
}

/// Print the grid of core phases.
pub fn run_phases(settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let mut dash = new_dashboard(&bundle)?;
    dash.show(Layout::AllPhases);
    emit(&dash, settings)
}

/// Print per-phase metrics for the core phases.
pub fn run_overview(settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let mut dash = new_dashboard(&bundle)?;
    dash.show(Layout::OverviewMap);
    emit(&dash, settings)
}

/// Print the motions glossary.
pub fn run_glossary(args: &GlossaryArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let mut dash = new_dashboard(&bundle)?;
    dash.filter_glossary(CategoryFilter::parse(&args.category))?;
    dash.select_motion(args.motion.as_deref())?;
    emit(&dash, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocketConfig, Overrides};
    use docket_state::{MoveState, Screen};

    fn settings() -> Settings {
        Settings::resolve(DocketConfig::default(), Overrides::default())
    }

    fn id(s: &str) -> MoveId {
        MoveId::new(s).unwrap()
    }

    #[test]
    fn parse_steps() {
        assert_eq!("toggle=m1-3".parse::<Step>().unwrap(), Step::Toggle(id("m1-3")));
        assert_eq!(
            "respond=m1-3:b".parse::<Step>().unwrap(),
            Step::Respond(id("m1-3"), ResponseKey::B)
        );
        assert_eq!("advance".parse::<Step>().unwrap(), Step::Advance);
        assert!("respond=m1-3".parse::<Step>().is_err());
        assert!("respond=m1-3:E".parse::<Step>().is_err());
        assert!("toggle=".parse::<Step>().is_err());
        assert!("advance=now".parse::<Step>().is_err());
        assert!("jump".parse::<Step>().is_err());
    }

    #[test]
    fn build_tree_applies_steps_in_order() {
        let bundle = settings().bundle().unwrap();
        let mut dash = new_dashboard(&bundle).unwrap();
        let args = TreeArgs {
            phase: None,
            steps: vec![
                Step::Toggle(id("m0-1")),
                Step::Advance,
                Step::Toggle(id("m1-3")),
                Step::Respond(id("m1-3"), ResponseKey::B),
            ],
            ticks: None,
        };
        build_tree(&mut dash, &args).unwrap();
        assert_eq!(dash.view().phase().as_str(), "phase-1");
        assert_eq!(dash.view().move_state(&id("m1-3")), MoveState::Responding(ResponseKey::B));
        assert!(matches!(dash.render().unwrap(), Screen::SinglePhase { .. }));
    }

    #[test]
    fn build_tree_reports_failing_step() {
        let bundle = settings().bundle().unwrap();
        let mut dash = new_dashboard(&bundle).unwrap();
        let args = TreeArgs {
            phase: Some("phase-1".into()),
            steps: vec![Step::Respond(id("m1-1"), ResponseKey::A)],
            ticks: None,
        };
        let err = build_tree(&mut dash, &args).unwrap_err();
        assert!(format!("{err:#}").contains("step 1"));
        assert!(format!("{err:#}").contains("collapsed"));
    }

    #[test]
    fn partial_ticks_leave_loading_screen() {
        let bundle = settings().bundle().unwrap();
        let mut dash = new_dashboard(&bundle).unwrap();
        let args = TreeArgs {
            phase: None,
            steps: vec![],
            ticks: Some(4),
        };
        build_tree(&mut dash, &args).unwrap();
        assert!(matches!(dash.render().unwrap(), Screen::Loading { percent: 40, .. }));
    }

    #[test]
    fn handlers_succeed() {
        let s = settings();
        assert_eq!(run_phases(&s).unwrap(), 0);
        assert_eq!(run_overview(&s).unwrap(), 0);
        let args = GlossaryArgs {
            category: "attack-counts-1".into(),
            motion: Some("mot-franks".into()),
        };
        assert_eq!(run_glossary(&args, &s).unwrap(), 0);
    }

    #[test]
    fn glossary_unknown_category_fails() {
        let args = GlossaryArgs {
            category: "nope".into(),
            motion: None,
        };
        assert!(run_glossary(&args, &settings()).is_err());
    }
}
