//! # Progress Subcommand
//!
//! The per-attorney kanban board, persisted under the state directory.
//!
//! - `show`: columns and completion, optionally for one phase.
//! - `set`: move a task to another column and save.
//! - `reset`: delete the stored record; the next load starts fresh.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use docket_core::{Attorney, TimelinePhase};
use docket_state::{Board, TaskStatus};
use docket_store::{FileStore, Origin, ProgressStore};

use crate::config::Settings;

/// Arguments for `docket progress`.
#[derive(Args, Debug)]
pub struct ProgressArgs {
    #[command(subcommand)]
    pub command: ProgressCommand,
}

/// Progress subcommands.
#[derive(Subcommand, Debug)]
pub enum ProgressCommand {
    /// Show the board.
    Show {
        /// Only tasks in this phase (e.g. "Motion Battle").
        #[arg(long)]
        phase: Option<TimelinePhase>,
    },

    /// Move a task to a new status.
    Set {
        /// Task id.
        task: u32,
        /// New status: todo, in_progress or done.
        status: TaskStatus,
    },

    /// Forget the stored board.
    Reset,
}

/// Execute the progress subcommand.
pub fn run_progress(args: &ProgressArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let nodes = &bundle.timeline.nodes;
    let mut store = ProgressStore::new(FileStore::new(&settings.state_dir));
    let attorney = settings.attorney;

    match &args.command {
        ProgressCommand::Show { phase } => {
            let loaded = store
                .load_detailed(attorney, nodes)
                .context("failed to load progress")?;
            if settings.json {
                let doc = serde_json::json!({
                    "attorney": attorney,
                    "lastUpdated": loaded.last_updated,
                    "completion": loaded.board.completion(*phase),
                    "columns": loaded.board.columns(*phase),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print_board(&loaded.board, *phase, attorney, loaded.origin);
                if let Some(at) = loaded.last_updated {
                    println!("Last updated {at}");
                }
                if loaded.stale_tasks > 0 {
                    println!("{} task(s) reference moves no longer in the timeline", loaded.stale_tasks);
                }
            }
        }
        ProgressCommand::Set { task, status } => {
            let mut board = store.load(attorney, nodes).context("failed to load progress")?;
            let previous = board.set_status(*task, *status)?;
            store.save(attorney, &board).context("failed to save progress")?;
            let title = board.task(*task).map_or("", |t| t.title.as_str());
            println!("OK: task {task} ({title}) {previous} → {status}");
        }
        ProgressCommand::Reset => {
            if store.reset(attorney)? {
                println!("OK: progress for {attorney} reset");
            } else {
                println!("No stored progress for {attorney}.");
            }
        }
    }
    Ok(0)
}

fn print_board(board: &Board, phase: Option<TimelinePhase>, attorney: Attorney, origin: Origin) {
    let completion = board.completion(phase);
    let scope = phase.map_or_else(|| "All Phases".to_string(), |p| p.to_string());
    println!("Progress for {} ({scope})", attorney.info().name);
    if origin != Origin::Stored {
        println!("  (no saved progress; showing defaults)");
    }
    println!(
        "  {} of {} tasks complete ({}%)",
        completion.done, completion.total, completion.percent
    );

    let columns = board.columns(phase);
    for status in TaskStatus::ALL {
        let tasks = columns.get(status);
        println!();
        println!("{} ({})", status.label(), tasks.len());
        for t in tasks {
            let note = if t.phase.is_trial() { " [if necessary]" } else { "" };
            println!(
                "  [{:>2}] {:<8} {} | {} | due {}{note}",
                t.id,
                t.kind.label(),
                t.short_title(),
                t.phase,
                t.deadline
            );
        }
    }
}
