//! # Case Subcommand
//!
//! Case header, countdowns, and the phase the schedule says the case is in.
//! With `--timeline`, every timeline node grouped by phase; `--phase` narrows
//! the listing to one phase and implies `--timeline`.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use docket_core::schedule::{current_phase, days_since_engagement, days_until};
use docket_core::fixture::{display_or_tbd, TimelineNode};
use docket_core::totals::group_by_phase;
use docket_core::{FixtureBundle, TimelinePhase};

use crate::config::Settings;
use crate::render::banded;

/// Arguments for `docket case`.
#[derive(Args, Debug)]
pub struct CaseArgs {
    /// Also list the timeline nodes by phase.
    #[arg(long)]
    pub timeline: bool,

    /// Only list nodes in this phase (e.g. "Motion Battle").
    #[arg(long)]
    pub phase: Option<TimelinePhase>,
}

impl CaseArgs {
    fn lists_timeline(&self) -> bool {
        self.timeline || self.phase.is_some()
    }
}

/// Timeline nodes grouped by phase, restricted to `phase` when given.
pub fn timeline_groups(
    nodes: &[TimelineNode],
    phase: Option<TimelinePhase>,
) -> Vec<(TimelinePhase, Vec<&TimelineNode>)> {
    group_by_phase(nodes)
        .into_iter()
        .filter(|(p, _)| phase.map_or(true, |want| *p == want))
        .collect()
}

/// Computed status figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseStatus {
    pub day: i64,
    pub current_phase: TimelinePhase,
    pub days_to_target: i64,
    pub days_to_trial: i64,
}

impl CaseStatus {
    pub fn compute(bundle: &FixtureBundle, today: chrono::NaiveDate) -> Self {
        let case = &bundle.case;
        Self {
            day: days_since_engagement(case.engagement_start, today),
            current_phase: current_phase(case.engagement_start, today),
            days_to_target: days_until(case.target_date, today),
            days_to_trial: days_until(case.trial_date, today),
        }
    }
}

fn countdown(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

/// Print the case summary.
pub fn run_case(args: &CaseArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let status = CaseStatus::compute(&bundle, settings.today);
    let case = &bundle.case;

    if settings.json {
        let doc = serde_json::json!({
            "case": case,
            "status": status,
            "attorney": settings.attorney,
            "timeline": args.lists_timeline().then(|| {
                timeline_groups(&bundle.timeline.nodes, args.phase)
                    .into_iter()
                    .flat_map(|(_, nodes)| nodes)
                    .collect::<Vec<_>>()
            }),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(0);
    }

    println!("{}", case.name);
    println!("  Docket: {}", case.docket);
    println!("  Court: {}", case.court);
    println!("  Judge: {}", case.judge);
    println!("  Defendant: {}", case.defendant);
    println!(
        "  Charges: {} counts ({} conspiracy, {})",
        case.charges.total,
        case.charges.conspiracy,
        case.charges.breakdown()
    );
    println!(
        "  Counsel: {}, {} (${}/hr, {}h travel)",
        case.attorney.name, case.attorney.firm, case.attorney.hourly_rate, case.attorney.travel_time_hours
    );
    let info = settings.attorney.info();
    println!("  Viewing as: {} ({})", info.name, info.firm);
    println!();
    println!("  Engagement start: {} (day {})", case.engagement_start, status.day);
    println!("  Current phase: {}", status.current_phase);
    println!("  Target date: {} ({})", case.target_date, countdown(status.days_to_target));
    println!("  Trial date: {} ({})", case.trial_date, countdown(status.days_to_trial));

    if args.lists_timeline() {
        let groups = timeline_groups(&bundle.timeline.nodes, args.phase);
        if groups.is_empty() {
            println!();
            println!("No timeline nodes in {}", display_or_tbd(args.phase));
        }
        for (phase, nodes) in groups {
            let marker = if phase == status.current_phase { " <- current" } else { "" };
            println!();
            println!("{phase}{marker}");
            for node in nodes {
                println!(
                    "  #{:<2} {} (day {}, due {} {}) {}",
                    node.id,
                    node.title,
                    node.day_from_start,
                    node.deadline,
                    countdown(days_until(node.deadline, settings.today)),
                    banded(node.probability),
                );
                println!("      Client: {}", node.client_task);
                println!("      Attorney: {}", node.attorney_task);
                for (key, text) in node.govt_responses.labelled() {
                    println!("      {key}: {text}");
                }
            }
        }
    }
    Ok(0)
}
