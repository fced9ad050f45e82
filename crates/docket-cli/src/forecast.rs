//! # Forecast Subcommand
//!
//! Cost and probability forecasting over the timeline: summed hour and cost
//! ranges, the running success probability, cumulative phase costs, the
//! resolution scenarios from the cost tables, and the effective hourly rate
//! of resolving at each stage under the flat fee.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use docket_core::fixture::{display_or_tbd, percent_or_tbd, CostsData, TimelineNode};
use docket_core::totals::{
    cascade_probabilities, cumulative_phase_costs, rank_resolutions, CumulativeCost, RankedResolution,
};
use docket_core::{ProbabilityBand, Totals};

use crate::config::Settings;
use crate::render::{banded, dollars};

/// Arguments for `docket forecast`.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Include evidence status and motion priority groups.
    #[arg(long)]
    pub evidence: bool,
}

/// One row of the cascade table.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeRow<'a> {
    pub node: &'a TimelineNode,
    pub cumulative: f64,
    pub band: ProbabilityBand,
}

/// The computed forecast.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast<'a> {
    pub totals: Totals,
    pub cascade: Vec<CascadeRow<'a>>,
    pub phases: Vec<CumulativeCost>,
    pub resolutions: Vec<RankedResolution<'a>>,
}

impl<'a> Forecast<'a> {
    pub fn compute(nodes: &'a [TimelineNode], costs: &'a CostsData) -> Self {
        let cascade = nodes
            .iter()
            .zip(cascade_probabilities(nodes))
            .map(|(node, cumulative)| CascadeRow {
                node,
                cumulative,
                band: ProbabilityBand::classify(cumulative),
            })
            .collect();
        Self {
            totals: Totals::from_nodes(nodes),
            cascade,
            phases: cumulative_phase_costs(costs),
            resolutions: rank_resolutions(&costs.resolution_scenarios),
        }
    }
}

/// Print the forecast.
pub fn run_forecast(args: &ForecastArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let costs = &bundle.costs;
    let forecast = Forecast::compute(&bundle.timeline.nodes, costs);

    if settings.json {
        let doc = serde_json::json!({
            "forecast": forecast,
            "scenarios": costs.scenarios,
            "summary": costs.summary,
            "outcomes": costs.outcomes,
            "evidence": args.evidence.then_some(&costs.evidence_status),
            "priorityGroups": args.evidence.then_some(&costs.motion_priority_groups),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(0);
    }

    let t = forecast.totals;
    println!("Totals across {} moves", bundle.timeline.nodes.len());
    println!("  Attorney hours: {}-{}", t.attorney_hours_min, t.attorney_hours_max);
    println!("  Travel hours: {}", t.travel_hours);
    println!("  Cost: {} - {}", dollars(t.cost_min), dollars(t.cost_max));
    println!(
        "  Rates: ${}/hr, travel ${}/hr",
        costs.attorney.hourly_rate, costs.attorney.travel_rate
    );

    println!();
    println!("Success cascade");
    for row in &forecast.cascade {
        println!(
            "  #{:<2} {:<40} {:>12}  cumulative {}",
            row.node.id,
            row.node.title,
            banded(row.node.probability),
            banded(row.cumulative),
        );
    }

    println!();
    println!("Cumulative cost by phase");
    for c in &forecast.phases {
        let note = if c.phase.is_trial() { "  (if necessary)" } else { "" };
        println!(
            "  {:<22} {:>9} - {:<9} running {} - {}{note}",
            c.phase.name(),
            dollars(c.phase_min),
            dollars(c.phase_max),
            dollars(c.cumulative_min),
            dollars(c.cumulative_max),
        );
    }

    println!();
    println!("Scenarios");
    for (id, s) in &costs.scenarios {
        println!(
            "  {} [{id}] {} - {} probability {}",
            s.name,
            dollars(s.estimated_total_min),
            dollars(s.estimated_total_max),
            percent_or_tbd(s.probability),
        );
        println!("      {}", s.description);
    }
    println!(
        "  Expected value: {}",
        display_or_tbd(costs.summary.expected_value.map(dollars))
    );

    if !forecast.resolutions.is_empty() {
        println!();
        println!("Resolution by stage (flat fee)");
        for r in &forecast.resolutions {
            let s = r.scenario;
            println!(
                "  {:<10} {:<22} {:>9} / {:>3}h = {:>6}/hr  {}",
                s.phase,
                s.resolution,
                dollars(s.total_fee),
                s.estimated_hours,
                display_or_tbd(r.effective_rate.map(dollars)),
                r.tier.as_str(),
            );
            println!("      {}: {}", s.outcome, s.reason);
        }
    }

    println!();
    println!("Outcomes");
    for o in &costs.outcomes {
        println!("  {:<16} {:>5}  {}", o.name, percent_or_tbd(o.probability), o.description);
    }

    if args.evidence {
        println!();
        println!("Motion priorities");
        for group in costs.motion_priority_groups.values() {
            println!("  {}: {}", group.label, group.motions.join(", "));
        }
        let ev = &costs.evidence_status;
        for (label, items) in [("Have", &ev.have), ("Need", &ev.need), ("Locate", &ev.locate)] {
            println!();
            println!("{label} ({})", items.len());
            for item in items {
                let note = item
                    .status
                    .as_deref()
                    .or(item.action.as_deref())
                    .or(item.location.as_deref())
                    .unwrap_or("");
                println!("  {}  {note}", item.item);
            }
        }
    }
    Ok(0)
}
