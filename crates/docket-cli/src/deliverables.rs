//! # Deliverables Subcommand
//!
//! The client checklist: counts per status, the share complete, and each
//! item grouped by category. Open items whose due date has passed are
//! flagged overdue relative to `--today`.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use docket_core::fixture::{Deliverable, DeliverableCategory, DeliverableStatus, DeliverableSummary};

use crate::config::Settings;

/// Arguments for `docket deliverables`.
#[derive(Args, Debug)]
pub struct DeliverablesArgs {
    /// Only list items in this category.
    #[arg(long)]
    pub category: Option<DeliverableCategory>,
}

/// An open item past its due date.
pub fn is_overdue(item: &Deliverable, today: NaiveDate) -> bool {
    item.status != DeliverableStatus::Complete && item.due_date.is_some_and(|due| due < today)
}

#[derive(Debug, Serialize)]
struct Group<'a> {
    category: DeliverableCategory,
    items: Vec<&'a Deliverable>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    summary: DeliverableSummary,
    overdue: Vec<&'a str>,
    groups: Vec<Group<'a>>,
}

/// Print the checklist.
pub fn run_deliverables(args: &DeliverablesArgs, settings: &Settings) -> Result<u8> {
    let bundle = settings.bundle()?;
    let data = &bundle.deliverables;
    let wanted = |c: DeliverableCategory| args.category.map_or(true, |want| c == want);
    let report = Report {
        summary: data.summary(),
        overdue: data
            .deliverables
            .iter()
            .filter(|d| wanted(d.category) && is_overdue(d, settings.today))
            .map(|d| d.id.as_str())
            .collect(),
        groups: data
            .by_category()
            .into_iter()
            .filter(|(c, _)| wanted(*c))
            .map(|(category, items)| Group { category, items })
            .collect(),
    };

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    let s = report.summary;
    println!("Client deliverables: {}/{} complete ({}%)", s.complete, s.total, s.percent);
    println!(
        "  {} {}, {} {}, {} {}",
        s.complete,
        DeliverableStatus::Complete.label(),
        s.in_progress,
        DeliverableStatus::InProgress.label(),
        s.pending,
        DeliverableStatus::Pending.label(),
    );
    if report.groups.is_empty() {
        println!();
        println!("No deliverables in this category.");
    }
    for group in &report.groups {
        println!();
        println!("{}", group.category);
        for d in &group.items {
            let due = match d.due_date {
                Some(due) if is_overdue(d, settings.today) => format!("  due {due} (overdue)"),
                Some(due) => format!("  due {due}"),
                None => String::new(),
            };
            println!("  [{:<11}] {}{due}", d.status.label(), d.title);
            println!("      {}", d.description);
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocketConfig, Overrides};

    fn item(status: DeliverableStatus, due_date: Option<NaiveDate>) -> Deliverable {
        Deliverable {
            id: "9".to_string(),
            title: "Witness list".to_string(),
            description: String::new(),
            status,
            due_date,
            category: DeliverableCategory::Evidence,
        }
    }

    #[test]
    fn overdue_needs_open_status_and_past_date() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2026, 1, 25);
        assert!(is_overdue(&item(DeliverableStatus::Pending, past), today));
        assert!(is_overdue(&item(DeliverableStatus::InProgress, past), today));
        assert!(!is_overdue(&item(DeliverableStatus::Complete, past), today));
        assert!(!is_overdue(&item(DeliverableStatus::Pending, Some(today)), today));
        assert!(!is_overdue(&item(DeliverableStatus::Pending, None), today));
    }

    #[test]
    fn run_deliverables_text_json_and_filter() {
        let text = Settings::resolve(DocketConfig::default(), Overrides::default());
        assert_eq!(run_deliverables(&DeliverablesArgs { category: None }, &text).unwrap(), 0);

        let json = Settings::resolve(
            DocketConfig::default(),
            Overrides {
                json: true,
                ..Default::default()
            },
        );
        let financial = DeliverablesArgs {
            category: Some(DeliverableCategory::Financial),
        };
        assert_eq!(run_deliverables(&financial, &json).unwrap(), 0);
    }

    #[test]
    fn category_flag_parses_case_insensitively() {
        assert_eq!("Financial".parse(), Ok(DeliverableCategory::Financial));
        assert!("invoices".parse::<DeliverableCategory>().is_err());
    }
}
