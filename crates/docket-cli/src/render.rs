//! Plain-text rendering of dashboard screens.

use std::fmt::Write as _;

use docket_core::fixture::{display_or_tbd, percent_or_tbd, Move, TBD};
use docket_core::{Attorney, ProbabilityBand};
use docket_state::{MoveCard, MoveState, Screen};

/// Render a screen as indented text, one item per line.
pub fn screen_text(screen: &Screen<'_>, attorney: Attorney) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_screen(&mut out, screen, attorney);
    out
}

fn write_screen(out: &mut String, screen: &Screen<'_>, attorney: Attorney) -> std::fmt::Result {
    match screen {
        Screen::Loading { phase, percent } => {
            let filled = usize::from(*percent / 10);
            writeln!(
                out,
                "Loading {} [{}{}] {percent}%",
                phase.name,
                "#".repeat(filled),
                ".".repeat(10 - filled)
            )?;
        }
        Screen::SinglePhase {
            phase,
            cards,
            prompt,
            detail,
        } => {
            writeln!(out, "{} ({})", phase.name, phase.id)?;
            if let Some(range) = &phase.date_range {
                writeln!(out, "  {range}")?;
            }
            if let Some(description) = &phase.description {
                writeln!(out, "  {description}")?;
            }
            writeln!(out)?;
            for card in cards {
                write_card(out, card)?;
            }
            if let Some(prompt) = prompt {
                writeln!(out)?;
                let target = prompt
                    .next_phase
                    .as_ref()
                    .map_or_else(|| "final phase".to_string(), |p| format!("next: {p}"));
                writeln!(
                    out,
                    "Reviewed {}/{} moves. Advance {} ({target})",
                    prompt.reviewed,
                    prompt.total,
                    if prompt.enabled { "available" } else { "locked" },
                )?;
            }
            if let Some(mv) = detail {
                writeln!(out)?;
                write_detail(out, mv, attorney)?;
            }
        }
        Screen::AllPhases { columns } => {
            for column in columns {
                writeln!(out, "{} ({})", column.phase.name, column.phase.id)?;
                for (mv, responses) in &column.moves {
                    writeln!(out, "  {:<6} {}  [{responses} responses]", mv.id.as_str(), mv.title)?;
                }
            }
        }
        Screen::OverviewMap { metrics, totals } => {
            writeln!(out, "{:<10} {:>7} {:>8} {:>8}", "PHASE", "MOTIONS", "COUNTERS", "AVG WIN")?;
            for m in metrics {
                writeln!(
                    out,
                    "{:<10} {:>7} {:>8} {:>8}",
                    m.phase.as_str(),
                    m.motion_count,
                    m.counter_count,
                    percent_or_tbd(nonzero(m.avg_win_probability)),
                )?;
            }
            writeln!(
                out,
                "{:<10} {:>7} {:>8}",
                format!("{} phases", totals.phases),
                totals.motions,
                totals.counters
            )?;
        }
        Screen::Glossary {
            under,
            total,
            categories,
            motions,
            selected,
        } => {
            writeln!(out, "Motions glossary ({total} motions, over {under:?})")?;
            for c in categories {
                writeln!(out, "  [{}] {} ({})", c.category.id, c.category.name, c.count)?;
            }
            writeln!(out)?;
            for m in motions {
                writeln!(out, "  {:<24} {} [{}]", m.id, m.name, m.category)?;
            }
            if let Some(m) = selected {
                writeln!(out)?;
                writeln!(out, "{} ({})", m.name, m.short_name)?;
                writeln!(out, "  {}", m.description)?;
                writeln!(out, "  Legal basis: {}", m.legal_basis)?;
                writeln!(out, "  Purpose: {}", m.purpose)?;
                writeln!(out, "  Win probability: {}", display_or_tbd(m.win_probability.as_deref()))?;
                writeln!(out, "  Estimated hours: {}", display_or_tbd(m.estimated_hours))?;
                for arg in m.key_arguments.iter().flatten() {
                    writeln!(out, "  - {arg}")?;
                }
                if let Some(evidence) = &m.critical_evidence {
                    writeln!(out, "  Critical evidence: {}", evidence.join("; "))?;
                }
            }
        }
    }
    Ok(())
}

fn write_card(out: &mut String, card: &MoveCard<'_>) -> std::fmt::Result {
    let marker = match card.state {
        MoveState::Collapsed => "+",
        _ => "-",
    };
    let reviewed = if card.reviewed { " (reviewed)" } else { "" };
    writeln!(out, "{marker} {} {}{reviewed}", card.mv.id, card.mv.title)?;
    if !card.responses_visible {
        return Ok(());
    }

    let chosen = match card.state {
        MoveState::Responding(k) => Some(k),
        _ => None,
    };
    for (key, response) in card.mv.responses.iter() {
        let pointer = if Some(key) == chosen { ">" } else { " " };
        writeln!(out, "   {pointer}{key}: {} [{TBD}]", response.text)?;
    }
    if let Some((key, counter)) = card.counter {
        writeln!(out, "    Counter to {key}: {}", counter.brief)?;
        writeln!(out, "      {}", counter.full)?;
        writeln!(out, "      Next: {}", counter.next_action)?;
    }
    if let Some(outcomes) = card.outcomes {
        for (key, outcome) in outcomes.iter() {
            writeln!(out, "    {:<10} [{TBD}] {}", key.label(), outcome.description)?;
        }
    }
    if let Some(cascade) = &card.cascade {
        writeln!(out, "    Win unlocks: {}", cascade.label)?;
    }
    Ok(())
}

fn write_detail(out: &mut String, mv: &Move, attorney: Attorney) -> std::fmt::Result {
    let d = &mv.details;
    writeln!(out, "Detail: {} ({}, {})", mv.title, mv.id, mv.kind)?;
    writeln!(out, "  Deadline: {}", d.deadline)?;
    writeln!(out, "  Client: {}", d.client_task)?;
    writeln!(out, "  Attorney: {}", d.attorney_task)?;
    writeln!(out, "  Hours: {}  Cost: {}", d.hours, display_or_tbd(d.cost.map(|c| format!("${c}"))))?;
    if !d.evidence.is_empty() {
        writeln!(out, "  Evidence: {}", d.evidence.join("; "))?;
    }
    if let Some(min) = &d.minimum_acceptable {
        writeln!(out, "  Minimum acceptable: {min}")?;
    }
    if let Some(cont) = &d.requested_continuance {
        writeln!(out, "  Requested continuance: {cont}")?;
    }
    for (key, response) in mv.responses.iter() {
        if let Some(gc) = &response.govt_counter {
            writeln!(out, "  If we file ({key}): {}", gc.if_we_file)?;
            writeln!(out, "    Their argument: {}", gc.their_argument)?;
            writeln!(out, "    Our rebuttal: {}", gc.our_rebuttal.brief)?;
            if let Some(authority) = &gc.our_rebuttal.authority {
                writeln!(out, "    Authority: {authority}")?;
            }
        }
    }
    writeln!(
        out,
        "  Strategy determined in consultation with {}",
        attorney.info().name
    )
}

/// Probability placeholders are zero in the fixtures and shown as TBD.
pub fn nonzero(p: f64) -> Option<f64> {
    (p > 0.0).then_some(p)
}

/// A probability with its band, e.g. `85% (high)`.
pub fn banded(p: f64) -> String {
    format!("{}% ({})", (p * 100.0).round() as i64, ProbabilityBand::classify(p).as_str())
}

/// Whole dollars with thousands separators.
pub fn dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}
