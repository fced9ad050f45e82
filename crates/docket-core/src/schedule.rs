//! # Litigation Schedule
//!
//! The six timeline phases in their fixed order, and the day-count rule that
//! maps "days since engagement" to the phase the case should currently be in.
//!
//! ```text
//! day  0..=14  Discovery/Taint
//! day 15..=35  Motion Battle
//! day 36..=45  Evidentiary Hearings
//! day 46..=56  Plea Negotiation
//! day 57..=82  Pretrial Prep
//! day 83..     Trial
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DocketError;
use crate::temporal::days_between;

/// A timeline phase. Declaration order is the litigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimelinePhase {
    /// Discovery demands and taint record.
    #[serde(rename = "Discovery/Taint")]
    DiscoveryTaint,
    /// Suppression and dismissal motions.
    #[serde(rename = "Motion Battle")]
    MotionBattle,
    /// Franks and suppression hearings.
    #[serde(rename = "Evidentiary Hearings")]
    EvidentiaryHearings,
    /// Plea discussions.
    #[serde(rename = "Plea Negotiation")]
    PleaNegotiation,
    /// Limine motions and trial preparation.
    #[serde(rename = "Pretrial Prep")]
    PretrialPrep,
    /// Trial.
    #[serde(rename = "Trial")]
    Trial,
}

impl TimelinePhase {
    /// All phases in litigation order.
    pub const ALL: [TimelinePhase; 6] = [
        TimelinePhase::DiscoveryTaint,
        TimelinePhase::MotionBattle,
        TimelinePhase::EvidentiaryHearings,
        TimelinePhase::PleaNegotiation,
        TimelinePhase::PretrialPrep,
        TimelinePhase::Trial,
    ];

    /// The display name, identical to the fixture spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DiscoveryTaint => "Discovery/Taint",
            Self::MotionBattle => "Motion Battle",
            Self::EvidentiaryHearings => "Evidentiary Hearings",
            Self::PleaNegotiation => "Plea Negotiation",
            Self::PretrialPrep => "Pretrial Prep",
            Self::Trial => "Trial",
        }
    }

    /// Last day (inclusive, counted from engagement) that belongs to this
    /// phase. `None` for the open-ended trial phase.
    pub fn last_day(&self) -> Option<i64> {
        match self {
            Self::DiscoveryTaint => Some(14),
            Self::MotionBattle => Some(35),
            Self::EvidentiaryHearings => Some(45),
            Self::PleaNegotiation => Some(56),
            Self::PretrialPrep => Some(82),
            Self::Trial => None,
        }
    }

    /// Whether this is the trial phase, which the forecasting tables grey out.
    pub fn is_trial(&self) -> bool {
        matches!(self, Self::Trial)
    }
}

impl std::fmt::Display for TimelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TimelinePhase {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DocketError::SchemaValidation(format!("unknown timeline phase {s:?}")))
    }
}

/// Days elapsed since engagement, clamped at zero before engagement starts.
pub fn days_since_engagement(engagement_start: NaiveDate, today: NaiveDate) -> i64 {
    days_between(engagement_start, today).max(0)
}

/// Days remaining until `target`. Negative once the date has passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, target)
}

/// The phase the case should be in on `today`.
pub fn current_phase(engagement_start: NaiveDate, today: NaiveDate) -> TimelinePhase {
    let elapsed = days_since_engagement(engagement_start, today);
    TimelinePhase::ALL
        .into_iter()
        .find(|phase| phase.last_day().map_or(true, |last| elapsed <= last))
        .unwrap_or(TimelinePhase::Trial)
}
