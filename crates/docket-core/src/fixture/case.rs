//! Case metadata (`case.json`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Static metadata for the matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseData {
    /// Caption, e.g. "United States v. ...".
    pub name: String,
    /// Docket number.
    pub docket: String,
    /// Court.
    pub court: String,
    /// Presiding judge.
    pub judge: String,
    /// Defendant.
    pub defendant: String,
    /// Lead counsel and billing terms.
    pub attorney: CaseAttorney,
    /// Target resolution date.
    pub target_date: NaiveDate,
    /// Scheduled trial date.
    pub trial_date: NaiveDate,
    /// Day zero of the engagement.
    pub engagement_start: NaiveDate,
    /// Counts charged.
    pub charges: Charges,
}

/// Lead counsel as recorded in the case file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAttorney {
    pub name: String,
    pub firm: String,
    pub hourly_rate: u32,
    pub travel_time_hours: u32,
}

/// Counts charged in the indictment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    pub total: u32,
    pub conspiracy: u32,
    pub wire_fraud: u32,
    pub tax_evasion: u32,
    pub tax_failure: u32,
}

impl Charges {
    /// Compact breakdown, e.g. `9WF, 2TE, 2TF`.
    pub fn breakdown(&self) -> String {
        format!(
            "{}WF, {}TE, {}TF",
            self.wire_fraud, self.tax_evasion, self.tax_failure
        )
    }
}
