//! Timeline nodes (`nodes.json`): the move list as the timeline, cost, and
//! progress views see it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::TimelinePhase;

/// The timeline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    /// Day zero of the engagement.
    pub engagement_start: NaiveDate,
    /// Nodes in timeline order.
    pub nodes: Vec<TimelineNode>,
}

/// One defense move on the timeline, with its hour and cost estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineNode {
    pub id: u32,
    pub title: String,
    pub phase: TimelinePhase,
    pub day_from_start: u32,
    pub deadline: NaiveDate,
    pub client_task: String,
    pub attorney_task: String,
    pub attorney_hours_min: u32,
    pub attorney_hours_max: u32,
    pub travel_hours: u32,
    pub estimated_cost_min: u64,
    pub estimated_cost_max: u64,
    /// Estimated probability of success, `0.0..=1.0`.
    pub probability: f64,
    pub govt_responses: GovtResponses,
}

/// One-line summaries of the four anticipated government responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovtResponses {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl GovtResponses {
    /// The four responses labelled `A`..`D`, in order.
    pub fn labelled(&self) -> [(char, &str); 4] {
        [
            ('A', self.a.as_str()),
            ('B', self.b.as_str()),
            ('C', self.c.as_str()),
            ('D', self.d.as_str()),
        ]
    }
}
