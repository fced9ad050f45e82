//! Client deliverables (`deliverables.json`): documents and materials the
//! client owes counsel, with a status per item.

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;

/// The deliverables document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverablesData {
    pub deliverables: Vec<Deliverable>,
}

/// One item requested from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverable {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: DeliverableStatus,
    pub due_date: Option<NaiveDate>,
    pub category: DeliverableCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    Complete,
    InProgress,
    Pending,
}

impl DeliverableStatus {
    pub const ALL: [DeliverableStatus; 3] = [Self::Complete, Self::InProgress, Self::Pending];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::InProgress => "In Progress",
            Self::Pending => "Pending",
        }
    }
}

/// Grouping shown on the checklist, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableCategory {
    Documents,
    Financial,
    Communications,
    Evidence,
}

impl DeliverableCategory {
    pub const ALL: [DeliverableCategory; 4] = [
        Self::Documents,
        Self::Financial,
        Self::Communications,
        Self::Evidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Financial => "financial",
            Self::Communications => "communications",
            Self::Evidence => "evidence",
        }
    }
}

impl std::fmt::Display for DeliverableCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliverableCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown deliverable category {s:?} (expected documents, financial, communications or evidence)")
            })
    }
}

/// Counts per status and the share complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliverableSummary {
    pub complete: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub total: usize,
    /// Whole percent complete; zero for an empty checklist.
    pub percent: u8,
}

impl DeliverablesData {
    pub fn summary(&self) -> DeliverableSummary {
        let count = |status| self.deliverables.iter().filter(|d| d.status == status).count();
        let complete = count(DeliverableStatus::Complete);
        let total = self.deliverables.len();
        DeliverableSummary {
            complete,
            in_progress: count(DeliverableStatus::InProgress),
            pending: count(DeliverableStatus::Pending),
            total,
            percent: if total == 0 {
                0
            } else {
                (complete as f64 * 100.0 / total as f64).round() as u8
            },
        }
    }

    /// Items grouped by category in display order. Empty categories are
    /// omitted.
    pub fn by_category(&self) -> Vec<(DeliverableCategory, Vec<&Deliverable>)> {
        DeliverableCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let items: Vec<_> = self.deliverables.iter().filter(|d| d.category == category).collect();
                (!items.is_empty()).then_some((category, items))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, status: DeliverableStatus, category: DeliverableCategory) -> Deliverable {
        Deliverable {
            id: id.to_string(),
            title: format!("item {id}"),
            description: String::new(),
            status,
            due_date: None,
            category,
        }
    }

    #[test]
    fn summary_counts_and_rounds() {
        let data = DeliverablesData {
            deliverables: vec![
                item("1", DeliverableStatus::Complete, DeliverableCategory::Documents),
                item("2", DeliverableStatus::Pending, DeliverableCategory::Financial),
                item("3", DeliverableStatus::InProgress, DeliverableCategory::Documents),
            ],
        };
        let s = data.summary();
        assert_eq!((s.complete, s.in_progress, s.pending, s.total), (1, 1, 1, 3));
        assert_eq!(s.percent, 33);
        assert_eq!(DeliverablesData::default().summary().percent, 0);
    }

    #[test]
    fn groups_follow_category_order() {
        let data = DeliverablesData {
            deliverables: vec![
                item("1", DeliverableStatus::Pending, DeliverableCategory::Evidence),
                item("2", DeliverableStatus::Pending, DeliverableCategory::Documents),
                item("3", DeliverableStatus::Pending, DeliverableCategory::Evidence),
            ],
        };
        let groups = data.by_category();
        let shape: Vec<_> = groups.iter().map(|(c, items)| (*c, items.len())).collect();
        assert_eq!(shape, [(DeliverableCategory::Documents, 1), (DeliverableCategory::Evidence, 2)]);
    }

    #[test]
    fn parses_snake_case_status_and_category() {
        let d: Deliverable = serde_json::from_str(
            r#"{"id":"9","title":"t","description":"d","status":"in_progress","due_date":"2026-02-05","category":"communications"}"#,
        )
        .unwrap();
        assert_eq!(d.status, DeliverableStatus::InProgress);
        assert_eq!(d.category, DeliverableCategory::Communications);
        assert_eq!(d.due_date, NaiveDate::from_ymd_opt(2026, 2, 5));
        assert!("Financial".parse::<DeliverableCategory>().is_ok());
        assert!("receipts".parse::<DeliverableCategory>().is_err());
    }
}
