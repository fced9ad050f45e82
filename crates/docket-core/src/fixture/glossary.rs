//! Motions glossary: legal instruments grouped by category.

use serde::{Deserialize, Serialize};

/// The glossary document embedded in `gametree.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    #[serde(default)]
    pub categories: Vec<MotionCategory>,
    #[serde(default)]
    pub motions: Vec<Motion>,
}

/// A category of motions, tied to a strategy-tree phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub phase: String,
}

/// A motion or filing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub category: String,
    pub description: String,
    pub legal_basis: String,
    pub purpose: String,
    pub win_probability: Option<String>,
    pub key_arguments: Option<Vec<String>>,
    pub critical_evidence: Option<Vec<String>>,
    pub estimated_hours: Option<u32>,
    pub status: Option<String>,
}

/// Category filter applied by the glossary modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every motion.
    #[default]
    All,
    /// Motions in one category.
    Category(String),
}

impl CategoryFilter {
    /// Parse `all` (case-insensitive) or a category id.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(s.trim().to_string())
        }
    }

    pub fn matches(&self, motion: &Motion) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => &motion.category == id,
        }
    }
}

impl Glossary {
    /// Motions passing `filter`, in fixture order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Motion> + 'a {
        self.motions.iter().filter(move |m| filter.matches(m))
    }

    /// Number of motions in a category.
    pub fn count_in(&self, category_id: &str) -> usize {
        self.motions.iter().filter(|m| m.category == category_id).count()
    }

    pub fn category(&self, id: &str) -> Option<&MotionCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn motion(&self, id: &str) -> Option<&Motion> {
        self.motions.iter().find(|m| m.id == id)
    }
}
