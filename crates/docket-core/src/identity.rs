//! # Identifier Newtypes and the Attorney Roster
//!
//! Newtype wrappers for fixture identifiers. A `MoveId` cannot be passed
//! where a `PhaseId` is expected, and neither can be empty.
//!
//! The [`Attorney`] enum is the identity threaded explicitly into the
//! progress store and into identity-specific labels. There is no ambient
//! "current attorney".

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DocketError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Create a ", $label, " identifier, rejecting empty or whitespace-only input.")]
            pub fn new(id: impl Into<String>) -> Result<Self, DocketError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(DocketError::SchemaValidation(format!(
                        "{} identifier must not be empty",
                        $label
                    )));
                }
                Ok(Self(id))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = DocketError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a strategy-tree move (e.g. `m1-3`).
    MoveId,
    "move"
);

string_id!(
    /// Identifier of a strategy-tree phase (e.g. `phase-1`).
    PhaseId,
    "phase"
);

// ─── Attorney roster ────────────────────────────────────────────────

/// Display details for a known attorney.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttorneyInfo {
    /// Full name.
    pub name: &'static str,
    /// Firm name.
    pub firm: &'static str,
    /// Short display name.
    pub short_name: &'static str,
}

/// A known identity. Progress records are stored per attorney.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attorney {
    /// Benjamin Cooper.
    Cooper,
    /// Bill Rush.
    Rush,
}

impl Attorney {
    /// Every known attorney.
    pub const ALL: [Attorney; 2] = [Attorney::Cooper, Attorney::Rush];

    /// Stable lowercase key used in storage keys and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Cooper => "cooper",
            Self::Rush => "rush",
        }
    }

    /// Display details.
    pub fn info(&self) -> AttorneyInfo {
        match self {
            Self::Cooper => AttorneyInfo {
                name: "Benjamin Cooper",
                firm: "Daigle Cooper & Associates",
                short_name: "Ben Cooper",
            },
            Self::Rush => AttorneyInfo {
                name: "Bill Rush",
                firm: "Rush Law Offices",
                short_name: "Bill Rush",
            },
        }
    }
}

impl std::fmt::Display for Attorney {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Attorney {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cooper" => Ok(Self::Cooper),
            "rush" => Ok(Self::Rush),
            other => Err(DocketError::SchemaValidation(format!(
                "unknown attorney {other:?} (expected one of: cooper, rush)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ids_rejected() {
        assert!(MoveId::new("").is_err());
        assert!(MoveId::new("   ").is_err());
        assert!(PhaseId::new("").is_err());
    }

    #[test]
    fn test_id_serde_is_transparent_string() {
        let id = MoveId::new("m1-3").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m1-3\"");
        let back: MoveId = serde_json::from_str("\"m1-3\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_empty_id_rejected_on_deserialize() {
        assert!(serde_json::from_str::<PhaseId>("\"\"").is_err());
    }

    #[test]
    fn test_attorney_parse_is_case_insensitive() {
        assert_eq!("cooper".parse::<Attorney>().unwrap(), Attorney::Cooper);
        assert_eq!("  RUSH ".parse::<Attorney>().unwrap(), Attorney::Rush);
        assert!("alan".parse::<Attorney>().is_err());
    }

    #[test]
    fn test_attorney_info() {
        assert_eq!(Attorney::Cooper.info().firm, "Daigle Cooper & Associates");
        assert_eq!(Attorney::Rush.info().name, "Bill Rush");
        assert_eq!(Attorney::Rush.to_string(), "rush");
    }

    #[test]
    fn test_attorney_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Attorney::Cooper).unwrap(), "\"cooper\"");
    }
}
