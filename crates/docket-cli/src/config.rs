//! # Configuration
//!
//! Optional YAML file, `docket.yaml` in the working directory unless
//! `--config` names another. Every field is optional:
//!
//! ```yaml
//! state_dir: .docket/state
//! fixtures_dir: ./fixtures
//! default_attorney: cooper
//! strict_cascades: false
//! ```
//!
//! Command-line flags override file values; built-in defaults fill the rest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docket_core::{Attorney, CascadePolicy, FixtureBundle, Timestamp};

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "docket.yaml";

/// State directory used when neither flag nor file sets one.
pub const DEFAULT_STATE_DIR: &str = ".docket/state";

/// Contents of the YAML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocketConfig {
    pub state_dir: Option<PathBuf>,
    pub fixtures_dir: Option<PathBuf>,
    pub default_attorney: Option<Attorney>,
    pub strict_cascades: bool,
}

impl DocketConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("invalid YAML in {}", path.display()))
    }

    /// The explicit file if given, else `docket.yaml` in `cwd` if present,
    /// else defaults. An explicit path that does not exist is an error.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let implicit = cwd.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            tracing::debug!(path = %implicit.display(), "using config file");
            return Self::load(&implicit);
        }
        Ok(Self::default())
    }
}

/// Values taken from global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub fixtures_dir: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub attorney: Option<Attorney>,
    pub today: Option<NaiveDate>,
    pub json: bool,
}

/// Effective settings after merging flags, file, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fixtures_dir: Option<PathBuf>,
    pub state_dir: PathBuf,
    pub attorney: Attorney,
    pub cascade_policy: CascadePolicy,
    /// The date day counts are measured from.
    pub today: NaiveDate,
    /// Print JSON instead of text.
    pub json: bool,
}

impl Settings {
    pub fn resolve(config: DocketConfig, overrides: Overrides) -> Self {
        Self {
            fixtures_dir: overrides.fixtures_dir.or(config.fixtures_dir),
            state_dir: overrides
                .state_dir
                .or(config.state_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            attorney: overrides
                .attorney
                .or(config.default_attorney)
                .unwrap_or(Attorney::Cooper),
            cascade_policy: if config.strict_cascades {
                CascadePolicy::Strict
            } else {
                CascadePolicy::Lenient
            },
            today: overrides.today.unwrap_or_else(|| Timestamp::now().date()),
            json: overrides.json,
        }
    }

    /// Load fixtures under the configured policy.
    pub fn bundle(&self) -> Result<FixtureBundle> {
        self.bundle_with(self.cascade_policy)
    }

    /// Load fixtures from the configured directory, or the bundled set.
    pub fn bundle_with(&self, policy: CascadePolicy) -> Result<FixtureBundle> {
        match &self.fixtures_dir {
            Some(dir) => FixtureBundle::from_dir(dir, policy)
                .with_context(|| format!("failed to load fixtures from {}", dir.display())),
            None => FixtureBundle::bundled(policy).context("bundled fixtures are invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let yaml = "state_dir: /var/docket\nfixtures_dir: ./fx\ndefault_attorney: rush\nstrict_cascades: true\n";
        let config: DocketConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/var/docket")));
        assert_eq!(config.default_attorney, Some(Attorney::Rush));
        assert!(config.strict_cascades);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(serde_yaml::from_str::<DocketConfig>("colour: blue\n").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = DocketConfig {
            state_dir: Some(PathBuf::from("from-file")),
            default_attorney: Some(Attorney::Rush),
            ..Default::default()
        };
        let settings = Settings::resolve(
            config,
            Overrides {
                attorney: Some(Attorney::Cooper),
                today: NaiveDate::from_ymd_opt(2026, 11, 20),
                ..Default::default()
            },
        );
        assert_eq!(settings.attorney, Attorney::Cooper);
        assert_eq!(settings.state_dir, PathBuf::from("from-file"));
        assert_eq!(settings.cascade_policy, CascadePolicy::Lenient);
    }

    #[test]
    fn defaults_apply() {
        let settings = Settings::resolve(DocketConfig::default(), Overrides::default());
        assert_eq!(settings.attorney, Attorney::Cooper);
        assert_eq!(settings.state_dir, PathBuf::from(DEFAULT_STATE_DIR));
        assert!(settings.fixtures_dir.is_none());
        assert!(settings.bundle().is_ok());
    }

    #[test]
    fn discover_reads_implicit_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "strict_cascades: true\n").unwrap();
        let config = DocketConfig::discover(None, dir.path()).unwrap();
        assert!(config.strict_cascades);
    }

    #[test]
    fn discover_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(DocketConfig::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn discover_without_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DocketConfig::discover(None, dir.path()).unwrap(), DocketConfig::default());
    }
}
