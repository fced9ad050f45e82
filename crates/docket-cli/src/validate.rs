//! # Validate Subcommand
//!
//! Loads the fixtures and reports structural problems. Duplicate move ids
//! and moves in unknown phases always fail. Dangling cascade targets fail
//! only with `--strict` (or `strict_cascades: true` in the config file).

use anyhow::Result;
use clap::Args;

use docket_core::{CascadePolicy, FixtureError};

use crate::config::Settings;

/// Arguments for `docket validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Treat dangling cascade targets as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the validate subcommand. Returns exit code 2 when the fixtures
/// are invalid.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<u8> {
    let policy = if args.strict {
        CascadePolicy::Strict
    } else {
        settings.cascade_policy
    };
    let source = settings
        .fixtures_dir
        .as_ref()
        .map_or_else(|| "bundled fixtures".to_string(), |d| d.display().to_string());

    // Always load leniently so every finding can be listed.
    let bundle = match settings.bundle_with(CascadePolicy::Lenient) {
        Ok(bundle) => bundle,
        Err(e) => {
            println!("FAIL: {source}: {e:#}");
            return Ok(2);
        }
    };
    let report = bundle.validate()?;

    println!(
        "{source}: {} phases, {} moves, {} timeline nodes, {} glossary motions, {} deliverables",
        bundle.tree.phases.len(),
        bundle.tree.moves.len(),
        bundle.timeline.nodes.len(),
        bundle.tree.motions_glossary.motions.len(),
        bundle.deliverables.deliverables.len()
    );
    for (from, to) in &report.dangling_cascades {
        println!("  dangling cascade: {from} -> {to}");
    }

    if report.is_clean() {
        println!("OK");
        Ok(0)
    } else if policy == CascadePolicy::Strict {
        println!("FAIL: {}", FixtureError::DanglingCascades(report.dangling_cascades));
        Ok(2)
    } else {
        println!("OK (lenient: dangling targets render as raw ids)");
        Ok(0)
    }
}
