//! Command dispatch and handler modules.

mod check;
mod plan;
mod variants;

use std::path::PathBuf;

use buildplan_core::config::PlannerConfig;
use buildplan_resolver::registry::StaticRegistry;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let config = PlannerConfig::load()?;
    let manifest = cli
        .manifest
        .unwrap_or_else(|| PathBuf::from(&config.manifest.file_name));

    match cli.command {
        Command::Check => check::exec(&manifest, &config),
        Command::Plan {
            variant,
            deny_warnings,
            fingerprint,
        } => plan::exec(
            &manifest,
            &config,
            &variant,
            deny_warnings || config.policy.deny_warnings,
            fingerprint,
        ),
        Command::Variants => variants::exec(&manifest),
    }
}

/// Built-in plugin registry extended with the config's `[plugins]` entries.
fn registry(config: &PlannerConfig) -> StaticRegistry {
    StaticRegistry::builtin().with_entries(config.plugins.clone())
}
