//! CLI argument definitions for buildplan.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "buildplan",
    version,
    about = "Validate Android build descriptors and resolve them into build plans",
    long_about = "buildplan checks a declarative Android build descriptor (SDK levels, \
                  toolchain, plugin order, signing configs, variants, BOM-pinned \
                  dependencies) and prints the fully resolved plan for one variant."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the manifest (defaults to the configured file name in the current directory)
    #[arg(short, long, global = true, env = "BUILDPLAN_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the manifest and report every violation
    Check,

    /// Resolve a variant and print its build plan as JSON
    Plan {
        /// Variant name, e.g. release
        variant: String,
        /// Fail if any warning is raised
        #[arg(long)]
        deny_warnings: bool,
        /// Also print the plan fingerprint
        #[arg(long)]
        fingerprint: bool,
    },

    /// List declared variants and their signing identities
    Variants,
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
