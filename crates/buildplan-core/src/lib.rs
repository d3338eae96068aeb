//! Core data types for buildplan.
//!
//! This crate defines the in-memory model of an Android application build
//! descriptor: application identity, SDK levels, toolchain, plugins, compile
//! options, signing configs, build variants and dependency declarations. It
//! also owns the manifest loader and the global planner configuration.
//!
//! This crate is intentionally free of resolution logic; validation and
//! composition live in `buildplan-resolver`.

/// File name the loader looks for when no manifest path is given.
pub const MANIFEST_FILE: &str = "buildplan.toml";

pub mod config;
pub mod dependency;
pub mod descriptor;
pub mod plugin;
pub mod variant;
