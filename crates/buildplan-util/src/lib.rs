//! Shared utilities for buildplan.
//!
//! This crate provides cross-cutting concerns used by the other buildplan
//! crates: the error taxonomy of the resolution pipeline, hashing for plan
//! fingerprints, and Cargo-style terminal status lines.

pub mod errors;
pub mod hash;
pub mod progress;
