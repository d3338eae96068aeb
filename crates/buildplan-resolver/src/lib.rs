//! Resolution engine: validates a build descriptor, composes a variant over
//! the shared defaults, and resolves dependency declarations under platform
//! pins into a [`plan::BuildPlan`].
//!
//! Every stage is synchronous and pure; resolving the same descriptor twice
//! yields identical plans.

pub mod composer;
pub mod constraints;
pub mod graph;
pub mod plan;
pub mod registry;
pub mod version;
pub mod warnings;

pub use plan::{plan, BuildPlan, PlanOutcome};
