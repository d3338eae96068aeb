//! The resolution pipeline and its output.

use serde::Serialize;
use std::collections::BTreeMap;

use buildplan_core::descriptor::{BuildDescriptor, ToolchainSpec};
use buildplan_util::errors::{PlanError, PlanResult};
use buildplan_util::hash::sha256_chunks;

use crate::composer::{self, EffectiveConfig};
use crate::constraints;
use crate::graph::{self, ResolvedDependencySet};
use crate::registry::PluginRegistry;
use crate::warnings::WarningReport;

/// Bumped whenever the serialized plan layout changes.
pub const PLAN_FORMAT: &str = "buildplan/1";

/// SDK levels of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkLevels {
    pub min: String,
    pub target: String,
    pub compile: String,
}

/// A fully resolved, validated build plan for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub namespace: String,
    pub version_code: Option<u32>,
    pub variant: EffectiveConfig,
    pub sdk: SdkLevels,
    pub toolchain: ToolchainSpec,
    pub plugins: Vec<String>,
    pub compile_options: BTreeMap<String, bool>,
    pub extensions: BTreeMap<String, serde_json::Value>,
    pub dependencies: ResolvedDependencySet,
}

impl BuildPlan {
    /// Pretty JSON rendering of the plan.
    pub fn to_json(&self) -> PlanResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlanError::Render {
            message: e.to_string(),
        })
    }

    /// SHA-256 over the plan format tag and the compact JSON form.
    ///
    /// Equal plans always produce equal fingerprints.
    pub fn fingerprint(&self) -> PlanResult<String> {
        let json = serde_json::to_vec(self).map_err(|e| PlanError::Render {
            message: e.to_string(),
        })?;
        Ok(sha256_chunks([PLAN_FORMAT.as_bytes(), json.as_slice()]))
    }
}

/// A plan together with the non-fatal warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutcome {
    pub plan: BuildPlan,
    pub warnings: WarningReport,
}

impl PlanOutcome {
    /// Reject the outcome if it carries any warning.
    pub fn deny_warnings(self) -> PlanResult<Self> {
        if self.warnings.is_empty() {
            Ok(self)
        } else {
            Err(PlanError::WarningsDenied {
                count: self.warnings.len(),
            })
        }
    }
}

/// Validate the descriptor, compose `variant`, and resolve dependencies.
pub fn plan(
    descriptor: &BuildDescriptor,
    variant: &str,
    registry: &dyn PluginRegistry,
) -> PlanResult<PlanOutcome> {
    let descriptor = constraints::validate(descriptor, registry)?;
    let effective = composer::compose(descriptor, variant)?;
    let (dependencies, raised) = graph::resolve(&descriptor.dependencies)?;

    let mut warnings = WarningReport::new();
    warnings.extend(raised);
    for warning in warnings.iter() {
        tracing::debug!("{warning}");
    }

    let plan = BuildPlan {
        namespace: descriptor.namespace.clone(),
        version_code: descriptor.version_code,
        compile_options: effective.compile_option_values(),
        variant: effective,
        sdk: SdkLevels {
            min: descriptor.min_target.clone(),
            target: descriptor.target_target.clone(),
            compile: descriptor.compile_target.clone(),
        },
        toolchain: descriptor.toolchain.clone(),
        plugins: descriptor.plugins.clone(),
        extensions: descriptor.extensions.clone(),
        dependencies,
    };

    tracing::debug!(
        "Planned {} ({}) with {} dependencies",
        plan.variant.application_id,
        plan.variant.variant,
        plan.dependencies.len()
    );
    Ok(PlanOutcome { plan, warnings })
}
