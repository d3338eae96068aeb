//! Plan command implementation.

use std::path::Path;

use buildplan_core::config::PlannerConfig;
use buildplan_core::descriptor::BuildDescriptor;
use buildplan_util::progress;
use miette::Result;

pub fn exec(
    manifest: &Path,
    config: &PlannerConfig,
    variant: &str,
    deny_warnings: bool,
    fingerprint: bool,
) -> Result<()> {
    let descriptor = BuildDescriptor::from_path(manifest)?;
    progress::status(
        "Planning",
        &format!("{} ({variant})", descriptor.application_id),
    );

    let outcome = buildplan_resolver::plan(&descriptor, variant, &super::registry(config))?;
    for warning in outcome.warnings.iter() {
        progress::status_warn("warning", &warning.to_string());
    }
    let outcome = if deny_warnings {
        outcome.deny_warnings()?
    } else {
        outcome
    };

    println!("{}", outcome.plan.to_json()?);
    if fingerprint {
        progress::status_info("Fingerprint", &outcome.plan.fingerprint()?);
    }
    Ok(())
}
