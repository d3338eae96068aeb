//! Check command implementation.

use std::path::Path;

use buildplan_core::config::PlannerConfig;
use buildplan_core::descriptor::BuildDescriptor;
use buildplan_resolver::constraints;
use buildplan_util::progress;
use miette::Result;

pub fn exec(manifest: &Path, config: &PlannerConfig) -> Result<()> {
    let descriptor = BuildDescriptor::from_path(manifest)?;
    progress::status(
        "Checking",
        &format!("{} ({})", descriptor.application_id, manifest.display()),
    );

    let violations = constraints::violations(&descriptor, &super::registry(config));
    if violations.is_empty() {
        progress::status("Finished", "no violations");
        return Ok(());
    }

    for violation in &violations {
        progress::status_error("error", &violation.to_string());
    }
    Err(miette::miette!(
        "validation failed with {} violation(s) in {}",
        violations.len(),
        manifest.display()
    ))
}
