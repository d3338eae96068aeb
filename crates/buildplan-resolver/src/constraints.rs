//! Descriptor validation: SDK ordering, toolchain versions, plugin order and
//! compile-option consistency.
//!
//! Every check runs on every call and all violations are returned together,
//! so a manifest can be fixed in one pass.

use std::collections::HashSet;

use buildplan_core::dependency::DependencyScope;
use buildplan_core::descriptor::BuildDescriptor;
use buildplan_core::plugin::PluginClass;
use buildplan_util::errors::{ConstraintViolation, PlanError, PlanResult};

use crate::registry::PluginRegistry;
use crate::version::VersionId;

/// Compile option enabling core library desugaring.
pub const CORE_LIBRARY_DESUGARING: &str = "core-library-desugaring";

const JAVA_LEVELS: &[&str] = &[
    "1.6", "1.7", "1.8", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25",
];

/// Validate a descriptor, returning it unchanged when every rule holds.
pub fn validate<'a>(
    descriptor: &'a BuildDescriptor,
    registry: &dyn PluginRegistry,
) -> PlanResult<&'a BuildDescriptor> {
    let violations = violations(descriptor, registry);
    if violations.is_empty() {
        tracing::debug!("{} passed validation", descriptor.application_id);
        Ok(descriptor)
    } else {
        tracing::debug!(
            "{} failed validation with {} violation(s)",
            descriptor.application_id,
            violations.len()
        );
        Err(PlanError::Validation { violations })
    }
}

/// Collect every rule the descriptor breaks, in check order.
pub fn violations(
    descriptor: &BuildDescriptor,
    registry: &dyn PluginRegistry,
) -> Vec<ConstraintViolation> {
    let mut out = Vec::new();
    check_targets(descriptor, &mut out);
    check_toolchain(descriptor, &mut out);
    check_plugins(&descriptor.plugins, registry, &mut out);
    check_jvm(descriptor, &mut out);
    check_desugaring(descriptor, &mut out);
    out
}

fn check_targets(descriptor: &BuildDescriptor, out: &mut Vec<ConstraintViolation>) {
    let levels = [
        ("min-target", descriptor.min_target.as_str()),
        ("target-target", descriptor.target_target.as_str()),
        ("compile-target", descriptor.compile_target.as_str()),
    ];

    let parsed = levels.map(|(field, value)| match VersionId::parse(value) {
        Some(v) => Some((field, v)),
        None => {
            out.push(ConstraintViolation::InvalidTarget {
                field,
                value: value.to_string(),
            });
            None
        }
    });

    // min <= compile follows from the neighbouring pairs unless target is unusable.
    let pairs: &[(usize, usize)] = if parsed[1].is_some() {
        &[(0, 1), (1, 2)]
    } else {
        &[(0, 2)]
    };
    for &(lo, hi) in pairs {
        if let (Some((lower_field, lower)), Some((upper_field, upper))) = (&parsed[lo], &parsed[hi])
        {
            if lower > upper {
                out.push(ConstraintViolation::TargetOrder {
                    lower_field: *lower_field,
                    lower: lower.to_string(),
                    upper_field: *upper_field,
                    upper: upper.to_string(),
                });
            }
        }
    }
}

fn check_toolchain(descriptor: &BuildDescriptor, out: &mut Vec<ConstraintViolation>) {
    if let Some(version) = &descriptor.toolchain.version {
        if !is_numeric_triple(version) {
            out.push(ConstraintViolation::ToolchainPattern {
                value: version.clone(),
            });
        }
    }
}

/// `MAJOR.MINOR.PATCH` with no pre-release or build metadata.
fn is_numeric_triple(value: &str) -> bool {
    semver::Version::parse(value)
        .map(|v| v.pre.is_empty() && v.build.is_empty())
        .unwrap_or(false)
}

fn check_plugins(
    plugins: &[String],
    registry: &dyn PluginRegistry,
    out: &mut Vec<ConstraintViolation>,
) {
    let mut seen = HashSet::new();
    let mut first_framework: Option<&str> = None;

    for id in plugins {
        if !seen.insert(id.as_str()) {
            out.push(ConstraintViolation::DuplicatePlugin { id: id.clone() });
            continue;
        }
        match registry.classify(id) {
            None => out.push(ConstraintViolation::UnknownPlugin { id: id.clone() }),
            Some(PluginClass::Framework) => {
                first_framework.get_or_insert(id.as_str());
            }
            Some(class) if class.precedes_framework() => {
                if let Some(framework) = first_framework {
                    out.push(ConstraintViolation::PluginOrderViolation {
                        plugin: id.clone(),
                        class: class.to_string(),
                        framework: framework.to_string(),
                    });
                }
            }
            Some(_) => {}
        }
    }
}

fn check_jvm(descriptor: &BuildDescriptor, out: &mut Vec<ConstraintViolation>) {
    let toolchain = &descriptor.toolchain;
    let fields = [
        ("source-compatibility", &toolchain.source_compatibility),
        ("target-compatibility", &toolchain.target_compatibility),
        ("jvm-target", &toolchain.jvm_target),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            if !JAVA_LEVELS.contains(&value.as_str()) {
                out.push(ConstraintViolation::UnknownJavaLevel {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    if let (Some(jvm_target), Some(target_compatibility)) =
        (&toolchain.jvm_target, &toolchain.target_compatibility)
    {
        if java_level(jvm_target) != java_level(target_compatibility) {
            out.push(ConstraintViolation::JvmTargetMismatch {
                jvm_target: jvm_target.clone(),
                target_compatibility: target_compatibility.clone(),
            });
        }
    }
}

/// `1.8` and `8` name the same level.
fn java_level(value: &str) -> &str {
    value.strip_prefix("1.").unwrap_or(value)
}

fn check_desugaring(descriptor: &BuildDescriptor, out: &mut Vec<ConstraintViolation>) {
    let enabled = descriptor.compile_option(CORE_LIBRARY_DESUGARING)
        || descriptor.build_variants.values().any(|v| {
            v.compile_options
                .get(CORE_LIBRARY_DESUGARING)
                .copied()
                .unwrap_or(false)
        });
    let has_library = descriptor
        .dependencies
        .iter()
        .any(|d| d.scope() == DependencyScope::CoreLibraryDesugaring);

    match (enabled, has_library) {
        (true, false) => out.push(ConstraintViolation::DesugaringMismatch {
            message: format!(
                "`{CORE_LIBRARY_DESUGARING}` is enabled but no dependency is scoped `{CORE_LIBRARY_DESUGARING}`"
            ),
        }),
        (false, true) => out.push(ConstraintViolation::DesugaringMismatch {
            message: format!(
                "a dependency is scoped `{CORE_LIBRARY_DESUGARING}` but the compile option is not enabled"
            ),
        }),
        _ => {}
    }
}
