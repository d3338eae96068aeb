//! Variant composition: shared defaults overlaid with one variant's overrides.
//!
//! Every resolved field records whether it came from the variant itself or
//! was inherited, so a plan can be audited without re-reading the manifest.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use buildplan_core::descriptor::BuildDescriptor;
use buildplan_core::variant::VariantOverride;
use buildplan_util::errors::{PlanError, PlanResult};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Set by the variant itself.
    Explicit,
    /// Taken from the descriptor's defaults.
    Inherited,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Inherited => "inherited",
        })
    }
}

/// A value together with its [`Provenance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Resolved<T> {
    pub fn explicit(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Explicit,
        }
    }

    pub fn inherited(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Inherited,
        }
    }

    /// The override if present, otherwise the inherited default.
    fn overlay(explicit: Option<T>, default: T) -> Self {
        match explicit {
            Some(value) => Self::explicit(value),
            None => Self::inherited(default),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Resolved<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.provenance)
    }
}

/// A variant fully resolved against the descriptor's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub variant: String,
    pub application_id: String,
    pub version_name: Option<String>,
    /// Name of the selected signing identity.
    pub signing: Resolved<String>,
    pub debuggable: Resolved<bool>,
    pub minify_enabled: Resolved<bool>,
    pub shrink_resources: Resolved<bool>,
    pub compile_options: BTreeMap<String, Resolved<bool>>,
}

impl EffectiveConfig {
    /// Compile options reduced to their values.
    pub fn compile_option_values(&self) -> BTreeMap<String, bool> {
        self.compile_options
            .iter()
            .map(|(name, option)| (name.clone(), option.value))
            .collect()
    }
}

/// Resolve `variant` against the descriptor's defaults.
pub fn compose(descriptor: &BuildDescriptor, variant: &str) -> PlanResult<EffectiveConfig> {
    let overrides = descriptor
        .build_variants
        .get(variant)
        .ok_or_else(|| PlanError::UnknownVariant {
            name: variant.to_string(),
            available: available(descriptor),
        })?;

    let signing = select_signing(descriptor, variant, overrides)?;
    tracing::debug!("Variant {variant} signs with {signing}");

    let defaults = &descriptor.defaults;
    let mut compile_options: BTreeMap<String, Resolved<bool>> = descriptor
        .compile_options
        .iter()
        .map(|(name, enabled)| (name.clone(), Resolved::inherited(*enabled)))
        .collect();
    for (name, enabled) in &overrides.compile_options {
        compile_options.insert(name.clone(), Resolved::explicit(*enabled));
    }

    let suffix = overrides.application_id_suffix.as_deref().unwrap_or("");
    let version_name = descriptor.version_name.as_ref().map(|base| {
        format!(
            "{base}{}",
            overrides.version_name_suffix.as_deref().unwrap_or("")
        )
    });

    Ok(EffectiveConfig {
        variant: variant.to_string(),
        application_id: format!("{}{suffix}", descriptor.application_id),
        version_name,
        signing,
        debuggable: Resolved::overlay(overrides.debuggable, defaults.debuggable),
        minify_enabled: Resolved::overlay(overrides.minify_enabled, defaults.minify_enabled),
        shrink_resources: Resolved::overlay(
            overrides.shrink_resources,
            defaults.shrink_resources,
        ),
        compile_options,
    })
}

/// Pick the signing identity: the variant's own reference, else the
/// designated fallback. The chosen name must be a declared signing config.
fn select_signing(
    descriptor: &BuildDescriptor,
    variant: &str,
    overrides: &VariantOverride,
) -> PlanResult<Resolved<String>> {
    let selected = match (&overrides.signing, &descriptor.defaults.signing_fallback) {
        (Some(name), _) => Resolved::explicit(name.clone()),
        (None, Some(fallback)) => Resolved::inherited(fallback.clone()),
        (None, None) => {
            return Err(PlanError::UnresolvedSigningConfig {
                variant: variant.to_string(),
                reason: "no signing config set and no signing-fallback designated".to_string(),
            })
        }
    };

    if !descriptor.signing_configs.contains_key(&selected.value) {
        return Err(PlanError::UnresolvedSigningConfig {
            variant: variant.to_string(),
            reason: format!(
                "{} signing config `{}` is not declared",
                selected.provenance, selected.value
            ),
        });
    }
    Ok(selected)
}

fn available(descriptor: &BuildDescriptor) -> String {
    if descriptor.build_variants.is_empty() {
        "(none)".to_string()
    } else {
        descriptor.variant_names().join(", ")
    }
}
