use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named signing identity from `[[signing]]`.
///
/// Only references to key material are recorded; the credentials themselves
/// are resolved by whoever executes the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningConfig {
    pub name: String,
    #[serde(default)]
    pub keystore: Option<String>,
    #[serde(default, rename = "key-alias")]
    pub key_alias: Option<String>,
}

/// Shared defaults from `[defaults]` that every variant overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfig {
    /// Signing identity inherited by variants that name none themselves.
    #[serde(default, rename = "signing-fallback")]
    pub signing_fallback: Option<String>,

    #[serde(default)]
    pub debuggable: bool,

    #[serde(default, rename = "minify-enabled")]
    pub minify_enabled: bool,

    #[serde(default, rename = "shrink-resources")]
    pub shrink_resources: bool,
}

/// Per-variant overrides from a `[[variant]]` entry.
///
/// Every field is optional; an unset field inherits from [`DefaultConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOverride {
    pub signing: Option<String>,
    pub debuggable: Option<bool>,
    pub minify_enabled: Option<bool>,
    pub shrink_resources: Option<bool>,
    pub application_id_suffix: Option<String>,
    pub version_name_suffix: Option<String>,
    pub compile_options: BTreeMap<String, bool>,
}
