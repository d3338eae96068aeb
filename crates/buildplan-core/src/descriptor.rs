use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use buildplan_util::errors::{PlanError, PlanResult};

use crate::dependency::{Coordinate, DependencyDeclaration, DependencyScope};
use crate::variant::{DefaultConfig, SigningConfig, VariantOverride};

/// The manifest tree as handed over by a deserializer, before any checks.
///
/// Any serde format can produce this; [`BuildDescriptor::from_str`] is the
/// TOML convenience path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawManifest {
    #[serde(default)]
    pub application: Option<RawApplication>,

    #[serde(default)]
    pub sdk: Option<RawSdk>,

    #[serde(default)]
    pub toolchain: ToolchainSpec,

    #[serde(default)]
    pub plugins: Vec<String>,

    #[serde(default, rename = "compile-options")]
    pub compile_options: BTreeMap<String, bool>,

    #[serde(default)]
    pub defaults: DefaultConfig,

    #[serde(default)]
    pub signing: Vec<SigningConfig>,

    #[serde(default)]
    pub variant: Vec<RawVariant>,

    #[serde(default)]
    pub dependency: Vec<RawDependency>,

    #[serde(default)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// Application identity from `[application]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawApplication {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default, rename = "version-code")]
    pub version_code: Option<u32>,
    #[serde(default, rename = "version-name")]
    pub version_name: Option<String>,
}

/// SDK levels from `[sdk]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSdk {
    #[serde(default)]
    pub compile: Option<RawVersion>,
    #[serde(default)]
    pub min: Option<RawVersion>,
    #[serde(default)]
    pub target: Option<RawVersion>,
}

/// A version written either as a bare number (`35`) or a string (`"35"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawVersion {
    Number(u64),
    Text(String),
}

impl RawVersion {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Toolchain versions from `[toolchain]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolchainSpec {
    /// Native toolchain version, e.g. the NDK `27.0.12077973`.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "source-compatibility")]
    pub source_compatibility: Option<String>,
    #[serde(default, rename = "target-compatibility")]
    pub target_compatibility: Option<String>,
    #[serde(default, rename = "jvm-target")]
    pub jvm_target: Option<String>,
}

/// A `[[variant]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawVariant {
    pub name: String,
    #[serde(default)]
    pub signing: Option<String>,
    #[serde(default)]
    pub debuggable: Option<bool>,
    #[serde(default, rename = "minify-enabled")]
    pub minify_enabled: Option<bool>,
    #[serde(default, rename = "shrink-resources")]
    pub shrink_resources: Option<bool>,
    #[serde(default, rename = "application-id-suffix")]
    pub application_id_suffix: Option<String>,
    #[serde(default, rename = "version-name-suffix")]
    pub version_name_suffix: Option<String>,
    #[serde(default, rename = "compile-options")]
    pub compile_options: BTreeMap<String, bool>,
}

/// A `[[dependency]]` entry: exactly one of `platform` or `library`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDependency {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub library: Option<String>,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
}

/// A loaded build descriptor. Produced once by the loader and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescriptor {
    pub application_id: String,
    pub namespace: String,
    pub version_code: Option<u32>,
    pub version_name: Option<String>,
    pub compile_target: String,
    pub min_target: String,
    pub target_target: String,
    pub toolchain: ToolchainSpec,
    /// Plugin ids in application order.
    pub plugins: Vec<String>,
    pub compile_options: BTreeMap<String, bool>,
    pub defaults: DefaultConfig,
    pub signing_configs: BTreeMap<String, SigningConfig>,
    pub build_variants: BTreeMap<String, VariantOverride>,
    /// Declarations in source order; order drives pin scoping.
    pub dependencies: Vec<DependencyDeclaration>,
    /// Opaque tables handed through to framework plugins.
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl BuildDescriptor {
    /// Load and check a manifest file.
    pub fn from_path(path: &Path) -> PlanResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::MalformedManifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse TOML text and check it.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> PlanResult<Self> {
        let raw: RawManifest = toml::from_str(content).map_err(|e| parse_error(&e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Check an already-deserialized tree and build the descriptor from it.
    pub fn from_raw(raw: RawManifest) -> PlanResult<Self> {
        let application = raw.application.unwrap_or_default();
        let application_id = application
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("application.id"))?;

        let sdk = raw.sdk.unwrap_or_default();
        let compile_target = sdk
            .compile
            .map(RawVersion::into_string)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("sdk.compile"))?;
        let min_target = sdk
            .min
            .map(RawVersion::into_string)
            .unwrap_or_else(|| compile_target.clone());
        let target_target = sdk
            .target
            .map(RawVersion::into_string)
            .unwrap_or_else(|| compile_target.clone());

        let mut signing_configs = BTreeMap::new();
        for config in raw.signing {
            if signing_configs.contains_key(&config.name) {
                return Err(duplicate("signing config", &config.name));
            }
            signing_configs.insert(config.name.clone(), config);
        }

        let mut build_variants = BTreeMap::new();
        for variant in raw.variant {
            if build_variants.contains_key(&variant.name) {
                return Err(duplicate("variant", &variant.name));
            }
            build_variants.insert(
                variant.name,
                VariantOverride {
                    signing: variant.signing,
                    debuggable: variant.debuggable,
                    minify_enabled: variant.minify_enabled,
                    shrink_resources: variant.shrink_resources,
                    application_id_suffix: variant.application_id_suffix,
                    version_name_suffix: variant.version_name_suffix,
                    compile_options: variant.compile_options,
                },
            );
        }

        let dependencies = load_dependencies(raw.dependency)?;

        tracing::debug!(
            "Loaded descriptor for {application_id}: {} variant(s), {} dependency declaration(s)",
            build_variants.len(),
            dependencies.len()
        );

        Ok(Self {
            namespace: application
                .namespace
                .unwrap_or_else(|| application_id.clone()),
            application_id,
            version_code: application.version_code,
            version_name: application.version_name,
            compile_target,
            min_target,
            target_target,
            toolchain: raw.toolchain,
            plugins: raw.plugins,
            compile_options: raw.compile_options,
            defaults: raw.defaults,
            signing_configs,
            build_variants,
            dependencies,
            extensions: raw.extensions,
        })
    }

    /// Declared variant names, sorted.
    pub fn variant_names(&self) -> Vec<&str> {
        self.build_variants.keys().map(String::as_str).collect()
    }

    /// Whether a compile option is set and enabled.
    pub fn compile_option(&self, name: &str) -> bool {
        self.compile_options.get(name).copied().unwrap_or(false)
    }
}

fn load_dependencies(raw: Vec<RawDependency>) -> PlanResult<Vec<DependencyDeclaration>> {
    let mut declarations = Vec::with_capacity(raw.len());
    let mut unversioned: HashSet<Coordinate> = HashSet::new();

    for (index, entry) in raw.into_iter().enumerate() {
        let scope = entry.scope.unwrap_or_default();
        let declaration = match (entry.platform, entry.library) {
            (Some(spec), None) => {
                let (coordinate, version) = parse_coordinate(index, &spec)?;
                let version = version.ok_or_else(|| PlanError::MalformedManifest {
                    message: format!("dependency #{index}: platform `{spec}` must carry a version"),
                })?;
                DependencyDeclaration::Platform {
                    coordinate,
                    version,
                    scope,
                }
            }
            (None, Some(spec)) => {
                let (coordinate, version) = parse_coordinate(index, &spec)?;
                if version.is_none() && !unversioned.insert(coordinate.clone()) {
                    return Err(duplicate("unversioned dependency", &coordinate.to_string()));
                }
                DependencyDeclaration::Library {
                    coordinate,
                    version,
                    scope,
                }
            }
            (Some(_), Some(_)) => {
                return Err(PlanError::MalformedManifest {
                    message: format!("dependency #{index}: set either `platform` or `library`, not both"),
                })
            }
            (None, None) => {
                return Err(PlanError::MalformedManifest {
                    message: format!("dependency #{index}: expected `platform` or `library`"),
                })
            }
        };
        declarations.push(declaration);
    }

    Ok(declarations)
}

fn parse_coordinate(index: usize, spec: &str) -> PlanResult<(Coordinate, Option<String>)> {
    Coordinate::parse(spec).ok_or_else(|| PlanError::MalformedManifest {
        message: format!("dependency #{index}: `{spec}` is not `group:artifact[:version]`"),
    })
}

fn missing(field: &str) -> PlanError {
    PlanError::MalformedManifest {
        message: format!("missing required field `{field}`"),
    }
}

fn duplicate(context: &str, key: &str) -> PlanError {
    PlanError::DuplicateKey {
        context: context.to_string(),
        key: key.to_string(),
    }
}

/// Map a TOML parse failure onto the error taxonomy.
///
/// A repeated table or key is reported as [`PlanError::DuplicateKey`] rather
/// than silently keeping one of the occurrences.
fn parse_error(message: &str) -> PlanError {
    if let Some(key) = duplicate_key_name(message) {
        return duplicate("manifest key", &key);
    }
    PlanError::MalformedManifest {
        message: format!("Failed to parse manifest: {message}"),
    }
}

fn duplicate_key_name(message: &str) -> Option<String> {
    let rest = message.split("duplicate key `").nth(1)?;
    rest.split('`').next().map(str::to_string)
}
