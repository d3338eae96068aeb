use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for the build-plan resolution pipeline.
///
/// Every variant is terminal: no partial plan is produced once one of these
/// is returned.
#[derive(Debug, Error, Diagnostic)]
pub enum PlanError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required fields are missing or a field has the wrong shape.
    #[error("Malformed manifest: {message}")]
    #[diagnostic(
        code(buildplan::malformed_manifest),
        help("Check buildplan.toml for missing or mistyped fields")
    )]
    MalformedManifest { message: String },

    /// A name that must be unique was declared more than once.
    #[error("Duplicate {context} `{key}`")]
    #[diagnostic(code(buildplan::duplicate_key))]
    DuplicateKey { context: String, key: String },

    /// The descriptor broke one or more version, toolchain or plugin rules.
    #[error("Manifest failed validation with {} violation(s)", .violations.len())]
    #[diagnostic(code(buildplan::validation))]
    Validation {
        #[related]
        violations: Vec<ConstraintViolation>,
    },

    /// The requested variant is not declared.
    #[error("Unknown variant `{name}`")]
    #[diagnostic(
        code(buildplan::unknown_variant),
        help("Declared variants: {available}")
    )]
    UnknownVariant { name: String, available: String },

    /// A variant's signing identity could not be resolved.
    #[error("Variant `{variant}` has no resolvable signing config: {reason}")]
    #[diagnostic(
        code(buildplan::unresolved_signing_config),
        help("Declare the identity under [[signing]] or set defaults.signing-fallback")
    )]
    UnresolvedSigningConfig { variant: String, reason: String },

    /// A library without a version has no governing platform pin.
    #[error("`{coordinate}` has no version and no active platform pin for group `{group}`")]
    #[diagnostic(
        code(buildplan::unpinned_version),
        help("Declare a platform (BOM) for `{group}` before it, or give it an explicit version")
    )]
    UnpinnedVersion { coordinate: String, group: String },

    /// The planner configuration could not be read or parsed.
    #[error("Config error: {message}")]
    Config { message: String },

    /// A resolved plan could not be rendered for output.
    #[error("Failed to render plan: {message}")]
    Render { message: String },

    /// Warnings were raised and the caller's policy rejects them.
    #[error("{count} warning(s) denied by policy")]
    #[diagnostic(
        code(buildplan::warnings_denied),
        help("Fix the reported warnings or drop --deny-warnings")
    )]
    WarningsDenied { count: usize },
}

/// A single rule broken by a descriptor, reported by the constraint stage.
///
/// The constraint stage never stops at the first violation, so these are
/// always delivered as a list inside [`PlanError::Validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConstraintViolation {
    #[error("{lower_field} ({lower}) must not exceed {upper_field} ({upper})")]
    #[diagnostic(code(buildplan::target_order))]
    TargetOrder {
        lower_field: &'static str,
        lower: String,
        upper_field: &'static str,
        upper: String,
    },

    #[error("{field} `{value}` is not a version identifier")]
    #[diagnostic(code(buildplan::invalid_target))]
    InvalidTarget { field: &'static str, value: String },

    #[error("toolchain version `{value}` is not a MAJOR.MINOR.PATCH triple")]
    #[diagnostic(code(buildplan::toolchain_pattern))]
    ToolchainPattern { value: String },

    #[error("unknown plugin `{id}`")]
    #[diagnostic(
        code(buildplan::unknown_plugin),
        help("Register it under [plugins] in the planner config")
    )]
    UnknownPlugin { id: String },

    #[error("plugin `{id}` is applied more than once")]
    #[diagnostic(code(buildplan::duplicate_plugin))]
    DuplicatePlugin { id: String },

    #[error("{class} plugin `{plugin}` is applied after framework plugin `{framework}`")]
    #[diagnostic(
        code(buildplan::plugin_order),
        help("Framework and packaging plugins must come after platform and language plugins")
    )]
    PluginOrderViolation {
        plugin: String,
        class: String,
        framework: String,
    },

    #[error("jvm-target `{jvm_target}` differs from target-compatibility `{target_compatibility}`")]
    #[diagnostic(code(buildplan::jvm_target_mismatch))]
    JvmTargetMismatch {
        jvm_target: String,
        target_compatibility: String,
    },

    #[error("{field} `{value}` is not a known Java level")]
    #[diagnostic(code(buildplan::unknown_java_level))]
    UnknownJavaLevel { field: &'static str, value: String },

    #[error("{message}")]
    #[diagnostic(code(buildplan::desugaring_mismatch))]
    DesugaringMismatch { message: String },
}

/// Convenience alias for results of the resolution pipeline.
pub type PlanResult<T> = Result<T, PlanError>;
