use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use buildplan_util::errors::{PlanError, PlanResult};

use crate::plugin::PluginClass;

/// Global planner configuration loaded from `~/.buildplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Extra plugin registry entries, keyed by plugin id.
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginClass>,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

/// How the caller treats non-fatal warnings, from `[policy]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default, rename = "deny-warnings")]
    pub deny_warnings: bool,
}

/// Manifest lookup settings from `[manifest]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_file", rename = "file-name")]
    pub file_name: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            file_name: default_manifest_file(),
        }
    }
}

fn default_manifest_file() -> String {
    crate::MANIFEST_FILE.to_string()
}

impl PlannerConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> PlanResult<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load a configuration file, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> PlanResult<Self> {
        if !path.is_file() {
            tracing::debug!("No planner config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        toml::from_str(&content).map_err(|e| PlanError::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the buildplan data directory: `$BUILDPLAN_HOME`, else `~/.buildplan/`.
pub fn dirs_path() -> PathBuf {
    if let Ok(dir) = std::env::var("BUILDPLAN_HOME") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".buildplan")
}
