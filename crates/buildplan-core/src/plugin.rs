use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability class of a build plugin, used to check application order.
///
/// Platform and language plugins must be applied before any framework
/// plugin. Support plugins may appear anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginClass {
    /// Android application or library plugins.
    Platform,
    /// Language plugins such as Kotlin.
    Language,
    /// Packaging or framework plugins such as Flutter.
    Framework,
    /// Auxiliary plugins with no ordering constraint (e.g. Google services).
    Support,
}

impl PluginClass {
    /// Whether a plugin of this class must precede every framework plugin.
    pub fn precedes_framework(&self) -> bool {
        matches!(self, Self::Platform | Self::Language)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Language => "language",
            Self::Framework => "framework",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for PluginClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
