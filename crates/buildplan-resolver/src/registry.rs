//! Plugin registry: which plugin ids are known and what class each belongs to.

use std::collections::BTreeMap;

use buildplan_core::plugin::PluginClass;

/// Lookup of plugin ids to their capability class.
pub trait PluginRegistry {
    /// Class of a plugin, or `None` if the id is not known.
    fn classify(&self, id: &str) -> Option<PluginClass>;
}

const BUILTIN: &[(&str, PluginClass)] = &[
    ("com.android.application", PluginClass::Platform),
    ("com.android.library", PluginClass::Platform),
    ("com.android.dynamic-feature", PluginClass::Platform),
    ("com.android.test", PluginClass::Platform),
    ("kotlin-android", PluginClass::Language),
    ("org.jetbrains.kotlin.android", PluginClass::Language),
    ("kotlin-kapt", PluginClass::Language),
    ("org.jetbrains.kotlin.kapt", PluginClass::Language),
    ("kotlin-parcelize", PluginClass::Language),
    ("org.jetbrains.kotlin.plugin.parcelize", PluginClass::Language),
    ("com.google.devtools.ksp", PluginClass::Language),
    ("dev.flutter.flutter-gradle-plugin", PluginClass::Framework),
    ("com.facebook.react", PluginClass::Framework),
    ("com.google.gms.google-services", PluginClass::Support),
    ("com.google.firebase.crashlytics", PluginClass::Support),
    ("com.google.firebase.firebase-perf", PluginClass::Support),
];

/// A closed registry backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    entries: BTreeMap<String, PluginClass>,
}

impl StaticRegistry {
    /// An empty registry that knows no plugins.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in Android, Kotlin, Flutter and Google services plugins.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(id, class)| ((*id).to_string(), *class))
                .collect(),
        }
    }

    /// Add or reclassify entries, e.g. from the planner config.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PluginClass)>,
        S: Into<String>,
    {
        for (id, class) in entries {
            self.entries.insert(id.into(), class);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PluginRegistry for StaticRegistry {
    fn classify(&self, id: &str) -> Option<PluginClass> {
        self.entries.get(id).copied()
    }
}
