use std::fmt;

use serde::{Deserialize, Serialize};

/// A `group:artifact` pair identifying a library independent of its version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
}

impl Coordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parse `"group:artifact"` or `"group:artifact:version"`.
    ///
    /// Returns the coordinate and the version segment, if any. Empty segments
    /// and any other number of segments are rejected.
    pub fn parse(s: &str) -> Option<(Self, Option<String>)> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [group, artifact] => Some((Self::new(*group, *artifact), None)),
            [group, artifact, version] => {
                Some((Self::new(*group, *artifact), Some((*version).to_string())))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// Which classpath a dependency is declared for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    #[default]
    Implementation,
    Api,
    CompileOnly,
    RuntimeOnly,
    /// Compile-time only library consumed by core library desugaring.
    CoreLibraryDesugaring,
    TestImplementation,
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Implementation => "implementation",
            Self::Api => "api",
            Self::CompileOnly => "compile-only",
            Self::RuntimeOnly => "runtime-only",
            Self::CoreLibraryDesugaring => "core-library-desugaring",
            Self::TestImplementation => "test-implementation",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered `[[dependency]]` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyDeclaration {
    /// A platform (BOM) pinning every later unversioned library of its group.
    Platform {
        coordinate: Coordinate,
        version: String,
        scope: DependencyScope,
    },
    /// A library, optionally versioned.
    Library {
        coordinate: Coordinate,
        version: Option<String>,
        scope: DependencyScope,
    },
}

impl DependencyDeclaration {
    pub fn coordinate(&self) -> &Coordinate {
        match self {
            Self::Platform { coordinate, .. } | Self::Library { coordinate, .. } => coordinate,
        }
    }

    pub fn scope(&self) -> DependencyScope {
        match self {
            Self::Platform { scope, .. } | Self::Library { scope, .. } => *scope,
        }
    }

    /// The explicitly declared version, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Platform { version, .. } => Some(version),
            Self::Library { version, .. } => version.as_deref(),
        }
    }

    pub fn is_platform(&self) -> bool {
        matches!(self, Self::Platform { .. })
    }
}
