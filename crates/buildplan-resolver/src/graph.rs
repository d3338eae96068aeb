//! Flat dependency resolution with per-group platform (BOM) pins.
//!
//! Declarations are consumed in order. A platform declaration opens the pin
//! scope for its group, or replaces the pin already open for it; pins only
//! govern declarations that come after them. Several groups may be pinned at
//! once.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use buildplan_core::dependency::{Coordinate, DependencyDeclaration, DependencyScope};
use buildplan_util::errors::{PlanError, PlanResult};

use crate::warnings::{Drift, PlanWarning};

/// How a resolved entry got its version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VersionSource {
    /// Written on the declaration itself.
    Explicit,
    /// Supplied by the platform declared for the entry's group.
    Pinned { bom: String },
    /// The entry is itself a platform.
    Platform,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => f.write_str("explicit"),
            Self::Pinned { bom } => write!(f, "pinned by {bom}"),
            Self::Platform => f.write_str("platform"),
        }
    }
}

/// One entry of the resolved set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDependency {
    pub coordinate: Coordinate,
    pub version: String,
    pub scope: DependencyScope,
    pub source: VersionSource,
}

impl fmt::Display for ResolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}] ({})",
            self.coordinate, self.version, self.scope, self.source
        )
    }
}

/// Ordered resolved dependencies, at most one entry per coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedDependencySet {
    entries: Vec<ResolvedDependency>,
}

impl ResolvedDependencySet {
    pub fn get(&self, coordinate: &Coordinate) -> Option<&ResolvedDependency> {
        self.entries.iter().find(|e| &e.coordinate == coordinate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the end, dropping any earlier entry for the same coordinate.
    fn insert_last(&mut self, entry: ResolvedDependency) -> Option<ResolvedDependency> {
        let previous = self
            .entries
            .iter()
            .position(|e| e.coordinate == entry.coordinate)
            .map(|i| self.entries.remove(i));
        self.entries.push(entry);
        previous
    }
}

/// An open pin for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pin {
    bom: Coordinate,
    version: String,
}

/// Where the builder is in the declaration sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// No platform seen yet.
    Scanning,
    /// At least one group is pinned; the pinned groups, sorted.
    PinActive(Vec<String>),
    /// The sequence was consumed and the set handed out by [`DependencyGraphBuilder::finish`].
    Resolved,
}

/// Consumes declarations one at a time and produces the resolved set.
///
/// After [`finish`](Self::finish) the builder sits in [`ScanState::Resolved`]
/// with no pins; the next [`push`](Self::push) starts a fresh scan.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    pins: BTreeMap<String, Pin>,
    resolved: ResolvedDependencySet,
    warnings: Vec<PlanWarning>,
    finished: bool,
}

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        if self.finished {
            ScanState::Resolved
        } else if self.pins.is_empty() {
            ScanState::Scanning
        } else {
            ScanState::PinActive(self.pins.keys().cloned().collect())
        }
    }

    /// Consume the next declaration.
    pub fn push(&mut self, declaration: &DependencyDeclaration) -> PlanResult<()> {
        self.finished = false;
        let entry = match declaration {
            DependencyDeclaration::Platform {
                coordinate,
                version,
                scope,
            } => {
                self.open_pin(coordinate, version);
                ResolvedDependency {
                    coordinate: coordinate.clone(),
                    version: version.clone(),
                    scope: *scope,
                    source: VersionSource::Platform,
                }
            }
            DependencyDeclaration::Library {
                coordinate,
                version: Some(version),
                scope,
            } => {
                if let Some(pin) = self.pins.get(&coordinate.group) {
                    let warning = PlanWarning::VersionOverride {
                        coordinate: coordinate.to_string(),
                        declared: version.clone(),
                        pinned: pin.version.clone(),
                        bom: pin.bom.to_string(),
                        drift: Drift::between(version, &pin.version),
                    };
                    self.warnings.push(warning);
                }
                ResolvedDependency {
                    coordinate: coordinate.clone(),
                    version: version.clone(),
                    scope: *scope,
                    source: VersionSource::Explicit,
                }
            }
            DependencyDeclaration::Library {
                coordinate,
                version: None,
                scope,
            } => {
                let pin = self.pins.get(&coordinate.group).ok_or_else(|| {
                    PlanError::UnpinnedVersion {
                        coordinate: coordinate.to_string(),
                        group: coordinate.group.clone(),
                    }
                })?;
                ResolvedDependency {
                    coordinate: coordinate.clone(),
                    version: pin.version.clone(),
                    scope: *scope,
                    source: VersionSource::Pinned {
                        bom: pin.bom.to_string(),
                    },
                }
            }
        };

        tracing::debug!("Resolved {entry}");
        if let Some(previous) = self.resolved.insert_last(entry) {
            let kept = self
                .resolved
                .get(&previous.coordinate)
                .map(|e| e.version.clone())
                .unwrap_or_default();
            self.warnings.push(PlanWarning::DuplicateDependency {
                coordinate: previous.coordinate.to_string(),
                dropped: previous.version,
                kept,
            });
        }
        Ok(())
    }

    fn open_pin(&mut self, bom: &Coordinate, version: &str) {
        let pin = Pin {
            bom: bom.clone(),
            version: version.to_string(),
        };
        if let Some(previous) = self.pins.insert(bom.group.clone(), pin) {
            self.warnings.push(PlanWarning::BomReplaced {
                group: bom.group.clone(),
                previous: format!("{}:{}", previous.bom, previous.version),
                replacement: format!("{bom}:{version}"),
            });
        }
    }

    /// Finish the scan and hand back the resolved set and its warnings.
    pub fn finish(&mut self) -> (ResolvedDependencySet, Vec<PlanWarning>) {
        self.finished = true;
        self.pins.clear();
        (
            std::mem::take(&mut self.resolved),
            std::mem::take(&mut self.warnings),
        )
    }
}

/// Resolve a full declaration sequence. Stops at the first unpinned library.
pub fn resolve(
    declarations: &[DependencyDeclaration],
) -> PlanResult<(ResolvedDependencySet, Vec<PlanWarning>)> {
    let mut builder = DependencyGraphBuilder::new();
    for declaration in declarations {
        builder.push(declaration)?;
    }
    Ok(builder.finish())
}
