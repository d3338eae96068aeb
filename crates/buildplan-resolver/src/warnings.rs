//! Non-fatal findings raised while building a plan.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::version;

/// How an explicit version relates to the pin it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Drift {
    Upgrade,
    Downgrade,
    Same,
    /// One of the versions is not comparable.
    Unknown,
}

impl Drift {
    pub fn between(declared: &str, pinned: &str) -> Self {
        match version::compare(declared, pinned) {
            Some(Ordering::Greater) => Self::Upgrade,
            Some(Ordering::Less) => Self::Downgrade,
            Some(Ordering::Equal) => Self::Same,
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
            Self::Same => "same version",
            Self::Unknown => "incomparable",
        })
    }
}

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlanWarning {
    /// An explicit version bypassed the platform pin for its group.
    VersionOverride {
        coordinate: String,
        declared: String,
        pinned: String,
        bom: String,
        drift: Drift,
    },
    /// A coordinate was declared again; the later declaration was kept.
    DuplicateDependency {
        coordinate: String,
        dropped: String,
        kept: String,
    },
    /// A second platform for the same group replaced the first.
    BomReplaced {
        group: String,
        previous: String,
        replacement: String,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VersionOverride {
                coordinate,
                declared,
                pinned,
                bom,
                drift,
            } => write!(
                f,
                "{coordinate}: explicit {declared} overrides {pinned} pinned by {bom} ({drift})"
            ),
            Self::DuplicateDependency {
                coordinate,
                dropped,
                kept,
            } => write!(
                f,
                "{coordinate}: declared more than once, keeping {kept} over {dropped}"
            ),
            Self::BomReplaced {
                group,
                previous,
                replacement,
            } => write!(
                f,
                "{group}: platform {replacement} replaces earlier {previous}"
            ),
        }
    }
}

/// All warnings collected for one plan, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WarningReport {
    pub warnings: Vec<PlanWarning>,
}

impl WarningReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = PlanWarning>) {
        self.warnings.extend(warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanWarning> {
        self.warnings.iter()
    }
}

impl fmt::Display for WarningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return write!(f, "No warnings.");
        }
        writeln!(f, "Warnings ({}):", self.warnings.len())?;
        for w in &self.warnings {
            writeln!(f, "  {w}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report() {
        let report = WarningReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert_eq!(report.to_string(), "No warnings.");
    }

    #[test]
    fn report_lists_each_warning() {
        let mut report = WarningReport::new();
        report.extend([PlanWarning::DuplicateDependency {
            coordinate: "com.android.support:multidex".to_string(),
            dropped: "1.0.2".to_string(),
            kept: "1.0.3".to_string(),
        }]);
        assert_eq!(report.len(), 1);
        let s = report.to_string();
        assert!(s.starts_with("Warnings (1):"));
        assert!(s.contains("keeping 1.0.3 over 1.0.2"));
    }

    #[test]
    fn drift_direction() {
        assert_eq!(Drift::between("33.0.0", "32.7.0"), Drift::Upgrade);
        assert_eq!(Drift::between("21.5.0", "32.7.0"), Drift::Downgrade);
        assert_eq!(Drift::between("32.7", "32.7.0"), Drift::Same);
        assert_eq!(Drift::between("latest", "32.7.0"), Drift::Unknown);
    }

    #[test]
    fn version_override_display() {
        let w = PlanWarning::VersionOverride {
            coordinate: "com.google.firebase:firebase-auth".to_string(),
            declared: "22.3.1".to_string(),
            pinned: "32.7.0".to_string(),
            bom: "com.google.firebase:firebase-bom".to_string(),
            drift: Drift::Downgrade,
        };
        assert_eq!(
            w.to_string(),
            "com.google.firebase:firebase-auth: explicit 22.3.1 overrides 32.7.0 pinned by com.google.firebase:firebase-bom (downgrade)"
        );
    }
}
