//! Version identifiers and their ordering.
//!
//! SDK levels and library versions compare segment by segment:
//! - Segments are split on `.` and `-`
//! - Numeric segments compare as numbers, so `35` sorts after `9`
//! - Well-known qualifiers have a fixed ordering:
//!   `alpha` < `beta` < `milestone` < `rc` < `snapshot` < release < `sp`
//! - Any other text sorts below a number in the same position
//! - Missing trailing segments count as zero, so `1.0` equals `1.0.0`

use std::cmp::Ordering;
use std::fmt;

/// A parsed version identifier with comparable segments.
#[derive(Debug, Clone)]
pub struct VersionId {
    original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(Qualifier),
    Text(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl VersionId {
    /// Parse a version identifier.
    ///
    /// Returns `None` for blank input, embedded whitespace, or a first
    /// segment that is not a number.
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        if version.is_empty() || version.contains(char::is_whitespace) {
            return None;
        }
        let segments: Vec<Segment> = version
            .split(['.', '-'])
            .filter(|token| !token.is_empty())
            .map(Segment::classify)
            .collect();
        match segments.first() {
            Some(Segment::Numeric(_)) => Some(Self {
                original: version.to_string(),
                segments,
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl Segment {
    fn classify(token: &str) -> Self {
        if let Ok(n) = token.parse::<u64>() {
            return Self::Numeric(n);
        }
        match token.to_lowercase().as_str() {
            "alpha" | "a" => Self::Qualifier(Qualifier::Alpha),
            "beta" | "b" => Self::Qualifier(Qualifier::Beta),
            "milestone" | "m" => Self::Qualifier(Qualifier::Milestone),
            "rc" | "cr" => Self::Qualifier(Qualifier::Rc),
            "snapshot" => Self::Qualifier(Qualifier::Snapshot),
            "ga" | "final" | "release" => Self::Qualifier(Qualifier::Release),
            "sp" => Self::Qualifier(Qualifier::Sp),
            _ => Self::Text(token.to_string()),
        }
    }

    /// Order of this segment against a segment that is absent.
    fn cmp_absent(&self) -> Ordering {
        match self {
            Self::Numeric(n) => n.cmp(&0),
            Self::Qualifier(q) => q.cmp(&Qualifier::Release),
            Self::Text(_) => Ordering::Less,
        }
    }

    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::Qualifier(a), Self::Qualifier(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Numeric(_), _) => Ordering::Greater,
            (_, Self::Numeric(_)) => Ordering::Less,
            (Self::Qualifier(q), Self::Text(_)) => {
                if *q >= Qualifier::Release {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Self::Text(_), Self::Qualifier(q)) => {
                if *q >= Qualifier::Release {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl Ord for VersionId {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => a.cmp_present(b),
                (Some(a), None) => a.cmp_absent(),
                (None, Some(b)) => b.cmp_absent().reverse(),
                (None, None) => Ordering::Equal,
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for VersionId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionId {}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Compare two version strings, or `None` if either is not a version.
pub fn compare(a: &str, b: &str) -> Option<Ordering> {
    Some(VersionId::parse(a)?.cmp(&VersionId::parse(b)?))
}
