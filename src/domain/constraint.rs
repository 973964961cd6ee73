//! required_version constraint expressions
//!
//! Handles the range operators terraform blocks use:
//! - Exact: `=1.0.0` or bare `1.0.0`
//! - Comparison: `>1.0.0`, `>=1.0.0`, `<1.0.0`, `<=1.0.0`
//! - Pessimistic/compatible range: `~>1.0` (allows `<2.0.0`), `~>1.0.3`
//!   (allows `<1.1.0`)
//! - Comma combination as logical AND: `>=0.12.0, <0.14.0`

use crate::domain::ReleaseVersion;
use crate::error::ResolveError;
use regex::Regex;
use semver::{Prerelease, Version};
use std::fmt;
use std::sync::LazyLock;

static COMPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(>=|<=|~>|=|>|<)?\s*(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-(\w+))?\s*$").unwrap()
});

/// A single comparator within a constraint expression
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Exact,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    /// `~>`: everything from the written version up to a bump of the
    /// second-to-last written segment
    Pessimistic,
}

#[derive(Debug, Clone)]
struct Comparator {
    op: Op,
    major: u64,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Option<String>,
}

impl Comparator {
    fn parse(part: &str) -> Option<Self> {
        let caps = COMPARATOR_RE.captures(part)?;

        let op = match caps.get(1).map(|m| m.as_str()) {
            None | Some("=") => Op::Exact,
            Some(">") => Op::Greater,
            Some(">=") => Op::GreaterEq,
            Some("<") => Op::Less,
            Some("<=") => Op::LessEq,
            Some("~>") => Op::Pessimistic,
            Some(_) => return None,
        };

        let pre = match caps.get(5) {
            Some(m) => {
                // Reject tags semver cannot represent before any matching
                Prerelease::new(m.as_str()).ok()?;
                Some(m.as_str().to_string())
            }
            None => None,
        };

        Some(Self {
            op,
            major: caps.get(2)?.as_str().parse().ok()?,
            minor: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            patch: caps.get(4).and_then(|m| m.as_str().parse().ok()),
            pre,
        })
    }

    /// The written version with missing segments zero-filled.
    fn bound(&self) -> Version {
        let mut v = Version::new(
            self.major,
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        if let Some(ref pre) = self.pre {
            // Already validated in Comparator::parse
            v.pre = Prerelease::new(pre).unwrap_or(Prerelease::EMPTY);
        }
        v
    }

    /// Exclusive upper bound for the pessimistic operator: bump the last
    /// segment the expression actually wrote.
    fn pessimistic_upper(&self) -> Version {
        match (self.minor, self.patch) {
            (Some(minor), Some(_)) => Version::new(self.major, minor + 1, 0),
            _ => Version::new(self.major + 1, 0, 0),
        }
    }

    fn matches(&self, version: &Version) -> bool {
        let bound = self.bound();
        match self.op {
            Op::Exact => *version == bound,
            Op::Greater => *version > bound,
            Op::GreaterEq => *version >= bound,
            Op::Less => *version < bound,
            Op::LessEq => *version <= bound,
            Op::Pessimistic => *version >= bound && *version < self.pessimistic_upper(),
        }
    }
}

/// A parsed required_version range expression, immutable once parsed
#[derive(Debug, Clone)]
pub struct Constraint {
    raw: String,
    comparators: Vec<Comparator>,
}

impl Constraint {
    /// Parses a constraint expression. Comma-separated comparators combine
    /// as logical AND.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::malformed_constraint(raw, "empty expression"));
        }

        let comparators = trimmed
            .split(',')
            .map(|part| {
                Comparator::parse(part).ok_or_else(|| {
                    ResolveError::malformed_constraint(
                        raw,
                        format!("unrecognized comparator '{}'", part.trim()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: trimmed.to_string(),
            comparators,
        })
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether any comparator names a pre-release tag.
    fn has_prerelease(&self) -> bool {
        self.comparators.iter().any(|c| c.pre.is_some())
    }

    /// Checks a version against every comparator.
    ///
    /// Pre-release versions only satisfy a constraint that itself names a
    /// pre-release tag; release entries always sort above their own
    /// pre-releases, so the highest match prefers releases regardless.
    pub fn matches(&self, version: &ReleaseVersion) -> bool {
        if version.is_prerelease() && !self.has_prerelease() {
            return false;
        }
        self.comparators
            .iter()
            .all(|c| c.matches(version.semver()))
    }

    /// Finds the highest catalog entry satisfying this constraint.
    ///
    /// Candidates are scanned in descending semantic-version order and the
    /// first satisfying entry wins; scanning stops at the first match.
    pub fn highest_match(&self, versions: &[ReleaseVersion]) -> Option<ReleaseVersion> {
        let mut sorted: Vec<&ReleaseVersion> = versions.iter().collect();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted.into_iter().find(|v| self.matches(v)).cloned()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
