//! Terraform release version value type
//!
//! Handles version strings of the form `MAJOR.MINOR.PATCH` with an optional
//! `-PRERELEASE` suffix (e.g. `0.11.7`, `0.11.9-beta1`). Ordering follows
//! semantic versioning: numeric precedence first, pre-release tags sort
//! below their corresponding release.

use crate::error::VersionError;
use regex::Regex;
use semver::Version;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// Accepted version grammar: #.#.# or #.#.#-@# where # is numbers and @ is
// word characters.
static VERSION_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+(-\w+)?$").unwrap());

/// Pure predicate for the accepted version grammar.
///
/// This gate runs before any install or network action that depends on a
/// literal version; it touches neither the network nor the file system.
pub fn is_valid_version_format(version: &str) -> bool {
    VERSION_FORMAT_RE.is_match(version)
}

/// A validated terraform release version
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    /// The version string as published in the release index
    raw: String,
    /// Parsed representation used for ordering
    parsed: Version,
}

impl ReleaseVersion {
    /// Parses a version string, enforcing the accepted grammar.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if !is_valid_version_format(raw) {
            return Err(VersionError::invalid_format(raw));
        }

        // Strict semver parse on top of the grammar check: strings the
        // grammar admits but semver cannot order (leading zeros, odd
        // pre-release tags) get the same format error.
        let parsed = Version::parse(raw)
            .map_err(|_| VersionError::invalid_format(raw))?;

        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The version string as published.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if this version carries a pre-release tag.
    pub fn is_prerelease(&self) -> bool {
        !self.parsed.pre.is_empty()
    }

    /// The parsed semver representation.
    pub fn semver(&self) -> &Version {
        &self.parsed
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for ReleaseVersion {}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
