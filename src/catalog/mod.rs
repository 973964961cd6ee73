//! Release catalog fetched from the HashiCorp releases index
//!
//! This module provides:
//! - Catalog: a de-duplicated, ordered list of published versions
//! - ReleaseIndex: the fetch seam, so resolution logic can be tested
//!   against a canned catalog without network access
//! - HttpReleaseIndex: the production implementation over HttpClient

mod client;

pub use client::HttpClient;

use crate::domain::ReleaseVersion;
use crate::error::FetchError;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// HashiCorp terraform releases index
pub const DEFAULT_RELEASES_URL: &str = "https://releases.hashicorp.com/terraform/";

// Version identifiers as they appear in the index page hrefs,
// e.g. href="/terraform/0.12.3/" or href="/terraform/0.12.0-beta1/"
static INDEX_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"/terraform/(\d+\.\d+\.\d+(?:-\w+)?)/?""#).unwrap());

/// A de-duplicated, ordered list of published terraform versions
#[derive(Debug, Clone)]
pub struct Catalog {
    versions: Vec<ReleaseVersion>,
    include_prerelease: bool,
}

impl Catalog {
    /// Builds a catalog, collapsing duplicates order-stably on first
    /// occurrence.
    pub fn from_versions(versions: Vec<ReleaseVersion>, include_prerelease: bool) -> Self {
        Self {
            versions: dedup_versions(versions),
            include_prerelease,
        }
    }

    /// Whether pre-release entries were kept at fetch time.
    pub fn includes_prerelease(&self) -> bool {
        self.include_prerelease
    }

    /// The catalog entries in fetch order (freshest first as published).
    pub fn versions(&self) -> &[ReleaseVersion] {
        &self.versions
    }

    /// Entries sorted descending by semantic-version order.
    pub fn sorted_desc(&self) -> Vec<ReleaseVersion> {
        let mut sorted = self.versions.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        sorted
    }

    /// Whether a literal version exists in the catalog.
    pub fn contains(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v.as_str() == version)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Catalog entries with the given versions pinned to the front,
    /// de-duplicated order-stably. Used to put recently installed versions
    /// at the top of the interactive menu.
    pub fn merged_with(&self, pinned: &[ReleaseVersion]) -> Vec<ReleaseVersion> {
        let mut merged = pinned.to_vec();
        merged.extend(self.versions.iter().cloned());
        dedup_versions(merged)
    }
}

/// Collapses duplicate versions, keeping the first occurrence of each.
fn dedup_versions(versions: Vec<ReleaseVersion>) -> Vec<ReleaseVersion> {
    let mut seen = HashSet::new();
    versions
        .into_iter()
        .filter(|v| seen.insert(v.as_str().to_string()))
        .collect()
}

/// Fetch seam for the release catalog
#[async_trait]
pub trait ReleaseIndex: Send + Sync {
    /// Fetches the catalog. With `include_prerelease` set, beta and rc
    /// entries are kept; otherwise only stable releases are returned.
    async fn fetch(&self, include_prerelease: bool) -> Result<Catalog, FetchError>;
}

/// Production release index over the HashiCorp releases page
pub struct HttpReleaseIndex {
    client: HttpClient,
    base_url: String,
}

impl HttpReleaseIndex {
    /// Creates an index reader against the default releases URL.
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_RELEASES_URL)
    }

    /// Creates an index reader against a custom URL (used by tests).
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReleaseIndex for HttpReleaseIndex {
    async fn fetch(&self, include_prerelease: bool) -> Result<Catalog, FetchError> {
        let body = self.client.get_text(&self.base_url).await?;
        let versions = parse_index(&body, include_prerelease, &self.base_url)?;
        Ok(Catalog::from_versions(versions, include_prerelease))
    }
}

/// Extracts version identifiers from the index page body.
///
/// A fetched page that yields no versions is an error, not an empty
/// catalog: the caller must be able to distinguish "index unreachable or
/// unparsable" from "catalog fetched but the requested version is absent."
fn parse_index(
    body: &str,
    include_prerelease: bool,
    url: &str,
) -> Result<Vec<ReleaseVersion>, FetchError> {
    let mut versions = Vec::new();

    for caps in INDEX_VERSION_RE.captures_iter(body) {
        let raw = &caps[1];
        if !include_prerelease && raw.contains('-') {
            continue;
        }
        if let Ok(version) = ReleaseVersion::parse(raw) {
            versions.push(version);
        }
    }

    if versions.is_empty() {
        return Err(FetchError::invalid_index(
            url,
            "no terraform versions found in index page",
        ));
    }

    Ok(versions)
}
