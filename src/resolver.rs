//! Version resolution across configuration sources
//!
//! The precedence chain is an explicit ordered list of strategies, each of
//! which either produces a conclusive Resolution or defers to the next:
//!
//! 1. .tfswap.toml (a command-line version that exists in the catalog
//!    overrides the file's declared version; with neither, interactive
//!    selection - lower sources are bypassed either way)
//! 2. required_version constraint from *.tf files (no CLI version given)
//! 3. .tfswaprc pin (no CLI version given)
//! 4. .terraform-version pin (no CLI version given)
//! 5. CLI literal version, checked against the catalog
//! 6. Interactive selection (stable catalog, or all with --list-all)
//!
//! Every literal that reaches the installer has passed the format gate
//! here; a bad format is always fatal and distinct from "not found."

use crate::catalog::ReleaseIndex;
use crate::config::{ConfigSources, RC_FILENAME, TOML_FILENAME, VERSION_FILENAME};
use crate::domain::{Constraint, ReleaseVersion};
use crate::error::{AppError, ResolveError};
use async_trait::async_trait;
use colored::Colorize;

/// Outcome of the precedence chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Install this validated literal version
    Install(ReleaseVersion),
    /// No source was conclusive; let the user pick from the catalog
    Interactive { list_all: bool },
    /// A requested literal version does not exist in the catalog.
    /// Informational, not fatal: the caller reports it and installs
    /// nothing.
    Unavailable { version: String },
}

/// What to do when a CLI version is absent from the catalog while a
/// .tfswap.toml declares its own version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMissPolicy {
    /// Surface the miss as Resolution::Unavailable
    Report,
    /// Fall back to the version declared in the config file
    FallBack,
}

/// One configuration source in the precedence chain
#[async_trait]
trait Strategy: Send + Sync {
    /// Returns a conclusive resolution, or None to defer to the next
    /// source. Errors are fatal and stop the chain.
    async fn evaluate(
        &self,
        sources: &ConfigSources,
        index: &dyn ReleaseIndex,
    ) -> Result<Option<Resolution>, AppError>;
}

fn info(sources: &ConfigSources, message: &str) {
    if !sources.quiet {
        println!("{}", message);
    }
}

/// Precedence 1: the .tfswap.toml config file. Presence of the file is
/// conclusive - every path out of this strategy ends the chain.
struct TomlConfigStrategy {
    policy: CliMissPolicy,
}

#[async_trait]
impl Strategy for TomlConfigStrategy {
    async fn evaluate(
        &self,
        sources: &ConfigSources,
        index: &dyn ReleaseIndex,
    ) -> Result<Option<Resolution>, AppError> {
        let Some(config) = sources.toml.as_ref() else {
            return Ok(None);
        };

        info(
            sources,
            &format!("Reading configuration from {}", TOML_FILENAME),
        );

        if let Some(requested) = sources.cli_version.as_deref() {
            let catalog = index.fetch(true).await?;
            if catalog.contains(requested) {
                return Ok(Some(Resolution::Install(ReleaseVersion::parse(requested)?)));
            }
            if self.policy == CliMissPolicy::Report {
                return Ok(Some(Resolution::Unavailable {
                    version: requested.to_string(),
                }));
            }
        }

        if let Some(declared) = config.version.as_deref() {
            return Ok(Some(Resolution::Install(ReleaseVersion::parse(declared)?)));
        }

        Ok(Some(Resolution::Interactive {
            list_all: sources.list_all,
        }))
    }
}

/// Precedence 2: required_version constraint embedded in *.tf files,
/// honored only when no version was passed on the command line.
struct RequiredVersionStrategy;

#[async_trait]
impl Strategy for RequiredVersionStrategy {
    async fn evaluate(
        &self,
        sources: &ConfigSources,
        index: &dyn ReleaseIndex,
    ) -> Result<Option<Resolution>, AppError> {
        if sources.cli_version.is_some() {
            return Ok(None);
        }
        let Some(raw) = sources.required_constraint.as_deref() else {
            return Ok(None);
        };

        info(
            sources,
            &format!(
                "Reading required version from terraform code, constraint: {}",
                raw
            ),
        );

        let constraint = Constraint::parse(raw)?;
        let catalog = index.fetch(true).await?;

        match constraint.highest_match(catalog.versions()) {
            Some(version) => {
                info(
                    sources,
                    &format!("Matched version: {}", version.as_str().green()),
                );
                Ok(Some(Resolution::Install(version)))
            }
            None => Err(ResolveError::no_constraint_match(raw).into()),
        }
    }
}

/// Precedence 3 and 4: single-line pin files, honored only when no
/// version was passed on the command line.
struct PinFileStrategy {
    filename: &'static str,
    select: fn(&ConfigSources) -> Option<&str>,
}

impl PinFileStrategy {
    fn rc_file() -> Self {
        Self {
            filename: RC_FILENAME,
            select: |s| s.rc_version.as_deref(),
        }
    }

    fn version_file() -> Self {
        Self {
            filename: VERSION_FILENAME,
            select: |s| s.file_version.as_deref(),
        }
    }
}

#[async_trait]
impl Strategy for PinFileStrategy {
    async fn evaluate(
        &self,
        sources: &ConfigSources,
        _index: &dyn ReleaseIndex,
    ) -> Result<Option<Resolution>, AppError> {
        if sources.cli_version.is_some() {
            return Ok(None);
        }
        let Some(pinned) = (self.select)(sources) else {
            return Ok(None);
        };

        info(
            sources,
            &format!("Reading required terraform version from {}", self.filename),
        );

        Ok(Some(Resolution::Install(ReleaseVersion::parse(pinned)?)))
    }
}

/// Precedence 5: a literal version on the command line, accepted only if
/// it exists in the catalog.
struct CliVersionStrategy;

#[async_trait]
impl Strategy for CliVersionStrategy {
    async fn evaluate(
        &self,
        sources: &ConfigSources,
        index: &dyn ReleaseIndex,
    ) -> Result<Option<Resolution>, AppError> {
        let Some(requested) = sources.cli_version.as_deref() else {
            return Ok(None);
        };

        // Format gate first: a bad format is fatal, unlike a miss below
        let version = ReleaseVersion::parse(requested)?;

        let catalog = index.fetch(true).await?;
        if catalog.contains(requested) {
            Ok(Some(Resolution::Install(version)))
        } else {
            Ok(Some(Resolution::Unavailable {
                version: requested.to_string(),
            }))
        }
    }
}

/// Orchestrates the precedence chain: first conclusive source wins.
pub struct VersionResolver {
    strategies: Vec<Box<dyn Strategy>>,
}

impl VersionResolver {
    /// Creates a resolver with the standard precedence chain.
    pub fn new(policy: CliMissPolicy) -> Self {
        Self {
            strategies: vec![
                Box::new(TomlConfigStrategy { policy }),
                Box::new(RequiredVersionStrategy),
                Box::new(PinFileStrategy::rc_file()),
                Box::new(PinFileStrategy::version_file()),
                Box::new(CliVersionStrategy),
            ],
        }
    }

    /// Evaluates sources in precedence order and returns the first
    /// conclusive resolution; with none, defers to interactive selection.
    pub async fn resolve(
        &self,
        sources: &ConfigSources,
        index: &dyn ReleaseIndex,
    ) -> Result<Resolution, AppError> {
        for strategy in &self.strategies {
            if let Some(resolution) = strategy.evaluate(sources, index).await? {
                return Ok(resolution);
            }
        }

        Ok(Resolution::Interactive {
            list_all: sources.list_all,
        })
    }
}
