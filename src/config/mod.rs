//! Configuration sources for version resolution
//!
//! All configuration is read exactly once, before any resolution logic
//! runs, into an immutable ConfigSources snapshot. The resolver consults
//! the snapshot; nothing re-reads files or flags mid-run.

mod pin_file;
mod required_version;
mod toml_file;

pub use toml_file::SwitchConfig;

use crate::cli::CliArgs;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// Default install path for the active binary
pub const DEFAULT_TARGET: &str = "/usr/local/bin/terraform";

/// Config file with optional `bin` and `version` keys
pub const TOML_FILENAME: &str = ".tfswap.toml";

/// Legacy single-line pin file
pub const RC_FILENAME: &str = ".tfswaprc";

/// Tool-agnostic single-line pin file
pub const VERSION_FILENAME: &str = ".terraform-version";

/// Immutable snapshot of every configuration source present in a run
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Parsed .tfswap.toml, if the file exists
    pub toml: Option<SwitchConfig>,
    /// required_version constraint scanned from *.tf files
    pub required_constraint: Option<String>,
    /// Trimmed contents of .tfswaprc
    pub rc_version: Option<String>,
    /// Trimmed contents of .terraform-version
    pub file_version: Option<String>,
    /// Literal version from the command line
    pub cli_version: Option<String>,
    /// Custom binary path from the command line
    pub cli_bin: Option<PathBuf>,
    /// Whether --list-all was passed
    pub list_all: bool,
    /// Whether --quiet was passed
    pub quiet: bool,
}

impl ConfigSources {
    /// Reads every source in the given directory once.
    ///
    /// Absent sources are simply None; a present but malformed TOML file
    /// is an error.
    pub fn load(dir: &Path, args: &CliArgs) -> Result<Self, ConfigError> {
        Ok(Self {
            toml: SwitchConfig::load(&dir.join(TOML_FILENAME))?,
            required_constraint: required_version::scan_required_version(dir),
            rc_version: pin_file::read_pin(&dir.join(RC_FILENAME))?,
            file_version: pin_file::read_pin(&dir.join(VERSION_FILENAME))?,
            cli_version: args.install_version.clone(),
            cli_bin: args.bin.clone(),
            list_all: args.list_all,
            quiet: args.quiet,
        })
    }

    /// The path the active binary symlink should live at.
    ///
    /// An explicit --bin wins; otherwise a `bin` declared in .tfswap.toml
    /// (with environment expansion applied); otherwise the default.
    pub fn target_path(&self) -> PathBuf {
        if let Some(ref bin) = self.cli_bin {
            return bin.clone();
        }
        if let Some(bin) = self.toml.as_ref().and_then(|t| t.expanded_bin()) {
            return PathBuf::from(bin);
        }
        PathBuf::from(DEFAULT_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let sources = ConfigSources::load(dir.path(), &args(&["tfswap"])).unwrap();

        assert!(sources.toml.is_none());
        assert!(sources.required_constraint.is_none());
        assert!(sources.rc_version.is_none());
        assert!(sources.file_version.is_none());
        assert!(sources.cli_version.is_none());
    }

    #[test]
    fn test_load_all_sources() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_FILENAME), "version = \"0.11.3\"\n").unwrap();
        fs::write(dir.path().join(RC_FILENAME), "0.10.8\n").unwrap();
        fs::write(dir.path().join(VERSION_FILENAME), "0.11.7\n").unwrap();
        fs::write(
            dir.path().join("main.tf"),
            "terraform { required_version = \">= 0.12.0\" }\n",
        )
        .unwrap();

        let sources = ConfigSources::load(dir.path(), &args(&["tfswap", "0.12.3"])).unwrap();

        assert_eq!(
            sources.toml.as_ref().unwrap().version.as_deref(),
            Some("0.11.3")
        );
        assert_eq!(sources.required_constraint.as_deref(), Some(">= 0.12.0"));
        assert_eq!(sources.rc_version.as_deref(), Some("0.10.8"));
        assert_eq!(sources.file_version.as_deref(), Some("0.11.7"));
        assert_eq!(sources.cli_version.as_deref(), Some("0.12.3"));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TOML_FILENAME), "version = [broken").unwrap();

        assert!(ConfigSources::load(dir.path(), &args(&["tfswap"])).is_err());
    }

    #[test]
    fn test_target_path_default() {
        let sources = ConfigSources::default();
        assert_eq!(sources.target_path(), PathBuf::from(DEFAULT_TARGET));
    }

    #[test]
    fn test_target_path_cli_wins_over_toml() {
        let sources = ConfigSources {
            cli_bin: Some(PathBuf::from("/opt/bin/terraform")),
            toml: Some(SwitchConfig {
                bin: Some("/cfg/bin/terraform".to_string()),
                version: None,
            }),
            ..Default::default()
        };
        assert_eq!(sources.target_path(), PathBuf::from("/opt/bin/terraform"));
    }

    #[test]
    fn test_target_path_from_toml() {
        let sources = ConfigSources {
            toml: Some(SwitchConfig {
                bin: Some("/cfg/bin/terraform".to_string()),
                version: None,
            }),
            ..Default::default()
        };
        assert_eq!(sources.target_path(), PathBuf::from("/cfg/bin/terraform"));
    }
}
