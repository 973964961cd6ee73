//! .tfswap.toml configuration file
//!
//! A small TOML file in the working directory with two optional keys:
//! - `bin`: custom install path for the active binary, with `$VAR` and
//!   `${VAR}` environment expansion applied
//! - `version`: the terraform version to install

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)\}|\$(\w+)").unwrap());

/// Parsed contents of .tfswap.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwitchConfig {
    /// Custom install path for the active binary
    pub bin: Option<String>,
    /// Declared terraform version
    pub version: Option<String>,
}

impl SwitchConfig {
    /// Reads and parses the config file if it exists. A present but
    /// unreadable or malformed file is an error; an absent file is not.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::read_error(path, e))?;

        let config: SwitchConfig = toml::from_str(&contents)
            .map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))?;

        Ok(Some(config))
    }

    /// The configured bin path with environment variables expanded.
    pub fn expanded_bin(&self) -> Option<String> {
        self.bin.as_deref().map(expand_env)
    }
}

/// Expands `$VAR` and `${VAR}` references from the process environment.
/// Unset variables expand to the empty string.
fn expand_env(value: &str) -> String {
    ENV_VAR_RE
        .replace_all(value, |caps: &regex::Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            std::env::var(name).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_absent_file() {
        let dir = TempDir::new().unwrap();
        let loaded = SwitchConfig::load(&dir.path().join(".tfswap.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_bin_and_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".tfswap.toml");
        fs::write(&path, "bin = \"/opt/bin/terraform\"\nversion = \"0.11.3\"\n").unwrap();

        let config = SwitchConfig::load(&path).unwrap().unwrap();
        assert_eq!(config.bin.as_deref(), Some("/opt/bin/terraform"));
        assert_eq!(config.version.as_deref(), Some("0.11.3"));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".tfswap.toml");
        fs::write(&path, "version = \"0.12.1\"\n").unwrap();

        let config = SwitchConfig::load(&path).unwrap().unwrap();
        assert!(config.bin.is_none());
        assert_eq!(config.version.as_deref(), Some("0.12.1"));
    }

    #[test]
    fn test_load_malformed_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".tfswap.toml");
        fs::write(&path, "version = [not toml").unwrap();

        let err = SwitchConfig::load(&path).unwrap_err();
        assert!(format!("{}", err).contains("failed to parse TOML"));
    }

    #[test]
    fn test_expand_env_braced_and_bare() {
        std::env::set_var("TFSWAP_TEST_HOME", "/home/tester");

        assert_eq!(
            expand_env("${TFSWAP_TEST_HOME}/bin/terraform"),
            "/home/tester/bin/terraform"
        );
        assert_eq!(
            expand_env("$TFSWAP_TEST_HOME/bin/terraform"),
            "/home/tester/bin/terraform"
        );
    }

    #[test]
    fn test_expand_env_unset_is_empty() {
        assert_eq!(expand_env("${TFSWAP_TEST_UNSET}/bin"), "/bin");
    }

    #[test]
    fn test_expanded_bin() {
        std::env::set_var("TFSWAP_TEST_PREFIX", "/usr/local");
        let config = SwitchConfig {
            bin: Some("$TFSWAP_TEST_PREFIX/bin/terraform".to_string()),
            version: None,
        };
        assert_eq!(
            config.expanded_bin().as_deref(),
            Some("/usr/local/bin/terraform")
        );
    }
}
