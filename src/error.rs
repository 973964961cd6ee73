//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: Version string fails the accepted grammar
//! - ResolveError: No catalog entry satisfies the request
//! - ConfigError: Issues reading configuration sources
//! - FetchError: Issues retrieving the release catalog or an archive
//! - InstallError: File system failures while installing or activating

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version format errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Version resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Configuration source errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Catalog and archive fetch errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Install and activation errors
    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Errors related to the version grammar
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version string does not match the accepted grammar
    #[error(
        "invalid terraform version format '{version}': format should be #.#.# or \
         #.#.#-@# where # is numbers and @ is word characters (for example, \
         0.11.7 and 0.11.9-beta1 are valid versions)"
    )]
    InvalidFormat { version: String },
}

impl VersionError {
    /// Creates a new InvalidFormat error
    pub fn invalid_format(version: impl Into<String>) -> Self {
        VersionError::InvalidFormat {
            version: version.into(),
        }
    }
}

/// Errors related to version resolution
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No catalog entry satisfies a required_version constraint
    #[error("no version found to match constraint '{constraint}'")]
    NoConstraintMatch { constraint: String },

    /// Constraint expression could not be parsed
    #[error("failed to parse constraint '{constraint}': {message}")]
    MalformedConstraint { constraint: String, message: String },
}

impl ResolveError {
    /// Creates a new NoConstraintMatch error
    pub fn no_constraint_match(constraint: impl Into<String>) -> Self {
        ResolveError::NoConstraintMatch {
            constraint: constraint.into(),
        }
    }

    /// Creates a new MalformedConstraint error
    pub fn malformed_constraint(
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ResolveError::MalformedConstraint {
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}

/// Errors related to configuration sources
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error in the config file
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

impl ConfigError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors related to fetching the release catalog or a release archive
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Request timed out
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Release index fetched but no versions could be parsed out of it
    #[error("invalid release index at {url}: {message}")]
    InvalidIndex { url: String, message: String },
}

impl FetchError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        FetchError::Timeout { url: url.into() }
    }

    /// Creates a new InvalidIndex error
    pub fn invalid_index(url: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::InvalidIndex {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Errors related to installing and activating a binary
#[derive(Error, Debug)]
pub enum InstallError {
    /// Running on a platform without published release archives
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// Home directory could not be determined for the working directory
    #[error("could not determine the home directory for the install cache")]
    NoHomeDir,

    /// Archive could not be opened or extracted
    #[error("failed to extract archive {path}: {message}")]
    ArchiveError { path: PathBuf, message: String },

    /// Archive did not contain the expected binary payload
    #[error("archive {path} does not contain a terraform binary")]
    BinaryMissing { path: PathBuf },

    /// The target path is a regular file not managed by tfswap
    #[error(
        "refusing to replace regular file at {path} (not a symlink; \
         pass --force to overwrite it)"
    )]
    TargetOccupied { path: PathBuf },

    /// Failed to remove or create the symlink at the target path
    #[error("failed to activate binary at {path}: {source}")]
    ActivationError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error in the working directory
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    /// Creates a new ArchiveError
    pub fn archive_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        InstallError::ArchiveError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TargetOccupied error
    pub fn target_occupied(path: impl Into<PathBuf>) -> Self {
        InstallError::TargetOccupied { path: path.into() }
    }

    /// Creates a new ActivationError
    pub fn activation_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::ActivationError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new generic IO error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InstallError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_error_invalid_format() {
        let err = VersionError::invalid_format("0.11");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid terraform version format"));
        assert!(msg.contains("0.11"));
        assert!(msg.contains("0.11.9-beta1"));
    }

    #[test]
    fn test_resolve_error_no_constraint_match() {
        let err = ResolveError::no_constraint_match(">=9.0.0");
        let msg = format!("{}", err);
        assert!(msg.contains("no version found to match constraint"));
        assert!(msg.contains(">=9.0.0"));
    }

    #[test]
    fn test_resolve_error_malformed_constraint() {
        let err = ResolveError::malformed_constraint(">>1.0", "unknown operator");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse constraint"));
        assert!(msg.contains(">>1.0"));
    }

    #[test]
    fn test_config_error_toml_parse() {
        let err = ConfigError::toml_parse_error("/p/.tfswap.toml", "unexpected key");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("unexpected key"));
    }

    #[test]
    fn test_fetch_error_network() {
        let err = FetchError::network_error("https://example.com", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_fetch_error_timeout() {
        let err = FetchError::timeout("https://example.com");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_install_error_target_occupied() {
        let err = InstallError::target_occupied("/usr/local/bin/terraform");
        let msg = format!("{}", err);
        assert!(msg.contains("refusing to replace regular file"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_install_error_activation() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = InstallError::activation_error("/usr/local/bin/terraform", io);
        let msg = format!("{}", err);
        assert!(msg.contains("failed to activate"));
    }

    #[test]
    fn test_app_error_from_version_error() {
        let app_err: AppError = VersionError::invalid_format("x.y.z").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("invalid terraform version format"));
    }

    #[test]
    fn test_app_error_from_fetch_error() {
        let app_err: AppError = FetchError::timeout("https://example.com").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn test_app_error_from_install_error() {
        let app_err: AppError = InstallError::NoHomeDir.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("home directory"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = VersionError::invalid_format("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidFormat"));
    }
}
