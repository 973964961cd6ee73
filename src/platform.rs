//! Platform detection and release archive URLs
//!
//! HashiCorp publishes one zip per version, OS, and architecture, e.g.
//! `terraform_0.12.3_darwin_amd64.zip`.

use crate::domain::ReleaseVersion;
use crate::error::InstallError;

/// OS and architecture identifiers as used in release archive names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    /// Detects the platform the process runs on.
    pub fn current() -> Result<Self, InstallError> {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            "linux" => "linux",
            "windows" => "windows",
            other => {
                return Err(InstallError::UnsupportedPlatform {
                    os: other.to_string(),
                    arch: std::env::consts::ARCH.to_string(),
                })
            }
        };

        let arch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            other => {
                return Err(InstallError::UnsupportedPlatform {
                    os: os.to_string(),
                    arch: other.to_string(),
                })
            }
        };

        Ok(Self { os, arch })
    }

    /// Archive file name for a version on this platform.
    pub fn archive_filename(&self, version: &ReleaseVersion) -> String {
        format!("terraform_{}_{}_{}.zip", version, self.os, self.arch)
    }

    /// Full download URL for a version on this platform.
    pub fn download_url(&self, base_url: &str, version: &ReleaseVersion) -> String {
        format!(
            "{}{}/{}",
            base_url,
            version,
            self.archive_filename(version)
        )
    }
}
