//! Download, extraction, and symlink activation
//!
//! Installing a version is one logical operation:
//! 1. Resolve the platform-specific download URL
//! 2. Download the archive into the tool-owned working directory
//! 3. Extract the single binary payload
//! 4. Rename it to a version-qualified file name (installed versions
//!    coexist on disk without collision)
//! 5. Delete the archive; the renamed binary is retained and doubles as
//!    the "recent versions" cache
//! 6. Remove the existing symlink at the target path (a regular file is
//!    refused unless force is set)
//! 7. Create the new symlink
//!
//! Steps 1-5 touch only the working directory. The live target path is
//! mutated in steps 6-7 alone, after extraction has fully succeeded, so a
//! failure anywhere earlier leaves the previously active binary untouched.

use crate::catalog::{HttpClient, DEFAULT_RELEASES_URL};
use crate::domain::ReleaseVersion;
use crate::error::{AppError, FetchError, InstallError};
use crate::platform::Platform;
use crate::progress::Progress;
use colored::Colorize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix for version-qualified binaries in the working directory
const BINARY_PREFIX: &str = "terraform_";

/// Performs the download/extract/activate workflow
pub struct Installer {
    work_dir: PathBuf,
    client: HttpClient,
    base_url: String,
    platform: Platform,
    quiet: bool,
}

/// Result of a completed install
#[derive(Debug)]
pub struct InstallOutcome {
    /// The installed version
    pub version: ReleaseVersion,
    /// Version-qualified binary inside the working directory
    pub binary_path: PathBuf,
    /// The symlink that now points at the binary
    pub target: PathBuf,
    /// Whether the binary was already on disk and the download was skipped
    pub was_cached: bool,
}

impl Installer {
    /// Creates an installer over the given working directory.
    pub fn new(work_dir: impl Into<PathBuf>, client: HttpClient) -> Result<Self, InstallError> {
        Ok(Self {
            work_dir: work_dir.into(),
            client,
            base_url: DEFAULT_RELEASES_URL.to_string(),
            platform: Platform::current()?,
            quiet: false,
        })
    }

    /// Overrides the releases URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Suppresses progress and status output.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The default tool-owned working directory, `~/.tfswap`.
    pub fn default_work_dir() -> Result<PathBuf, InstallError> {
        let home = dirs::home_dir().ok_or(InstallError::NoHomeDir)?;
        Ok(home.join(".tfswap"))
    }

    /// Versions with a retained binary in the working directory, newest
    /// first. Feeds the top of the interactive menu.
    pub fn recent_versions(&self) -> Vec<ReleaseVersion> {
        let Ok(entries) = fs::read_dir(&self.work_dir) else {
            return Vec::new();
        };

        let mut versions: Vec<ReleaseVersion> = entries
            .flatten()
            .filter_map(|e| {
                let name = e.file_name().into_string().ok()?;
                ReleaseVersion::parse(name.strip_prefix(BINARY_PREFIX)?).ok()
            })
            .collect();
        versions.sort_by(|a, b| b.cmp(a));
        versions
    }

    /// Installs a validated version and activates it at the target path.
    pub async fn install(
        &self,
        version: &ReleaseVersion,
        target: &Path,
        force: bool,
    ) -> Result<InstallOutcome, AppError> {
        let binary_path = self.work_dir.join(format!("{}{}", BINARY_PREFIX, version));
        let was_cached = binary_path.exists();

        if !was_cached {
            fs::create_dir_all(&self.work_dir)
                .map_err(|e| InstallError::io(&self.work_dir, e))?;

            let archive_path = self.work_dir.join(self.platform.archive_filename(version));
            let url = self.platform.download_url(&self.base_url, version);

            self.download_archive(&url, &archive_path, version).await?;
            extract_binary(&archive_path, &binary_path)?;

            // The archive is scratch; the extracted binary is what we keep
            fs::remove_file(&archive_path)
                .map_err(|e| InstallError::io(&archive_path, e))?;
        }

        activate(&binary_path, target, force)?;

        if !self.quiet {
            println!(
                "Switched terraform to version {}{}",
                version.as_str().green(),
                if was_cached { " (already installed)" } else { "" }
            );
        }

        Ok(InstallOutcome {
            version: version.clone(),
            binary_path,
            target: target.to_path_buf(),
            was_cached,
        })
    }

    /// Downloads the archive to a temp file, then renames it into place.
    async fn download_archive(
        &self,
        url: &str,
        dest: &Path,
        version: &ReleaseVersion,
    ) -> Result<(), AppError> {
        let mut response = self.client.get(url).await?;
        let total = response.content_length().unwrap_or(0);

        let mut progress = Progress::new(!self.quiet);
        if total > 0 {
            progress.start_bytes(total, &format!("Downloading terraform {}", version));
        } else {
            progress.spinner(&format!("Downloading terraform {}", version));
        }

        let temp_path = dest.with_extension("zip.part");
        let mut file =
            File::create(&temp_path).map_err(|e| InstallError::io(&temp_path, e))?;

        let mut downloaded: u64 = 0;
        loop {
            let chunk = response.chunk().await.map_err(|e| {
                FetchError::network_error(url, format!("download interrupted: {}", e))
            })?;
            let Some(chunk) = chunk else { break };

            file.write_all(&chunk)
                .map_err(|e| InstallError::io(&temp_path, e))?;
            downloaded += chunk.len() as u64;
            progress.set_position(downloaded);
        }

        progress.finish_and_clear();

        fs::rename(&temp_path, dest).map_err(|e| InstallError::io(dest, e))?;
        Ok(())
    }
}

/// Extracts the single binary payload out of a release archive into the
/// version-qualified path.
fn extract_binary(archive_path: &Path, binary_path: &Path) -> Result<(), InstallError> {
    let file = File::open(archive_path).map_err(|e| InstallError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| InstallError::archive_error(archive_path, e.to_string()))?;

    let payload_index = find_payload(&mut archive, archive_path)?;

    let mut entry = archive
        .by_index(payload_index)
        .map_err(|e| InstallError::archive_error(archive_path, e.to_string()))?;
    let mut out =
        File::create(binary_path).map_err(|e| InstallError::io(binary_path, e))?;
    std::io::copy(&mut entry, &mut out).map_err(|e| InstallError::io(binary_path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(binary_path, fs::Permissions::from_mode(0o755))
            .map_err(|e| InstallError::io(binary_path, e))?;
    }

    Ok(())
}

/// Locates the binary entry: the one named `terraform`, or the only file
/// entry in the archive.
fn find_payload<R: std::io::Read + std::io::Seek>(
    archive: &mut zip::ZipArchive<R>,
    archive_path: &Path,
) -> Result<usize, InstallError> {
    let mut first_file = None;

    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|e| InstallError::archive_error(archive_path, e.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        if entry.name() == "terraform" || entry.name() == "terraform.exe" {
            return Ok(i);
        }
        first_file.get_or_insert(i);
    }

    first_file.ok_or_else(|| InstallError::BinaryMissing {
        path: archive_path.to_path_buf(),
    })
}

/// Swaps the symlink at the target path to point at the given binary.
///
/// An existing symlink is replaced. A regular file (for example a binary
/// installed by a system package manager) is refused unless `force` is
/// set, so a non-tool-managed install is never destroyed silently.
fn activate(binary_path: &Path, target: &Path, force: bool) -> Result<(), InstallError> {
    match fs::symlink_metadata(target) {
        Ok(meta) => {
            if !meta.file_type().is_symlink() && !force {
                return Err(InstallError::target_occupied(target));
            }
            fs::remove_file(target).map_err(|e| InstallError::activation_error(target, e))?;
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(InstallError::activation_error(target, e)),
    }

    #[cfg(unix)]
    std::os::unix::fs::symlink(binary_path, target)
        .map_err(|e| InstallError::activation_error(target, e))?;

    #[cfg(windows)]
    std::os::windows::fs::symlink_file(binary_path, target)
        .map_err(|e| InstallError::activation_error(target, e))?;

    Ok(())
}
