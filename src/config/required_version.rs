//! required_version scanning over terraform source files
//!
//! Terraform blocks may declare the core version they need:
//!
//! ```text
//! terraform {
//!   required_version = ">= 0.12.0"
//! }
//! ```
//!
//! Only the first declaration found is honored; duplicate declarations are
//! ignored rather than merged. Files are visited in name order so the
//! result does not depend on directory iteration order.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static REQUIRED_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"required_version\s*=\s*"([^"]+)""#).unwrap());

/// Scans `*.tf` files in the directory for a required_version constraint.
///
/// Returns the raw constraint expression from the first declaration found,
/// or None when no `.tf` file declares one. Unreadable files and
/// directories are skipped; a missing declaration is not an error.
pub fn scan_required_version(dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut tf_files: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "tf"))
        .collect();
    tf_files.sort();

    for path in tf_files {
        let Ok(contents) = std::fs::read_to_string(&path) else {
            continue;
        };
        if let Some(caps) = REQUIRED_VERSION_RE.captures(&contents) {
            return Some(caps[1].to_string());
        }
    }

    None
}
