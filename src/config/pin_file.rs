//! Single-line version pin files
//!
//! Covers both the legacy `.tfswaprc` file and the tool-agnostic
//! `.terraform-version` convention: one literal version per file, nothing
//! else but a trailing newline.

use crate::error::ConfigError;
use std::path::Path;

/// Reads a pin file if it exists, returning its trimmed contents.
pub fn read_pin(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

    Ok(Some(contents.trim().to_string()))
}
