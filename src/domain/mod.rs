//! Domain types for version switching
//!
//! This module contains the core value types:
//! - ReleaseVersion: a validated, ordered terraform version string
//! - Constraint: a parsed required_version range expression

mod constraint;
mod version;

pub use constraint::Constraint;
pub use version::{is_valid_version_format, ReleaseVersion};
