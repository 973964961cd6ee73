//! tfswap - Terraform version switcher library
//!
//! This library provides the core functionality for switching the active
//! Terraform binary between versions:
//! - Version resolution across configuration sources (.tfswap.toml,
//!   required_version constraints, .tfswaprc, .terraform-version, CLI)
//! - Release catalog fetching from the HashiCorp releases index
//! - Download, extraction, and symlink activation of a selected version

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod installer;
pub mod platform;
pub mod progress;
pub mod resolver;
pub mod select;
