//! CLI argument parsing module for tfswap

use clap::Parser;
use std::path::PathBuf;

/// Terraform version switcher
///
/// Supply the terraform version as an argument, or choose from a menu.
#[derive(Parser, Debug, Clone)]
#[command(name = "tfswap", version, about = "Terraform version switcher")]
pub struct CliArgs {
    /// Terraform version to install (e.g. 0.12.3); omit to choose from a menu
    #[arg(value_name = "VERSION")]
    pub install_version: Option<String>,

    /// Custom binary path. For example: /Users/username/bin/terraform
    #[arg(short = 'b', long)]
    pub bin: Option<PathBuf>,

    /// List all versions of terraform - including beta and rc
    #[arg(short = 'l', long)]
    pub list_all: bool,

    /// Replace a regular file at the binary path instead of refusing
    #[arg(long)]
    pub force: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}
