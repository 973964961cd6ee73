//! tfswap - Terraform version switcher CLI tool
//!
//! Resolves the desired terraform version from the configuration sources
//! present in the working directory (or an interactive pick), downloads
//! the release, and activates it via a symlink swap.

use clap::Parser;
use std::process::ExitCode;
use tfswap::catalog::{HttpClient, HttpReleaseIndex, ReleaseIndex};
use tfswap::cli::CliArgs;
use tfswap::config::ConfigSources;
use tfswap::installer::Installer;
use tfswap::resolver::{CliMissPolicy, Resolution, VersionResolver};
use tfswap::select;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Run the main logic and handle errors at this single exit point
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;

    // Read every configuration source once, before any resolution runs
    let sources = ConfigSources::load(&cwd, &args)?;
    let target = sources.target_path();

    let client = HttpClient::new()?;
    let index = HttpReleaseIndex::new(client.clone());

    let resolver = VersionResolver::new(CliMissPolicy::Report);
    let resolution = resolver.resolve(&sources, &index).await?;

    let installer =
        Installer::new(Installer::default_work_dir()?, client)?.with_quiet(args.quiet);

    match resolution {
        Resolution::Install(version) => {
            installer.install(&version, &target, args.force).await?;
            Ok(ExitCode::SUCCESS)
        }
        Resolution::Unavailable { version } => {
            // Informational, not a failure: nothing was installed
            println!(
                "The provided terraform version {} does not exist. \
                 Try `tfswap -l` to see all available versions.",
                version
            );
            Ok(ExitCode::SUCCESS)
        }
        Resolution::Interactive { list_all } => {
            let catalog = index.fetch(list_all).await?;
            let recent = installer.recent_versions();
            let version = select::pick_version(&catalog, &recent)?;
            installer.install(&version, &target, args.force).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
