//! CLI argument parsing using clap.

use anyhow::{Context, Result};
use clap::Parser;
use semver::Version;
use std::path::PathBuf;

use crate::release::ReleaseRequest;

/// tc-release CLI entry point.
#[derive(Parser, Debug)]
#[command(name = "tc-release")]
#[command(about = "Properly tags/versions your TwinCAT project with git")]
#[command(version)]
pub struct Cli {
    /// Target version, MAJOR.MINOR.BUGFIX with an optional leading 'v'
    #[arg(id = "version_number", value_name = "VERSION_NUMBER")]
    pub version: String,

    /// URL or path of the remote repository to push to
    #[arg(value_name = "REPO_URL")]
    pub repo_url: String,

    /// Path to the .plcproj file (default: the one discovered under the
    /// working directory)
    #[arg(long)]
    pub plcproj: Option<PathBuf>,

    /// Compute and report the changes without writing, committing, tagging,
    /// or pushing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the release report as JSON
    #[arg(long)]
    pub json: bool,

    /// Prefix for the generated tag name
    #[arg(long, default_value = "v")]
    pub tag_prefix: String,

    /// Commit and tag message template ({tag} and {version} are substituted)
    #[arg(long = "message", default_value = "Tagging version {tag}")]
    pub message_template: String,

    /// Increase the amount of output shown in the terminal
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the immutable release request for this invocation.
    pub fn to_request(&self) -> Result<ReleaseRequest> {
        let version = parse_version(&self.version)?;
        let search_root =
            std::env::current_dir().context("Failed to resolve the working directory")?;

        Ok(ReleaseRequest {
            version,
            repo_url: self.repo_url.clone(),
            plcproj: self.plcproj.clone(),
            search_root,
            dry_run: self.dry_run,
            tag_prefix: self.tag_prefix.clone(),
            message_template: self.message_template.clone(),
        })
    }
}

/// Parse a version number, accepting an optional leading 'v'.
pub fn parse_version(input: &str) -> Result<Version> {
    let bare = input.strip_prefix('v').unwrap_or(input);
    Version::parse(bare)
        .with_context(|| format!("Version number must be vMAJOR.MINOR.BUGFIX, got '{input}'"))
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
