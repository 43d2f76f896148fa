//! The release workflow: update the project file, commit, tag, push.
//!
//! Control flows linearly through `FileUpdated -> Committed -> Tagged ->
//! Pushed`; a dry run short-circuits after the file update and reports the
//! would-be diff instead.

use anyhow::{Context, Result};
use colored::Colorize;
use semver::Version;
use serde::Serialize;
use std::path::PathBuf;

use crate::project::PlcProject;
use crate::repo::RepoTagger;
use crate::scan::ProjectScanner;

/// Everything a single release run needs, built once from CLI input.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    pub version: Version,
    pub repo_url: String,
    /// Explicit project file; when absent, one is discovered under `search_root`.
    pub plcproj: Option<PathBuf>,
    pub search_root: PathBuf,
    pub dry_run: bool,
    pub tag_prefix: String,
    pub message_template: String,
}

impl ReleaseRequest {
    /// The tag name for this release, e.g. `v1.3.0`.
    pub fn tag_name(&self) -> String {
        format!("{}{}", self.tag_prefix, self.version)
    }

    /// The commit/tag message, with `{tag}` and `{version}` substituted.
    pub fn message(&self) -> String {
        self.message_template
            .replace("{tag}", &self.tag_name())
            .replace("{version}", &self.version.to_string())
    }
}

/// Terminal state of a release run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseState {
    /// Dry run: changes computed and reported, nothing persisted.
    Reported,
    /// File written, commit and tag created, remote updated.
    Done,
}

/// Summary of what a release run did (or, for a dry run, would do).
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReport {
    pub project_file: PathBuf,
    pub old_version: String,
    pub new_version: String,
    pub tag: String,
    pub commit: Option<String>,
    pub pushed: bool,
    pub state: ReleaseState,
    pub diff: Vec<String>,
}

impl ReleaseReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize release report")
    }

    /// Print a colorized terminal report.
    pub fn print_terminal(&self, verbose: bool) {
        match self.state {
            ReleaseState::Reported => {
                println!(
                    "{} Dry run: {} would go from {} to {}",
                    "Info:".blue().bold(),
                    self.project_file.display(),
                    self.old_version,
                    self.new_version
                );
                self.print_diff();
                println!(
                    "{} Nothing written, no commit, no tag ({} not pushed)",
                    "✓".green().bold(),
                    self.tag
                );
            }
            ReleaseState::Done => {
                println!(
                    "{} {} updated: {} -> {}",
                    "✓".green().bold(),
                    self.project_file.display(),
                    self.old_version,
                    self.new_version
                );
                if let Some(commit) = &self.commit {
                    println!("{} Committed {}", "✓".green().bold(), commit.dimmed());
                }
                println!("{} Tag {} created and pushed", "✓".green().bold(), self.tag);
                if verbose {
                    self.print_diff();
                }
            }
        }
    }

    fn print_diff(&self) {
        for line in &self.diff {
            if line.starts_with('-') {
                println!("  {}", line.red());
            } else {
                println!("  {}", line.green());
            }
        }
    }
}

/// Execute a release run end to end.
pub fn run(request: &ReleaseRequest) -> Result<ReleaseReport> {
    let project_path = match &request.plcproj {
        Some(path) => path.clone(),
        None => ProjectScanner::new(&request.search_root)
            .find_default()
            .context("Failed to locate a project file")?,
    };

    let mut project = PlcProject::load(&project_path)?;
    let old_version = project.version().to_string();
    project.set_version(&request.version);

    let diff = project
        .diff()
        .into_iter()
        .flat_map(|d| [format!("-{}", d.old), format!("+{}", d.new)])
        .collect();

    let tag = request.tag_name();

    if request.dry_run {
        return Ok(ReleaseReport {
            project_file: project_path,
            old_version,
            new_version: request.version.to_string(),
            tag,
            commit: None,
            pushed: false,
            state: ReleaseState::Reported,
            diff,
        });
    }

    // Pre-flight checks before anything is written.
    let tagger = RepoTagger::open(&project_path)?;
    tagger.ensure_clean(&project_path)?;
    tagger.ensure_tag_absent(&tag)?;

    project.save()?;

    let message = request.message();
    let outcome = tagger.commit_file(&project_path, &message)?;
    tagger.create_tag(&tag, outcome.id, &message)?;
    tagger.push(&request.repo_url, &tag)?;

    Ok(ReleaseReport {
        project_file: project_path,
        old_version,
        new_version: request.version.to_string(),
        tag,
        commit: Some(outcome.id.to_string()),
        pushed: true,
        state: ReleaseState::Done,
        diff,
    })
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
