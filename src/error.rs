//! Error types for the release workflow.
//!
//! Every failure aborts the run: nothing is caught and retried internally,
//! and no partial-completion recovery is attempted.

use std::path::PathBuf;

/// Failure kinds for a release run.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// The project file is not well-formed markup.
    #[error("Failed to parse {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// The project file has no version element.
    #[error("No <ProjectVersion> element in {file}")]
    NotFound { file: PathBuf },

    /// The working tree is dirty or is not a usable git checkout.
    #[error("Repository state error: {message}")]
    RepoState { message: String },

    /// The requested tag already exists in the repository.
    #[error("Tag '{0}' already exists")]
    TagExists(String),

    /// Pushing the commit and tag to the remote failed.
    #[error("Push to {url} failed: {message}")]
    Push { url: String, message: String },

    /// I/O failure reading or writing a file.
    #[error("I/O error on {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other git operation failure.
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),
}
