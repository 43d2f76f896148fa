//! Git operations for committing, tagging, and pushing a release.
//!
//! Backed by libgit2. All operations run against the working copy that
//! contains the project file; the remote is addressed directly by URL at
//! push time, so no named remote needs to be configured.

use git2::{Commit, ErrorCode, ObjectType, Oid, Repository, StatusOptions};
use std::path::{Path, PathBuf};

use crate::error::ReleaseError;

/// Outcome of staging and committing the project file.
#[derive(Debug, Clone, Copy)]
pub struct CommitOutcome {
    pub id: Oid,
    /// False when the file content matched HEAD and no new commit was needed.
    pub created: bool,
}

/// Commits, tags, and pushes releases in a local working copy.
pub struct RepoTagger {
    repo: Repository,
}

impl std::fmt::Debug for RepoTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoTagger")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl RepoTagger {
    /// Open the working copy containing the given project file.
    pub fn open(project_file: &Path) -> Result<Self, ReleaseError> {
        let start = project_file.parent().unwrap_or(Path::new("."));
        let repo = Repository::discover(start).map_err(|e| ReleaseError::RepoState {
            message: format!(
                "{} is not inside a git working copy: {}",
                project_file.display(),
                e.message()
            ),
        })?;

        if repo.is_bare() {
            return Err(ReleaseError::RepoState {
                message: "repository is bare, a working copy is required".to_string(),
            });
        }

        Ok(Self { repo })
    }

    pub fn workdir(&self) -> &Path {
        // Bare repositories are rejected in open(), so a workdir exists.
        self.repo.workdir().unwrap_or(Path::new("."))
    }

    fn relative_path(&self, file: &Path) -> Result<PathBuf, ReleaseError> {
        let file_abs = file.canonicalize().map_err(|source| ReleaseError::Io {
            file: file.to_path_buf(),
            source,
        })?;
        let workdir = self
            .workdir()
            .canonicalize()
            .map_err(|source| ReleaseError::Io {
                file: self.workdir().to_path_buf(),
                source,
            })?;

        file_abs
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| ReleaseError::RepoState {
                message: format!(
                    "{} is outside the repository working tree {}",
                    file.display(),
                    workdir.display()
                ),
            })
    }

    /// Fail if the working tree has uncommitted changes other than `allow`.
    pub fn ensure_clean(&self, allow: &Path) -> Result<(), ReleaseError> {
        let allow_rel = self.relative_path(allow)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let dirty: Vec<String> = statuses
            .iter()
            .filter_map(|s| s.path().map(String::from))
            .filter(|p| Path::new(p) != allow_rel)
            .collect();

        if dirty.is_empty() {
            Ok(())
        } else {
            Err(ReleaseError::RepoState {
                message: format!(
                    "working tree has unrelated uncommitted changes: {}",
                    dirty.join(", ")
                ),
            })
        }
    }

    /// Fail if the given tag name is already present in the repository.
    pub fn ensure_tag_absent(&self, name: &str) -> Result<(), ReleaseError> {
        match self.repo.find_reference(&format!("refs/tags/{name}")) {
            Ok(_) => Err(ReleaseError::TagExists(name.to_string())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Stage the project file and commit it with the given message.
    ///
    /// If the staged tree matches HEAD (the file did not actually change),
    /// no commit is created and the current HEAD id is returned instead.
    pub fn commit_file(&self, file: &Path, message: &str) -> Result<CommitOutcome, ReleaseError> {
        let rel = self.relative_path(file)?;

        let mut index = self.repo.index()?;
        index.add_path(&rel)?;
        index.write()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(parent) = &parent {
            if parent.tree_id() == tree_id {
                return Ok(CommitOutcome {
                    id: parent.id(),
                    created: false,
                });
            }
        }

        let sig = self.repo.signature()?;
        let parents: Vec<&Commit> = parent.iter().collect();
        let id = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

        Ok(CommitOutcome { id, created: true })
    }

    /// Create an annotated tag pointing at the given commit.
    pub fn create_tag(&self, name: &str, target: Oid, message: &str) -> Result<(), ReleaseError> {
        let object = self.repo.find_object(target, Some(ObjectType::Commit))?;
        let sig = self.repo.signature()?;

        match self.repo.tag(name, &object, &sig, message, false) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Exists => {
                Err(ReleaseError::TagExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Push the current branch and the tag to the remote at `url`.
    pub fn push(&self, url: &str, tag: &str) -> Result<(), ReleaseError> {
        let push_err = |e: git2::Error| ReleaseError::Push {
            url: url.to_string(),
            message: e.message().to_string(),
        };

        let mut remote = self.repo.remote_anonymous(url).map_err(push_err)?;

        let head = self.repo.head()?;
        let branch_ref = head.name().unwrap_or("HEAD").to_string();
        let refspecs = [branch_ref, format!("refs/tags/{tag}")];

        remote.push(&refspecs, None).map_err(push_err)
    }
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
