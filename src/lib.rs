//! Release tagging utilities for TwinCAT PLC projects.
//!
//! This crate rewrites the `<ProjectVersion>` element of a `.plcproj` file
//! and records the release in git: a commit, an annotated tag, and a push to
//! the remote. A dry-run mode reports the would-be changes without touching
//! the file or the repository.

pub mod cli;
pub mod error;
pub mod project;
pub mod release;
pub mod repo;
pub mod scan;

pub use error::ReleaseError;
pub use project::{DiffLine, PlcProject};
pub use release::{run, ReleaseReport, ReleaseRequest, ReleaseState};
pub use repo::{CommitOutcome, RepoTagger};
pub use scan::ProjectScanner;
