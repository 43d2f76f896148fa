//! Project file discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Scans a directory tree for `.plcproj` files.
#[derive(Debug)]
pub struct ProjectScanner {
    root: PathBuf,
}

impl ProjectScanner {
    /// Create a new scanner rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find all `.plcproj` files under the root, case-insensitively,
    /// skipping version-control and build directories.
    pub fn find_projects(&self) -> Result<Vec<PathBuf>> {
        let mut projects = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !matches!(name.as_ref(), ".git" | "target" | "node_modules")
            })
        {
            let entry = entry.context("Failed to read directory entry")?;

            let is_plcproj = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("plcproj"));
            if entry.file_type().is_file() && is_plcproj {
                projects.push(entry.into_path());
            }
        }

        projects.sort();
        Ok(projects)
    }

    /// Resolve the single project file to release.
    ///
    /// Fails if none is found, or if several are found and the caller must
    /// disambiguate with `--plcproj`.
    pub fn find_default(&self) -> Result<PathBuf> {
        let projects = self.find_projects()?;

        match projects.as_slice() {
            [] => anyhow::bail!("No .plcproj file found under {}", self.root.display()),
            [single] => Ok(single.clone()),
            many => {
                let listing: Vec<String> = many
                    .iter()
                    .map(|p| format!("  {}", p.display()))
                    .collect();
                anyhow::bail!(
                    "Found multiple .plcproj files, pass --plcproj to select one:\n{}",
                    listing.join("\n")
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
