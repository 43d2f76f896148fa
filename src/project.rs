//! Project file loading and version rewriting.
//!
//! A `.plcproj` is an MSBuild-style XML document carrying exactly one
//! `<ProjectVersion>` element. Only the text of that element is rewritten;
//! every other byte of the file is preserved as-is by splicing the new
//! version into the matched region instead of re-serializing the document.

use regex::Regex;
use semver::Version;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::ReleaseError;

const VERSION_PATTERN: &str = r"<ProjectVersion>([^<]*)</ProjectVersion>";

/// A loaded project file with its version region located.
#[derive(Debug, Clone)]
pub struct PlcProject {
    path: PathBuf,
    original: String,
    content: String,
    value_range: Range<usize>,
    version: String,
}

/// One changed line between the original and updated file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub line: usize,
    pub old: String,
    pub new: String,
}

impl PlcProject {
    /// Load a project file from disk and locate its version element.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReleaseError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReleaseError::Io {
            file: path.to_path_buf(),
            source,
        })?;

        let (value_range, version) = Self::locate_version(path, &content)?;

        Ok(Self {
            path: path.to_path_buf(),
            original: content.clone(),
            content,
            value_range,
            version,
        })
    }

    fn locate_version(path: &Path, content: &str) -> Result<(Range<usize>, String), ReleaseError> {
        let parse_err = |message: &str| ReleaseError::Parse {
            file: path.to_path_buf(),
            message: message.to_string(),
        };

        if !content.contains("<Project") {
            return Err(parse_err("missing <Project> root element"));
        }

        let re = Regex::new(VERSION_PATTERN).expect("version pattern is valid");
        let captures: Vec<_> = re.captures_iter(content).collect();

        match captures.as_slice() {
            [] => {
                if content.contains("<ProjectVersion") {
                    Err(parse_err("unterminated <ProjectVersion> element"))
                } else {
                    Err(ReleaseError::NotFound {
                        file: path.to_path_buf(),
                    })
                }
            }
            [single] => {
                let value = single
                    .get(1)
                    .ok_or_else(|| parse_err("malformed <ProjectVersion> element"))?;
                Ok((value.range(), value.as_str().trim().to_string()))
            }
            _ => Err(parse_err("multiple <ProjectVersion> elements")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The version currently recorded in the file (or staged via `set_version`).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rewrite the version element's text, leaving all other content untouched.
    pub fn set_version(&mut self, new_version: &Version) {
        let version = new_version.to_string();
        let mut updated =
            String::with_capacity(self.content.len() - self.value_range.len() + version.len());
        updated.push_str(&self.content[..self.value_range.start]);
        updated.push_str(&version);
        updated.push_str(&self.content[self.value_range.end..]);

        self.value_range = self.value_range.start..self.value_range.start + version.len();
        self.content = updated;
        self.version = version;
    }

    /// Whether the staged content differs from what was read from disk.
    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }

    /// Line-level diff between the on-disk content and the staged content.
    pub fn diff(&self) -> Vec<DiffLine> {
        self.original
            .lines()
            .zip(self.content.lines())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(i, (old, new))| DiffLine {
                line: i + 1,
                old: old.to_string(),
                new: new.to_string(),
            })
            .collect()
    }

    /// Write the staged content back to the same path.
    pub fn save(&self) -> Result<(), ReleaseError> {
        std::fs::write(&self.path, &self.content).map_err(|source| ReleaseError::Io {
            file: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
