//! Domain value objects: Section, ProjectName, MarkerFile.
//!
//! Pure value types with equality-by-value and no identity. Constructors
//! validate; once built, a value is always usable as a single path component.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{entities::common::check_segment, error::DomainError};

// ── Section ──────────────────────────────────────────────────────────────────

/// One of the independently rooted sub-trees of a generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The project itself, rooted at `<output>/<project>`.
    Main,
    /// The parallel test packages, rooted at `<output>/tests/<project>`.
    Tests,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Main, Section::Tests];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Tests => "tests",
        }
    }

    /// Absolute root directory of this section.
    pub fn root(&self, output_root: &Path, project: &ProjectName) -> PathBuf {
        match self {
            Self::Main => output_root.join(project.as_str()),
            Self::Tests => output_root.join("tests").join(project.as_str()),
        }
    }

    /// Whether the section root directory itself receives a marker file.
    ///
    /// The project directory is not a package; `tests/<project>` is.
    pub const fn root_is_package(&self) -> bool {
        matches!(self, Self::Tests)
    }

    /// Whether paths in this section live under the project root, and can
    /// therefore match a description key.
    pub const fn under_project_root(&self) -> bool {
        matches!(self, Self::Main)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of the generated project.
///
/// Only what keeps the project a single directory directly under the output
/// root is checked; anything else the filesystem accepts is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_segment(&name).map_err(|e| DomainError::InvalidProjectName {
            name: name.clone(),
            reason: segment_reason(e),
        })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── MarkerFile ───────────────────────────────────────────────────────────────

/// File name of the per-package marker written into every package directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MarkerFile(String);

impl MarkerFile {
    /// The package initializer of the layout's source convention.
    pub const DEFAULT: &'static str = "__init__.py";

    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_segment(&name).map_err(|e| DomainError::InvalidMarkerFile {
            name: name.clone(),
            reason: segment_reason(e),
        })?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MarkerFile {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for MarkerFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MarkerFile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<Path> for MarkerFile {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

fn segment_reason(err: DomainError) -> String {
    match err {
        DomainError::InvalidSegment { reason, .. } => reason.replace("segment", "name"),
        other => other.to_string(),
    }
}
