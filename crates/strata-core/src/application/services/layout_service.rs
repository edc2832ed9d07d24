//! Layout Service - read-only queries over the specification.
//!
//! Backs the `layout` listing and dry-run rendering. Separated from
//! ScaffoldService because it never needs a filesystem.

use serde::Serialize;

use crate::{
    domain::{DomainValidator, ScaffoldSpec, Section, SpecEntry},
    error::StrataResult,
};

/// Information about one package for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub section: Section,
    pub path: String,
    pub children: Vec<String>,
    pub is_package: bool,
    pub described: bool,
    pub description: String,
}

impl From<SpecEntry> for PackageInfo {
    fn from(entry: SpecEntry) -> Self {
        Self {
            section: entry.section,
            path: entry.relative_path.to_string(),
            children: entry.children.iter().map(|c| c.to_string()).collect(),
            is_package: entry.is_package,
            described: entry.description.is_some(),
            description: entry
                .description
                .map(|d| d.trim_start_matches("# ").trim_end().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Service for layout queries.
pub struct LayoutService {
    spec: ScaffoldSpec,
}

impl Default for LayoutService {
    fn default() -> Self {
        Self::new(ScaffoldSpec::builtin())
    }
}

impl LayoutService {
    pub fn new(spec: ScaffoldSpec) -> Self {
        Self { spec }
    }

    /// Run the integrity self-check of the specification.
    pub fn check(&self) -> StrataResult<()> {
        DomainValidator::validate_spec(&self.spec)?;
        Ok(())
    }

    /// Every entry of every section, breadth-first.
    pub fn list(&self) -> Vec<PackageInfo> {
        self.spec.entries().into_iter().map(PackageInfo::from).collect()
    }

    /// Entries of one section.
    pub fn list_section(&self, section: Section) -> Vec<PackageInfo> {
        self.list()
            .into_iter()
            .filter(|p| p.section == section)
            .collect()
    }

    /// Marker text for a project-relative key (bound text or fallback).
    pub fn describe(&self, key: &str) -> &'static str {
        self.spec.describe(key)
    }
}
