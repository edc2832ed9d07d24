use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    entities::{common::RelativePath, package_node::PackageNode},
    value_objects::{ProjectName, Section},
};

/// A scaffold specification resolved for one project name and output root.
///
/// Nodes are kept in breadth-first declaration order, section by section,
/// so every parent precedes its children and output is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldTree {
    project: ProjectName,
    output_root: PathBuf,
    nodes: Vec<PackageNode>,
}

impl ScaffoldTree {
    pub(crate) fn new(project: ProjectName, output_root: PathBuf, nodes: Vec<PackageNode>) -> Self {
        Self {
            project,
            output_root,
            nodes,
        }
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn project_root(&self) -> PathBuf {
        Section::Main.root(&self.output_root, &self.project)
    }

    pub fn tests_root(&self) -> PathBuf {
        Section::Tests.root(&self.output_root, &self.project)
    }

    /// Every directory of the tree, packages or not.
    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.iter()
    }

    /// Directories that receive a marker file.
    pub fn packages(&self) -> impl Iterator<Item = &PackageNode> {
        self.nodes.iter().filter(|n| n.is_package)
    }

    pub fn section(&self, section: Section) -> impl Iterator<Item = &PackageNode> {
        self.nodes.iter().filter(move |n| n.section == section)
    }

    /// Look a node up by its identity key.
    pub fn get(&self, section: Section, relative_path: &RelativePath) -> Option<&PackageNode> {
        self.nodes
            .iter()
            .find(|n| n.section == section && &n.relative_path == relative_path)
    }

    /// Convenience lookup by `/`-separated key.
    pub fn find(&self, section: Section, key: &str) -> Option<&PackageNode> {
        let path = RelativePath::parse(key).ok()?;
        self.get(section, &path)
    }

    pub fn directory_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn package_count(&self) -> usize {
        self.packages().count()
    }
}
