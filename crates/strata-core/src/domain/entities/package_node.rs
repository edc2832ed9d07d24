use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    entities::common::RelativePath,
    specification::FALLBACK_DESCRIPTION,
    value_objects::{MarkerFile, Section},
};

/// One directory of a resolved scaffold.
///
/// Identity is `(section, relative_path)`; `path` is the same location
/// resolved under a concrete output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageNode {
    pub section: Section,
    pub relative_path: RelativePath,
    pub path: PathBuf,
    pub children: Vec<String>,
    pub description: Option<&'static str>,
    pub is_package: bool,
}

impl PackageNode {
    /// Text written into this node's marker file.
    pub fn marker_content(&self) -> &'static str {
        self.description.unwrap_or(FALLBACK_DESCRIPTION)
    }

    /// Location of this node's marker file.
    pub fn marker_path(&self, marker: &MarkerFile) -> PathBuf {
        self.path.join(marker)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }
}
