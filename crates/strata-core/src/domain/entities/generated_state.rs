use std::path::{Path, PathBuf};

use serde::Serialize;

/// What one materialization run left on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFilesystemState {
    pub project_root: PathBuf,
    pub tests_root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub markers: Vec<PathBuf>,
}

impl GeneratedFilesystemState {
    pub fn new(project_root: impl Into<PathBuf>, tests_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            tests_root: tests_root.into(),
            directories: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub(crate) fn record_directory(&mut self, path: &Path) {
        self.directories.push(path.to_path_buf());
    }

    pub(crate) fn record_marker(&mut self, path: PathBuf) {
        self.markers.push(path);
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
