//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the scaffolding workflow:
//! 1. Resolve the specification for a project name and output root
//! 2. Ensure every directory exists
//! 3. Write the marker file of every package
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{
        DomainValidator as validator, GeneratedFilesystemState, MarkerFile, ProjectName,
        ScaffoldSpec, ScaffoldTree,
    },
    error::StrataResult,
};

/// Main scaffolding service.
///
/// Holds the (immutable) specification and the filesystem port.
pub struct ScaffoldService {
    spec: ScaffoldSpec,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a service over the built-in specification.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use strata_core::application::ScaffoldService;
    /// # use strata_core::application::Filesystem;
    /// # fn fs() -> Box<dyn Filesystem> { unimplemented!() }
    ///
    /// let service = ScaffoldService::new(fs());
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self::with_spec(ScaffoldSpec::builtin(), filesystem)
    }

    pub fn with_spec(spec: ScaffoldSpec, filesystem: Box<dyn Filesystem>) -> Self {
        Self { spec, filesystem }
    }

    pub fn spec(&self) -> &ScaffoldSpec {
        &self.spec
    }

    /// Resolve without touching the filesystem (dry runs).
    pub fn plan(&self, project: &ProjectName, output_root: impl AsRef<Path>) -> ScaffoldTree {
        self.spec.resolve(project, output_root)
    }

    /// Scaffold a project: resolve, then materialize.
    #[instrument(
        skip_all,
        fields(
            project = %project,
            output_root = %output_root.as_ref().display(),
            marker = %marker
        )
    )]
    pub fn scaffold(
        &self,
        project: &ProjectName,
        output_root: impl AsRef<Path>,
        marker: &MarkerFile,
    ) -> StrataResult<GeneratedFilesystemState> {
        let tree = self.plan(project, output_root);
        validator::validate_tree(&tree)?;
        self.materialize(&tree, marker)
    }

    /// Turn a resolved tree into filesystem state.
    ///
    /// Directories first (every node, declaration order), then one marker per
    /// package. Existing directories are kept and existing markers are
    /// overwritten, so repeated runs converge. The first failure aborts the
    /// run; nothing already created is removed.
    #[instrument(
        skip_all,
        fields(project = %tree.project(), directories = tree.directory_count())
    )]
    pub fn materialize(
        &self,
        tree: &ScaffoldTree,
        marker: &MarkerFile,
    ) -> StrataResult<GeneratedFilesystemState> {
        let mut state = GeneratedFilesystemState::new(tree.project_root(), tree.tests_root());

        for node in tree.nodes() {
            debug!(path = %node.path.display(), "ensuring directory");
            self.filesystem.create_dir_all(&node.path)?;
            state.record_directory(&node.path);
        }

        for node in tree.packages() {
            let path = node.marker_path(marker);
            debug!(
                path = %path.display(),
                described = node.has_description(),
                "writing marker"
            );
            self.filesystem.write_file(&path, node.marker_content())?;
            state.record_marker(path);
        }

        info!(
            directories = state.directory_count(),
            markers = state.marker_count(),
            "Scaffold completed successfully"
        );
        Ok(state)
    }
}
