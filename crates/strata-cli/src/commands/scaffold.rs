//! Implementation of the `strata scaffold` command.
//!
//! Responsibility: turn CLI arguments into a project name, output root and
//! marker, call the core scaffold service, and display results. No business
//! logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use strata_adapters::LocalFilesystem;
use strata_core::{
    application::ScaffoldService,
    domain::{GeneratedFilesystemState, MarkerFile, ProjectName, ScaffoldTree},
    error::StrataError,
};

use crate::{
    cli::ScaffoldArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `strata scaffold` command.
///
/// 1. Validate the project name and marker
/// 2. Resolve the output root (flag, then config)
/// 3. Early-exit with the plan if `--dry-run`
/// 4. Materialize via `ScaffoldService`
/// 5. Print the result
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: ScaffoldArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = ProjectName::new(args.name.as_str()).map_err(StrataError::from)?;
    let marker = resolve_marker(args.marker.as_deref(), &config)?;
    let output_root = resolve_output_root(args.output, &config);

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    if args.dry_run {
        let tree = service.plan(&project, &output_root);
        return render_plan(&tree, &marker, &output);
    }

    output.header(&format!("Scaffolding '{project}'..."))?;
    let state = service.scaffold(&project, &output_root, &marker)?;
    info!(
        project_root = %state.project_root.display(),
        markers = state.marker_count(),
        "Scaffold finished"
    );

    render_state(&state, &output)
}

// ── Shared with `bootstrap` ───────────────────────────────────────────────────

/// `--marker` wins over `defaults.marker_file`.
///
/// A bad flag is a usage error; a bad config value is a configuration error.
pub fn resolve_marker(flag: Option<&str>, config: &AppConfig) -> CliResult<MarkerFile> {
    match flag {
        Some(name) => Ok(MarkerFile::new(name).map_err(StrataError::from)?),
        None => config.marker_file(),
    }
}

pub fn resolve_output_root(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.unwrap_or_else(|| config.defaults.output_dir.clone())
}

pub fn render_state(state: &GeneratedFilesystemState, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(state);
    }

    output.success(&format!(
        "Created {} directories and {} marker files",
        state.directory_count(),
        state.marker_count()
    ))?;
    output.print(&format!("  Project: {}", state.project_root.display()))?;
    output.print(&format!("  Tests:   {}", state.tests_root.display()))?;
    Ok(())
}

// ── Dry run ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PlannedNode<'a> {
    path: &'a Path,
    marker: Option<PathBuf>,
    described: bool,
}

#[derive(Debug, Serialize)]
struct Plan<'a> {
    dry_run: bool,
    project_root: PathBuf,
    tests_root: PathBuf,
    nodes: Vec<PlannedNode<'a>>,
}

fn plan_of<'a>(tree: &'a ScaffoldTree, marker: &MarkerFile) -> Plan<'a> {
    Plan {
        dry_run: true,
        project_root: tree.project_root(),
        tests_root: tree.tests_root(),
        nodes: tree
            .nodes()
            .map(|node| PlannedNode {
                path: &node.path,
                marker: node.is_package.then(|| node.marker_path(marker)),
                described: node.has_description(),
            })
            .collect(),
    }
}

fn render_plan(tree: &ScaffoldTree, marker: &MarkerFile, output: &OutputManager) -> CliResult<()> {
    let plan = plan_of(tree, marker);
    if output.is_json() {
        return output.json(&plan);
    }

    output.info(&format!(
        "Dry run: would create {} directories and {} marker files",
        tree.directory_count(),
        tree.package_count()
    ))?;
    for node in &plan.nodes {
        let line = match &node.marker {
            Some(path) if node.described => format!("  {}", path.display()),
            Some(path) => format!("  {}  (generic)", path.display()),
            None => format!("  {}/", node.path.display()),
        };
        output.print(&line)?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
