//! Implementation of the `strata bootstrap` command.
//!
//! Runs the external setup sequence (poetry, git, commitizen) and then
//! scaffolds the layout inside the freshly created project.

use std::path::Path;

use tracing::{info, instrument, warn};

use strata_adapters::{
    BootstrapPlan, Bootstrapper, LocalFilesystem, ProcessRunner, bootstrap::StepOutcome,
};
use strata_core::{application::ScaffoldService, domain::ProjectName, error::StrataError};

use crate::{
    cli::BootstrapArgs,
    commands::scaffold::{render_state, resolve_marker, resolve_output_root},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `strata bootstrap` command.
///
/// 1. Build the step plan from the project name, output root and config
/// 2. Print it and stop if `--dry-run`
/// 3. Confirm with the user unless `--yes` or `--quiet`
/// 4. Run every step, aborting on the first failure
/// 5. Scaffold under the project directory the steps created
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: BootstrapArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = ProjectName::new(args.name.as_str()).map_err(StrataError::from)?;
    let marker = resolve_marker(args.marker.as_deref(), &config)?;
    let output_root = resolve_output_root(args.output, &config);

    let plan = BootstrapPlan::new(&project, &output_root, &config.bootstrap);

    if args.dry_run {
        return render_plan(&plan, &output);
    }

    if !output.is_quiet() && !args.yes && !output.is_json() {
        render_plan(&plan, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let bootstrapper = Bootstrapper::new(Box::new(ProcessRunner), Box::new(LocalFilesystem::new()));
    let total = plan.len();
    let outcomes = bootstrapper.run_with(&plan, |index, step| {
        let line = format!("[{}/{}] {}", index + 1, total, step.name);
        if let Err(e) = output.info(&line) {
            // The step still runs; only the progress line is lost.
            warn!(step = step.name, error = %e, "failed to write progress line");
        }
    })?;

    let skipped = outcomes
        .iter()
        .filter(|o| **o == StepOutcome::Skipped)
        .count();
    info!(total, skipped, "Environment ready");
    if skipped > 0 {
        output.warning(&format!("{skipped} step(s) skipped, already satisfied"))?;
    }

    // The scaffold lands inside the poetry project: <root>/<name>/<name>/...
    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));
    let state = service.scaffold(&project, plan.project_dir(), &marker)?;

    render_state(&state, &output)?;
    if !output.is_json() {
        print_next_steps(plan.project_dir(), &output)?;
    }
    Ok(())
}

fn render_plan(plan: &BootstrapPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        return output.json(plan);
    }

    output.header(&format!(
        "Bootstrap plan for {}",
        plan.project_dir().display()
    ))?;
    for (index, step) in plan.steps().iter().enumerate() {
        output.print(&format!("  {:>2}. {:<22} {}", index + 1, step.name, step.command))?;
        if let Some(probe) = &step.unless {
            output.print(&format!("      {:<22} skipped if `{}` succeeds", "", probe))?;
        }
    }
    output.print("")?;
    Ok(())
}

fn print_next_steps(project_dir: &Path, output: &OutputManager) -> CliResult<()> {
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", project_dir.display()))?;
    output.print("  poetry shell")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Run these commands?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Run these commands? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}
