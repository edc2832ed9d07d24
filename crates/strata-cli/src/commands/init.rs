//! `strata init` - create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Write the built-in defaults to the user or local config file.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = target_path(args.local)?;

    if config_path.exists() && !args.force {
        return Err(CliError::ConfigExists { path: config_path });
    }

    AppConfig::default().save(&config_path)?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;
    Ok(())
}

fn target_path(local: bool) -> CliResult<PathBuf> {
    if local {
        return Ok(AppConfig::local_path());
    }
    AppConfig::global_path()
        .ok_or_else(|| CliError::config("Could not determine the user configuration directory"))
}
