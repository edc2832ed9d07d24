//! `strata config` - read and write configuration values.

use serde_json::{Map, Value};

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::{AppConfig, display_value},
    error::CliResult,
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.data(&display_value(&value))?;
            }
        }

        ConfigCommands::Set { key, value } => {
            // Only the active file is rewritten; env and other layers stay out.
            let path = AppConfig::active_path(global.config.as_ref())?;
            let mut file_config = AppConfig::load_file(&path)?;
            file_config.set(&key, &value)?;
            file_config.save(&path)?;

            tracing::info!(key = %key, path = %path.display(), "configuration updated");
            output.success(&format!(
                "{key} = {}  ({})",
                display_value(&file_config.get(&key)?),
                path.display()
            ))?;
        }

        ConfigCommands::List => {
            let entries = config.entries()?;
            if output.is_json() {
                let map: Map<String, Value> = entries.into_iter().collect();
                output.json(&map)?;
            } else {
                output.header("Current Configuration:")?;
                for (key, value) in &entries {
                    output.data(&format!("{key} = {}", display_value(value)))?;
                }
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(global.config.as_ref())?;
            output.data(&path.display().to_string())?;
        }
    }

    Ok(())
}
