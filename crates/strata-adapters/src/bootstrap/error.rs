use std::io;

use strata_core::error::StrataError;
use thiserror::Error;

use super::runner::CommandStatus;

/// Failures of the bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The output directory could not be prepared.
    #[error("Failed to prepare bootstrap directory: {0}")]
    Prepare(#[source] StrataError),

    /// The command could not be started at all.
    #[error("Step '{step}' could not start `{command}`: {source}")]
    Spawn {
        step: &'static str,
        command: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and reported failure.
    #[error("Step '{step}' failed: `{command}` {status}")]
    StepFailed {
        step: &'static str,
        command: String,
        status: CommandStatus,
    },
}

impl BootstrapError {
    /// Name of the failing step, if a step failed.
    pub fn step(&self) -> Option<&'static str> {
        match self {
            Self::Prepare(_) => None,
            Self::Spawn { step, .. } | Self::StepFailed { step, .. } => Some(step),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Prepare(e) => e.suggestions(),
            Self::Spawn { command, source, .. } if source.kind() == io::ErrorKind::NotFound => {
                let program = command.split_whitespace().next().unwrap_or_default();
                vec![
                    format!("'{}' was not found on PATH", program),
                    format!("Install {} and try again", program),
                ]
            }
            Self::Spawn { .. } => vec!["Check that the program is installed and executable".into()],
            Self::StepFailed { step, .. } => vec![
                format!("Inspect the output of step '{}' above", step),
                "Fix the cause and re-run; scaffolding itself is idempotent".into(),
                "Use --dry-run to print the full command plan".into(),
            ],
        }
    }
}
