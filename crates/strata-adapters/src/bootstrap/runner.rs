use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use super::plan::StepCommand;

/// Exit status of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with status {}", code),
            None => f.write_str("was terminated by a signal"),
        }
    }
}

/// Port for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` to completion in its working directory.
    fn run(&self, command: &StepCommand) -> io::Result<CommandStatus>;
}

/// Runs commands as child processes.
///
/// Interactive commands inherit the terminal; probes run with stdio
/// discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &StepCommand) -> io::Result<CommandStatus> {
        debug!(command = %command, cwd = %command.cwd.display(), "spawning");

        let mut process = Command::new(&command.program);
        process.args(&command.args).current_dir(&command.cwd);
        if !command.interactive {
            process
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let status = process.status()?;
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}
