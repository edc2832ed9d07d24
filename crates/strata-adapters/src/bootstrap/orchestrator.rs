use strata_core::application::ports::Filesystem;
use tracing::{info, instrument, warn};

use super::{
    error::BootstrapError,
    plan::{BootstrapPlan, BootstrapStep},
    runner::CommandRunner,
};

/// What happened to one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Ran,
    /// The step's probe succeeded.
    Skipped,
}

/// Runs a [`BootstrapPlan`] step by step, stopping at the first failure.
pub struct Bootstrapper {
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
}

impl Bootstrapper {
    pub fn new(runner: Box<dyn CommandRunner>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { runner, filesystem }
    }

    pub fn run(&self, plan: &BootstrapPlan) -> Result<Vec<StepOutcome>, BootstrapError> {
        self.run_with(plan, |_, _| {})
    }

    /// Like [`Bootstrapper::run`], calling `on_step` before each step.
    #[instrument(skip_all, fields(project_dir = %plan.project_dir().display(), steps = plan.len()))]
    pub fn run_with<F>(
        &self,
        plan: &BootstrapPlan,
        mut on_step: F,
    ) -> Result<Vec<StepOutcome>, BootstrapError>
    where
        F: FnMut(usize, &BootstrapStep),
    {
        self.filesystem
            .create_dir_all(plan.output_root())
            .map_err(BootstrapError::Prepare)?;

        let mut outcomes = Vec::with_capacity(plan.len());
        for (index, step) in plan.steps().iter().enumerate() {
            on_step(index, step);
            outcomes.push(self.run_step(step)?);
        }

        info!("bootstrap finished");
        Ok(outcomes)
    }

    #[instrument(skip_all, fields(step = step.name))]
    fn run_step(&self, step: &BootstrapStep) -> Result<StepOutcome, BootstrapError> {
        if let Some(probe) = &step.unless {
            match self.runner.run(probe) {
                Ok(status) if status.success() => {
                    info!(probe = %probe, "already satisfied, skipping");
                    return Ok(StepOutcome::Skipped);
                }
                Ok(status) => info!(probe = %probe, %status, "probe failed"),
                Err(e) => info!(probe = %probe, error = %e, "probe could not start"),
            }
        }

        info!(command = %step.command, "running");
        let status = self
            .runner
            .run(&step.command)
            .map_err(|source| BootstrapError::Spawn {
                step: step.name,
                command: step.command.to_string(),
                source,
            })?;

        if !status.success() {
            warn!(command = %step.command, %status, "step failed");
            return Err(BootstrapError::StepFailed {
                step: step.name,
                command: step.command.to_string(),
                status,
            });
        }

        Ok(StepOutcome::Ran)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use strata_core::domain::ProjectName;

    use super::*;
    use crate::bootstrap::{BootstrapConfig, CommandStatus, MockCommandRunner, StepCommand};
    use crate::filesystem::MemoryFilesystem;

    fn plan() -> BootstrapPlan {
        BootstrapPlan::new(
            &ProjectName::new("my_project").unwrap(),
            Path::new("/work/out"),
            &BootstrapConfig::default(),
        )
    }

    fn is_probe(cmd: &StepCommand) -> bool {
        !cmd.interactive
    }

    #[test]
    fn runs_every_step_in_order_and_skips_installer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(move |cmd| {
            log.lock().unwrap().push(cmd.to_string());
            Ok(CommandStatus::SUCCESS)
        });

        let fs = MemoryFilesystem::new();
        let bootstrapper = Bootstrapper::new(Box::new(runner), Box::new(fs.clone()));
        let outcomes = bootstrapper.run(&plan()).unwrap();

        assert_eq!(outcomes[0], StepOutcome::Skipped);
        assert!(outcomes[1..].iter().all(|o| *o == StepOutcome::Ran));
        assert!(fs.is_dir(Path::new("/work/out")));

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], "poetry --version");
        assert_eq!(seen[1], "poetry new my_project");
        assert_eq!(seen.last().map(String::as_str), Some("git cz"));
        assert!(!seen.iter().any(|c| c.starts_with("sh -c")));
    }

    #[test]
    fn missing_poetry_triggers_installer() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd| is_probe(cmd))
            .times(1)
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));
        runner
            .expect_run()
            .withf(|cmd| !is_probe(cmd))
            .returning(|_| Ok(CommandStatus::SUCCESS));

        let bootstrapper =
            Bootstrapper::new(Box::new(runner), Box::new(MemoryFilesystem::new()));
        let outcomes = bootstrapper.run(&plan()).unwrap();

        assert_eq!(outcomes[0], StepOutcome::Ran);
    }

    #[test]
    fn failing_step_stops_the_sequence() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd| cmd.program == "git" && cmd.args == ["init"])
            .times(1)
            .returning(|_| Ok(CommandStatus::exited(128)));
        runner
            .expect_run()
            .withf(|cmd| !(cmd.program == "git" && cmd.args == ["init"]))
            .returning(|_| Ok(CommandStatus::SUCCESS));

        let mut started = Vec::new();
        let bootstrapper =
            Bootstrapper::new(Box::new(runner), Box::new(MemoryFilesystem::new()));
        let err = bootstrapper
            .run_with(&plan(), |_, step| started.push(step.name))
            .unwrap_err();

        match &err {
            BootstrapError::StepFailed {
                step,
                command,
                status,
            } => {
                assert_eq!(*step, "init-git");
                assert_eq!(command, "git init");
                assert_eq!(status.code, Some(128));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.step(), Some("init-git"));
        assert_eq!(started.last(), Some(&"init-git"));
        assert!(!started.contains(&"init-commitizen"));
    }

    #[test]
    fn spawn_failure_names_the_command() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));

        let bootstrapper =
            Bootstrapper::new(Box::new(runner), Box::new(MemoryFilesystem::new()));
        let err = bootstrapper.run(&plan()).unwrap_err();

        // The probe failing is tolerated; the installer is not.
        assert!(matches!(
            err,
            BootstrapError::Spawn {
                step: "ensure-poetry",
                ..
            }
        ));
        assert!(err.suggestions()[0].contains("'sh'"));
    }

    #[test]
    fn unusable_output_root_fails_before_any_command() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/work")).unwrap();
        fs.write_file(Path::new("/work/out"), "").unwrap();

        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let bootstrapper = Bootstrapper::new(Box::new(runner), Box::new(fs));
        assert!(matches!(
            bootstrapper.run(&plan()),
            Err(BootstrapError::Prepare(_))
        ));
    }
}
