use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_core::domain::ProjectName;

/// Tunables of the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Installer script piped to `python3` when poetry is missing.
    pub poetry_installer_url: String,
    /// Packages added to the `dev` dependency group.
    pub dev_dependencies: Vec<String>,
    /// Register `git cz` as a repository-local alias.
    pub register_git_alias: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            poetry_installer_url: "https://install.python-poetry.org".into(),
            dev_dependencies: vec!["commitizen".into(), "pre-commit".into()],
            register_git_alias: true,
        }
    }
}

/// One external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Inherit the terminal. Off for probes.
    pub interactive: bool,
}

impl StepCommand {
    pub fn new(program: &str, args: &[&str], cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.into(),
            interactive: true,
        }
    }

    /// Same command, run with stdio discarded.
    pub fn probe(mut self) -> Self {
        self.interactive = false;
        self
    }
}

impl fmt::Display for StepCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// A named step. `unless`, when set, is probed first and the step is
/// skipped if the probe succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapStep {
    pub name: &'static str,
    pub command: StepCommand,
    pub unless: Option<StepCommand>,
}

/// The ordered bootstrap sequence for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapPlan {
    output_root: PathBuf,
    project_dir: PathBuf,
    steps: Vec<BootstrapStep>,
}

impl BootstrapPlan {
    /// Steps for `project` under `output_root`.
    ///
    /// `poetry new` runs in the output root; everything after it runs in the
    /// project directory it creates.
    pub fn new(project: &ProjectName, output_root: &Path, config: &BootstrapConfig) -> Self {
        let root = output_root.to_path_buf();
        let dir = root.join(project.as_str());

        let installer = format!("curl -sSL {} | python3 -", config.poetry_installer_url);
        let mut add_dev = vec!["add", "--group", "dev"];
        add_dev.extend(config.dev_dependencies.iter().map(String::as_str));

        let mut steps = vec![
            BootstrapStep {
                name: "ensure-poetry",
                command: StepCommand::new("sh", &["-c", installer.as_str()], &root),
                unless: Some(StepCommand::new("poetry", &["--version"], &root).probe()),
            },
            step("create-project", "poetry", &["new", project.as_str()], &root),
        ];

        if !config.dev_dependencies.is_empty() {
            steps.push(step("add-dev-dependencies", "poetry", &add_dev, &dir));
        }

        steps.push(step("init-git", "git", &["init"], &dir));
        steps.push(step("init-commitizen", "poetry", &["run", "cz", "init"], &dir));

        if config.register_git_alias {
            steps.push(step(
                "register-alias",
                "git",
                &["config", "alias.cz", "!poetry run cz commit"],
                &dir,
            ));
        }

        steps.push(step("stage-files", "git", &["add", "."], &dir));
        steps.push(step("initial-commit", "git", &["cz"], &dir));

        Self {
            output_root: root,
            project_dir: dir,
            steps,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// The managed project directory; the scaffold goes under it.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn steps(&self) -> &[BootstrapStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn step(name: &'static str, program: &str, args: &[&str], cwd: &Path) -> BootstrapStep {
    BootstrapStep {
        name,
        command: StepCommand::new(program, args, cwd),
        unless: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(config: &BootstrapConfig) -> BootstrapPlan {
        BootstrapPlan::new(
            &ProjectName::new("my_project").unwrap(),
            Path::new("/work/generated_projects"),
            config,
        )
    }

    #[test]
    fn default_plan_order() {
        let names: Vec<_> = plan(&BootstrapConfig::default())
            .steps()
            .iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(
            names,
            [
                "ensure-poetry",
                "create-project",
                "add-dev-dependencies",
                "init-git",
                "init-commitizen",
                "register-alias",
                "stage-files",
                "initial-commit",
            ]
        );
    }

    #[test]
    fn project_steps_run_inside_project_dir() {
        let plan = plan(&BootstrapConfig::default());
        let root = Path::new("/work/generated_projects");

        assert_eq!(plan.project_dir(), root.join("my_project"));
        assert_eq!(plan.steps()[1].command.cwd, root);
        assert_eq!(plan.steps()[1].command.to_string(), "poetry new my_project");
        assert!(
            plan.steps()[2..]
                .iter()
                .all(|s| s.command.cwd == plan.project_dir())
        );
    }

    #[test]
    fn dev_dependencies_are_configurable() {
        let config = BootstrapConfig {
            dev_dependencies: vec!["ruff".into()],
            ..Default::default()
        };
        let plan = plan(&config);
        assert_eq!(
            plan.steps()[2].command.to_string(),
            "poetry add --group dev ruff"
        );

        let none = BootstrapConfig {
            dev_dependencies: vec![],
            ..Default::default()
        };
        assert!(
            self::plan(&none)
                .steps()
                .iter()
                .all(|s| s.name != "add-dev-dependencies")
        );
    }

    #[test]
    fn alias_is_repository_local_and_optional() {
        let plan = plan(&BootstrapConfig::default());
        let alias = plan
            .steps()
            .iter()
            .find(|s| s.name == "register-alias")
            .unwrap();
        assert_eq!(
            alias.command.args,
            ["config", "alias.cz", "!poetry run cz commit"]
        );

        let off = BootstrapConfig {
            register_git_alias: false,
            ..Default::default()
        };
        assert_eq!(self::plan(&off).len(), 7);
    }

    #[test]
    fn poetry_install_is_guarded_by_probe() {
        let config = BootstrapConfig {
            poetry_installer_url: "https://example.invalid/install".into(),
            ..Default::default()
        };
        let plan = plan(&config);
        let ensure = &plan.steps()[0];

        assert_eq!(
            ensure.command.args[1],
            "curl -sSL https://example.invalid/install | python3 -"
        );
        let probe = ensure.unless.as_ref().unwrap();
        assert_eq!(probe.to_string(), "poetry --version");
        assert!(!probe.interactive);
    }
}
