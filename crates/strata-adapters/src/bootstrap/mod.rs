//! Environment bootstrap.
//!
//! Sets up a managed Python project around a scaffold: dependency manager,
//! dev tooling, version control and commit conventions. Every step is an
//! external command run through the [`CommandRunner`] port; the scaffold
//! itself is materialized by the caller once all steps succeeded.

mod error;
mod orchestrator;
mod plan;
mod runner;

pub use error::BootstrapError;
pub use orchestrator::{Bootstrapper, StepOutcome};
pub use plan::{BootstrapConfig, BootstrapPlan, BootstrapStep, StepCommand};
#[cfg(test)]
pub use runner::MockCommandRunner;
pub use runner::{CommandRunner, CommandStatus, ProcessRunner};
