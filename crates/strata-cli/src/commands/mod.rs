//! Command handlers, one module per subcommand.
//!
//! Each `execute` translates parsed arguments into service calls and renders
//! the result through the [`crate::output::OutputManager`].

pub mod bootstrap;
pub mod completions;
pub mod config;
pub mod init;
pub mod layout;
pub mod scaffold;
