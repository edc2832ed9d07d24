//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered project skeleton generator",
    long_about = "Strata generates a hexagonal / clean-architecture directory \
                  skeleton with a documented package marker in every package, \
                  and can bootstrap a poetry + git + commitizen environment around it.",
    after_help = "EXAMPLES:\n\
        \x20 strata scaffold shop\n\
        \x20 strata scaffold shop --output ~/code --dry-run\n\
        \x20 strata bootstrap my_service --yes\n\
        \x20 strata layout --format json\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the layered skeleton for a project.
    #[command(
        visible_alias = "new",
        about = "Generate a project skeleton",
        after_help = "EXAMPLES:\n\
            \x20 strata scaffold shop\n\
            \x20 strata scaffold shop -o /tmp/out --marker README.md\n\
            \x20 strata scaffold shop --dry-run --output-format json"
    )]
    Scaffold(ScaffoldArgs),

    /// Set up a poetry project with git and commitizen, then scaffold it.
    #[command(
        visible_alias = "env",
        about = "Bootstrap a development environment and scaffold it",
        after_help = "EXAMPLES:\n\
            \x20 strata bootstrap\n\
            \x20 strata bootstrap my_service -o ~/code --yes\n\
            \x20 strata bootstrap my_service --dry-run"
    )]
    Bootstrap(BootstrapArgs),

    /// Show the built-in layout.
    #[command(
        visible_alias = "ls",
        about = "Show the built-in layout",
        after_help = "EXAMPLES:\n\
            \x20 strata layout\n\
            \x20 strata layout --format list\n\
            \x20 strata layout --format csv > layout.csv"
    )]
    Layout(LayoutArgs),

    /// Initialise a Strata configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 strata init           # user config directory\n\
            \x20 strata init --local   # .strata.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Strata configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config get defaults.output_dir\n\
            \x20 strata config set defaults.marker_file README.md\n\
            \x20 strata config list"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Whether the command may create the `--config` file instead of reading it.
    pub fn writes_config(&self) -> bool {
        matches!(self, Commands::Config(ConfigCommands::Set { .. }))
    }
}

// ── scaffold ──────────────────────────────────────────────────────────────────

/// Arguments for `strata scaffold`.
#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    /// Project name: a single directory name, created under the output root.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Output root.  The project lands in `DIR/NAME`, its tests in
    /// `DIR/tests/NAME`.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root (default: defaults.output_dir)"
    )]
    pub output: Option<PathBuf>,

    /// File name of the per-package marker.
    #[arg(
        long = "marker",
        value_name = "FILE",
        help = "Marker file name (default: defaults.marker_file)"
    )]
    pub marker: Option<String>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── bootstrap ─────────────────────────────────────────────────────────────────

/// Arguments for `strata bootstrap`.
#[derive(Debug, Args)]
pub struct BootstrapArgs {
    /// Project name.
    #[arg(value_name = "NAME", default_value = "my_project", help = "Project name")]
    pub name: String,

    /// Directory `poetry new` runs in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output root (default: defaults.output_dir)"
    )]
    pub output: Option<PathBuf>,

    /// File name of the per-package marker.
    #[arg(long = "marker", value_name = "FILE", help = "Marker file name")]
    pub marker: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and run immediately")]
    pub yes: bool,

    /// Print the command plan and exit.
    #[arg(long = "dry-run", help = "Print the steps without running them")]
    pub dry_run: bool,
}

// ── layout ────────────────────────────────────────────────────────────────────

/// Arguments for `strata layout`.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: LayoutFormat,
}

/// Output format for the `layout` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutFormat {
    /// Indented tree with descriptions.
    Table,
    /// One `section:path` per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.strata.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.output_dir`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.  Lists are comma separated.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
