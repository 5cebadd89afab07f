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
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Front-end project boilerplate generator",
    long_about = "Stencil asks a few questions about your project (name, version, \
                  author, license, tooling) and writes a ready-to-build front-end \
                  boilerplate: package manifests, gulp build script, lint configs, \
                  CI config and README.",
    after_help = "EXAMPLES:\n\
        \x20 stencil new my-site\n\
        \x20 stencil new my-site --answers answers.toml --skip-install\n\
        \x20 stencil new --profile minimal\n\
        \x20 stencil list --profile ./my-profile.toml\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
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
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 stencil new                      # into the current directory\n\
            \x20 stencil new my-site --dry-run\n\
            \x20 stencil new my-site --answers answers.toml --skip-install\n\
            \x20 stencil new my-site --templates ./my-templates"
    )]
    New(NewArgs),

    /// Show the questions and files of a profile.
    #[command(
        visible_alias = "ls",
        about = "Show a profile's questions and files",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --profile minimal\n\
            \x20 stencil list --profile ./my-profile.toml"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init\n\
            \x20 stencil init --force\n\
            \x20 stencil --config ./stencil.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get defaults.license\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stencil new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Directory to generate into.  Its final segment is the default
    /// project name.
    #[arg(
        value_name = "DIR",
        default_value = ".",
        help = "Directory to generate into (default: current directory)"
    )]
    pub destination: PathBuf,

    /// Built-in profile name or path to a profile TOML file.
    #[arg(
        short = 'p',
        long = "profile",
        value_name = "NAME|FILE",
        help = "Profile to use: frontend, minimal, or a TOML file"
    )]
    pub profile: Option<String>,

    /// Answer questions from a TOML file instead of prompting.
    #[arg(
        short = 'a',
        long = "answers",
        value_name = "FILE",
        help = "Read answers from a TOML file (non-interactive)"
    )]
    pub answers: Option<PathBuf>,

    /// Do not run `npm install` / `bower install` afterwards.
    #[arg(long = "skip-install", help = "Skip the dependency installation hooks")]
    pub skip_install: bool,

    /// Ask the questions and list the files, but write nothing.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Directory whose templates take precedence over the built-in ones.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template directory overriding the built-in templates"
    )]
    pub templates: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Built-in profile name or path to a profile TOML file.
    #[arg(
        short = 'p',
        long = "profile",
        value_name = "NAME|FILE",
        help = "Profile to show"
    )]
    pub profile: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Questions and files with their details.
    Table,
    /// One output path per line.
    List,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.license`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
