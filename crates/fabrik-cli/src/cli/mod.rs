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
    name    = "fabrik",
    bin_name = "fabrik",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render helm components into namespaced Kubernetes manifests",
    long_about = "Fabrik fetches a component's chart, renders it with `helm template` \
                  inside a container and enforces the component's namespace on \
                  every rendered resource.",
    after_help = "EXAMPLES:\n\
        \x20 fabrik install components/grafana.yaml\n\
        \x20 fabrik generate components/grafana.yaml > grafana.yaml\n\
        \x20 helm template ./chart | fabrik normalize --namespace prod\n\
        \x20 fabrik completions bash > /usr/share/bash-completion/completions/fabrik",
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
    /// Fetch a component's chart source.
    #[command(
        visible_alias = "i",
        about = "Acquire a component's chart source",
        after_help = "EXAMPLES:\n\
            \x20 fabrik install grafana.yaml\n\
            \x20 fabrik install grafana.yaml --root ./build"
    )]
    Install(InstallArgs),

    /// Render a component into manifests.
    #[command(
        visible_alias = "g",
        about = "Render a component into manifests",
        after_help = "EXAMPLES:\n\
            \x20 fabrik generate grafana.yaml\n\
            \x20 fabrik generate grafana.yaml --output manifests/grafana.yaml\n\
            \x20 fabrik generate grafana.yaml --skip-install"
    )]
    Generate(GenerateArgs),

    /// Force a namespace onto a manifest stream.
    #[command(
        about = "Inject a namespace into every manifest of a stream",
        after_help = "EXAMPLES:\n\
            \x20 fabrik normalize --namespace prod rendered.yaml\n\
            \x20 helm template ./chart | fabrik normalize -n prod"
    )]
    Normalize(NormalizeArgs),

    /// Initialise a Fabrik configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fabrik init          # default location\n\
            \x20 fabrik init --force  # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fabrik completions bash > ~/.local/share/bash-completion/completions/fabrik\n\
            \x20 fabrik completions zsh  > ~/.zfunc/_fabrik\n\
            \x20 fabrik completions fish > ~/.config/fish/completions/fabrik.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Fabrik configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fabrik config get helm.image\n\
            \x20 fabrik config list\n\
            \x20 fabrik config path"
    )]
    Config(ConfigCommands),
}

// ── install / generate ────────────────────────────────────────────────────────

/// Arguments for `fabrik install`.
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Component descriptor (YAML).
    #[arg(value_name = "DESCRIPTOR", help = "Component descriptor file")]
    pub descriptor: PathBuf,

    /// Directory the component is materialized under.
    #[arg(
        long = "root",
        value_name = "DIR",
        help = "Physical root (default: the descriptor's directory)"
    )]
    pub root: Option<PathBuf>,
}

/// Arguments for `fabrik generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Component descriptor (YAML).
    #[arg(value_name = "DESCRIPTOR", help = "Component descriptor file")]
    pub descriptor: PathBuf,

    /// Directory the component is materialized under.
    #[arg(
        long = "root",
        value_name = "DIR",
        help = "Physical root (default: the descriptor's directory)"
    )]
    pub root: Option<PathBuf>,

    /// Write manifests to a file instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write manifests to FILE instead of stdout"
    )]
    pub output: Option<PathBuf>,

    /// Render from a previously acquired source.
    #[arg(long = "skip-install", help = "Reuse the already acquired source")]
    pub skip_install: bool,
}

// ── normalize ─────────────────────────────────────────────────────────────────

/// Arguments for `fabrik normalize`.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Namespace to set on every resource.
    #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
    pub namespace: String,

    /// Manifest stream to read; stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fabrik init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fabrik completions`.
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

/// Subcommands for `fabrik config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `helm.image`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
