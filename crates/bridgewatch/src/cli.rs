//! Clap derive structures for the `bridgewatch` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bridgewatch -- keep an eye on serial bridges and ports
#[derive(Debug, Parser)]
#[command(
    name = "bridgewatch",
    version,
    about = "Watch serial bridges and serial ports served by a bridget service",
    long_about = "Polls a bridget service for available serial bridges and serial ports.\n\n\
        One-shot commands print the current lists; `watch` keeps a live,\n\
        cached view and reports failures as they happen.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// bridget service root (overrides config)
    #[arg(long, short = 'u', env = "BRIDGEWATCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Path to an alternate config file
    #[arg(long, env = "BRIDGEWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in milliseconds (overrides config)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BRIDGEWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List serial bridges
    #[command(alias = "b")]
    Bridges,

    /// List available serial ports
    #[command(alias = "serial-ports", alias = "p")]
    Ports,

    /// Keep a live view and print changes and failures
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll period in milliseconds (overrides config)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Keep refetching every tick instead of stopping once lists are known
    #[arg(long, short = 'f')]
    pub force: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file + environment)
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
