//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// corefile-tool - migrate CoreDNS Corefiles between releases
///
/// Rewrites a Corefile so it stays valid when CoreDNS is upgraded or
/// downgraded, and reports configuration that changes status on the way.
#[derive(Parser, Debug)]
#[command(
    name = "corefile-tool",
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "COREFILE_TOOL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the config file's, then human)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upgrade a Corefile to a later CoreDNS release
    Migrate(MigrateArgs),

    /// Downgrade a Corefile to an earlier CoreDNS release
    Downgrade(RangeArgs),

    /// Check whether a Corefile is a release's default configuration
    Default(DefaultArgs),

    /// List deprecated, ignored, removed and newly defaulted configuration
    Deprecated(RangeArgs),

    /// List plugins and options not recognized at the target release
    Unsupported(RangeArgs),

    /// Print every CoreDNS version the tool knows
    Validversions,

    /// Check whether a CoreDNS image digest belongs to a known release
    Released(ReleasedArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Version range and input shared by the walking commands
#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// CoreDNS version the Corefile is written for
    #[arg(long, value_name = "VERSION")]
    pub from: String,

    /// CoreDNS version to migrate to
    #[arg(long, value_name = "VERSION")]
    pub to: String,

    /// Path to the Corefile, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub corefile: PathBuf,
}

/// Arguments for the migrate command
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Collect notices for the changes applied (defaults to the config value)
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub deprecations: Option<bool>,
}

/// Arguments for the default command
#[derive(Args, Debug, Clone)]
pub struct DefaultArgs {
    /// Kubernetes release to compare against; every CoreDNS release when omitted
    #[arg(long = "k8s-version", alias = "k8s_version", value_name = "VERSION")]
    pub k8s_version: Option<String>,

    /// Path to the Corefile, or `-` for stdin
    #[arg(long, value_name = "PATH")]
    pub corefile: PathBuf,
}

/// Arguments for the released command
#[derive(Args, Debug, Clone)]
pub struct ReleasedArgs {
    /// Image digest (sha256 hex, without the `sha256:` prefix)
    #[arg(long = "docker-image-sha", alias = "dockerImageSHA", value_name = "SHA")]
    pub docker_image_sha: String,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Plain text
    Human,
    /// Compact JSON
    Json,
    /// YAML
    Yaml,
    /// Indented JSON
    JsonPretty,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Human
    }
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Verbosity level, zero when quiet
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Whether to color diagnostics
    ///
    /// `--no-color` and `NO_COLOR` always win; otherwise the config
    /// preference applies as long as stderr is a terminal.
    pub fn use_color(&self, configured: bool) -> bool {
        if self.no_color || std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        configured && std::io::stderr().is_terminal()
    }
}
