//! CLI parse: clap types for Strata. No behavior; definitions only.

use crate::config::StoreKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Strata CLI - hierarchical configuration from AWS Parameter Store and Secrets Manager
#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Resolve layered application configuration from remote stores")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/config.toml is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the contexts that would be queried, most specific first
    Contexts {
        #[command(flatten)]
        target: TargetArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve configuration and print the effective properties
    Locate {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Abort on the first context that cannot be fetched
        #[arg(long)]
        fail_fast: bool,

        /// Fail if any context was skipped
        #[arg(long)]
        require_complete: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate loaded locator settings
    Validate,
}

/// Which store and which application to resolve for.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Store to resolve from
    #[arg(long, value_enum, default_value = "parameter-store")]
    pub store: StoreArg,

    /// Application name (defaults to the application.name property)
    #[arg(long)]
    pub name: Option<String>,

    /// Active profile; repeat in activation order
    #[arg(long = "profile")]
    pub profiles: Vec<String>,

    /// Environment property as key=value; repeatable
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,
}

/// Where store data comes from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON snapshot file to resolve against
    #[arg(long, conflicts_with = "aws")]
    pub snapshot: Option<PathBuf>,

    /// Resolve against live AWS (requires the `aws` feature)
    #[arg(long)]
    pub aws: bool,

    /// AWS region override
    #[arg(long)]
    pub region: Option<String>,

    /// Endpoint URL override (e.g. a local emulator)
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    ParameterStore,
    SecretsManager,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::ParameterStore => StoreKind::ParameterStore,
            StoreArg::SecretsManager => StoreKind::SecretsManager,
        }
    }
}
