//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keystamp - freshness tracking for cache keys
///
/// Records a monotonic timestamp every time a cache key is written and
/// reports whether a key is still fresh relative to its dependencies.
#[derive(Parser, Debug)]
#[command(name = "keystamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KEYSTAMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// State file path (overrides store.path)
    #[arg(short, long, global = true, env = "KEYSTAMP_STATE")]
    pub state: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mark keys as freshly written
    Update(UpdateArgs),

    /// Expire keys
    Invalidate(InvalidateArgs),

    /// Print the last write time of a key
    Time(TimeArgs),

    /// Check whether a key is fresh relative to its dependencies
    Valid(ValidArgs),

    /// List all recorded keys
    Show(ShowArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the update command
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Keys to update, in order
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Arguments for the invalidate command
#[derive(Parser, Debug)]
pub struct InvalidateArgs {
    /// Keys to invalidate
    #[arg(required = true)]
    pub keys: Vec<String>,
}

/// Arguments for the time command
#[derive(Parser, Debug)]
pub struct TimeArgs {
    /// Key to look up
    pub key: String,
}

/// Arguments for the valid command
#[derive(Parser, Debug)]
pub struct ValidArgs {
    /// Key to check
    pub key: String,

    /// Dependency keys (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub deps: Vec<String>,

    /// Exit with a failure status when the key is stale
    #[arg(long)]
    pub exit_code: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Output format for listings
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config subcommand (defaults to show)
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
