//! keystamp - cache key freshness tracker
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use keystamp::cli::{Cli, Commands};
use keystamp::config::ConfigManager;
use keystamp::error::KeystampResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, json: bool) {
    // 0 = warn, 1 = info, 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("keystamp=warn"),
        1 => EnvFilter::new("keystamp=info"),
        _ => EnvFilter::new("keystamp=debug"),
    };

    // Logs go to stderr; stdout carries command output
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}

async fn run() -> KeystampResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let mut config = config_manager.load().await?;
    init_logging(cli.verbose, config.general.json_logs());

    // --state / KEYSTAMP_STATE wins over store.path
    if let Some(state) = cli.state {
        debug!("State file overridden: {}", state.display());
        config.store.path = Some(state);
    }

    match cli.command {
        Commands::Update(args) => keystamp::cli::commands::update(args, &config).await,
        Commands::Invalidate(args) => keystamp::cli::commands::invalidate(args, &config).await,
        Commands::Time(args) => keystamp::cli::commands::time(args, &config).await,
        Commands::Valid(args) => keystamp::cli::commands::valid(args, &config).await,
        Commands::Show(args) => keystamp::cli::commands::show(args, &config).await,
        Commands::Config(args) => {
            keystamp::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
