//! Valid command - check a key against its dependencies

use crate::cli::args::ValidArgs;
use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::error::{KeystampError, KeystampResult};
use console::style;
use tracing::debug;

/// Execute the valid command
pub async fn execute(args: ValidArgs, config: &Config) -> KeystampResult<()> {
    let tracker = open_tracker(config)?;

    let valid = tracker.key_is_valid(&args.key, &args.deps)?;
    debug!(
        "{} at {} vs dependencies at {}",
        args.key,
        tracker.key_time(&args.key)?,
        tracker.max_key_time(&args.deps)?
    );

    if valid {
        println!("{}", style("valid").green());
        return Ok(());
    }

    println!("{}", style("stale").red());
    if args.exit_code {
        return Err(KeystampError::User(format!("{} is stale", args.key)));
    }
    Ok(())
}
