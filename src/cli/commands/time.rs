//! Time command - print a key's last write time

use crate::cli::args::TimeArgs;
use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::error::KeystampResult;

/// Execute the time command
pub async fn execute(args: TimeArgs, config: &Config) -> KeystampResult<()> {
    let tracker = open_tracker(config)?;
    println!("{}", tracker.key_time(&args.key)?);
    Ok(())
}
