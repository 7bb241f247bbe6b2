//! Invalidate command - expire keys

use crate::cli::args::InvalidateArgs;
use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::error::KeystampResult;
use crate::journal::Journal;
use console::style;
use tracing::info;

/// Execute the invalidate command
pub async fn execute(args: InvalidateArgs, config: &Config) -> KeystampResult<()> {
    let tracker = open_tracker(config)?;
    let journal = Journal::new(config);

    for key in &args.keys {
        let action = tracker.invalidate_key(key.as_str())?;
        tracker.dispatch(action.clone())?;
        journal.record(&action, tracker.key_time(key)?).await;

        info!("Invalidated {}", key);
        println!("{} {}", style("invalidated").yellow(), key);
    }

    Ok(())
}
