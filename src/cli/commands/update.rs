//! Update command - mark keys as freshly written

use crate::cli::args::UpdateArgs;
use crate::cli::commands::open_tracker;
use crate::config::Config;
use crate::error::KeystampResult;
use crate::journal::Journal;
use tracing::info;

/// Execute the update command
pub async fn execute(args: UpdateArgs, config: &Config) -> KeystampResult<()> {
    let tracker = open_tracker(config)?;
    let journal = Journal::new(config);

    for key in &args.keys {
        let action = tracker.update_key(key.as_str())?;
        tracker.dispatch(action.clone())?;

        let time = tracker.key_time(key)?;
        journal.record(&action, time).await;

        info!("Updated {} at {}", key, time);
        println!("{}\t{}", key, time);
    }

    Ok(())
}
