//! CLI command implementations

pub mod config;
pub mod invalidate;
pub mod show;
pub mod time;
pub mod update;
pub mod valid;

pub use config::execute as config;
pub use invalidate::execute as invalidate;
pub use show::execute as show;
pub use time::execute as time;
pub use update::execute as update;
pub use valid::execute as valid;

use crate::config::{Config, ConfigManager};
use crate::error::KeystampResult;
use crate::keys::KeyTracker;
use crate::store::FileStore;
use tracing::debug;

/// Build a tracker over the configured state file
pub(crate) fn open_tracker(config: &Config) -> KeystampResult<KeyTracker> {
    let path = ConfigManager::state_path(config);
    debug!("Using state file {}", path.display());

    let mut tracker = KeyTracker::new();
    let store = FileStore::open_namespace(path, &config.store.namespace, tracker.reducer())?;
    tracker.register(store);
    Ok(tracker)
}
