//! keystamp - freshness tracking for cache keys
//!
//! Assigns strictly increasing logical timestamps to cache key writes and
//! decides whether a cached artifact is still valid given the keys it
//! depends on.
//!
//! ```
//! use keystamp::KeyTracker;
//!
//! let tracker = KeyTracker::in_memory();
//! tracker.dispatch(tracker.update_key("lockfile")?)?;
//! tracker.dispatch(tracker.update_key("build")?)?;
//!
//! assert!(tracker.key_is_valid("build", &["lockfile"])?);
//! assert!(!tracker.key_is_valid("lockfile", &["build"])?);
//! # Ok::<(), keystamp::KeystampError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod journal;
pub mod keys;
pub mod store;

pub use error::{KeystampError, KeystampResult};
pub use keys::{Action, KeyState, KeyTracker, MonotonicClock, Reducer, Timestamp, MIN_VALID_KEY};
pub use store::{FileStore, MemoryStore, StateContainer};
