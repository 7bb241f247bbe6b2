//! Freshness tracking for cache keys
//!
//! Each key records the logical timestamp of its last write. A key is valid
//! when it has been written and every dependency was last written strictly
//! before it.
//!
//! # Key States
//!
//! | State | Timestamp | Reached by |
//! |-------|-----------|------------|
//! | Unset | `UNSET_KEY_TIME` | never written |
//! | Valid | `>= MIN_VALID_KEY` | `Update` |
//! | Invalidated | `UNSET_KEY_TIME` | `Invalidate` |
//!
//! Unset and invalidated keys are indistinguishable to readers.

pub mod action;
pub mod clock;
pub mod reducer;
pub mod state;
pub mod tracker;

pub use action::{Action, INVALIDATE, UPDATE};
pub use clock::{ManualTimeSource, MonotonicClock, SystemTimeSource, TimeSource};
pub use reducer::Reducer;
pub use state::{KeyState, Timestamp, MIN_VALID_KEY, UNSET_KEY_TIME};
pub use tracker::KeyTracker;
