//! Monotonic timestamp source
//!
//! Issues logical timestamps that are strictly increasing per clock, even
//! when the underlying wall clock returns the same reading twice or moves
//! backwards.

use crate::keys::state::{Timestamp, UNSET_KEY_TIME};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A real-time reading in milliseconds
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Time source that only moves when told to
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    millis: AtomicI64,
}

impl ManualTimeSource {
    /// Create a source frozen at `millis`
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Move time forward by `millis`
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Set the reading, possibly backwards
    pub fn set(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Strictly increasing timestamp issuer
///
/// Holds the high-water mark: the greatest timestamp ever returned. The mark
/// starts at the unset sentinel, so every issued timestamp is a valid one.
pub struct MonotonicClock {
    source: Arc<dyn TimeSource>,
    high_water: AtomicI64,
}

impl MonotonicClock {
    /// Clock reading the system time
    pub fn new() -> Self {
        Self::with_source(Arc::new(SystemTimeSource))
    }

    /// Clock reading a custom time source
    pub fn with_source(source: Arc<dyn TimeSource>) -> Self {
        Self {
            source,
            high_water: AtomicI64::new(UNSET_KEY_TIME),
        }
    }

    /// Issue the next timestamp
    ///
    /// Returns the wall clock reading if it is ahead of every timestamp issued
    /// so far, otherwise the high-water mark plus one. The mark is advanced
    /// with a CAS loop so concurrent callers never share a value.
    pub fn next_timestamp(&self) -> Timestamp {
        let raw = self.source.now_millis();
        let update = self
            .high_water
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |hw| {
                Some(Self::successor(hw, raw))
            });
        // The closure never declines, so both arms carry the previous mark
        let (Ok(previous) | Err(previous)) = update;
        Self::successor(previous, raw)
    }

    /// Raise the high-water mark to at least `timestamp`
    ///
    /// Used when loading persisted state so that later timestamps stay ahead
    /// of stored ones. Never lowers the mark.
    pub fn observe(&self, timestamp: Timestamp) {
        self.high_water.fetch_max(timestamp, Ordering::SeqCst);
    }

    /// Greatest timestamp issued or observed so far
    pub fn high_water(&self) -> Timestamp {
        self.high_water.load(Ordering::SeqCst)
    }

    fn successor(high_water: Timestamp, raw: i64) -> Timestamp {
        if raw > high_water {
            raw
        } else {
            high_water.saturating_add(1)
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MonotonicClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonotonicClock")
            .field("high_water", &self.high_water())
            .finish_non_exhaustive()
    }
}
