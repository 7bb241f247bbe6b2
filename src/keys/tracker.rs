//! Key tracker: the public entry point for freshness tracking
//!
//! Owns the monotonic clock and a handle to the registered state container.
//! Every operation fails with `UninitializedStore` until a container has been
//! registered.

use crate::error::{KeystampError, KeystampResult};
use crate::keys::action::Action;
use crate::keys::clock::MonotonicClock;
use crate::keys::reducer::Reducer;
use crate::keys::state::{KeyState, Timestamp};
use crate::store::{MemoryStore, StateContainer};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Freshness tracker over an injected state container
pub struct KeyTracker {
    clock: Arc<MonotonicClock>,
    store: Option<Box<dyn StateContainer>>,
}

impl KeyTracker {
    /// Create a tracker with a system clock and no container
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    /// Create a tracker issuing timestamps from `clock`
    pub fn with_clock(clock: Arc<MonotonicClock>) -> Self {
        Self { clock, store: None }
    }

    /// Create a tracker backed by a fresh `MemoryStore`
    pub fn in_memory() -> Self {
        let mut tracker = Self::new();
        let store = MemoryStore::new(tracker.reducer());
        tracker.register(store);
        tracker
    }

    /// The tracker's clock
    pub fn clock(&self) -> &Arc<MonotonicClock> {
        &self.clock
    }

    /// Reducer sharing this tracker's clock, for building containers
    pub fn reducer(&self) -> Reducer {
        Reducer::new(Arc::clone(&self.clock))
    }

    /// Register the container all operations go through, replacing any previous one
    pub fn register(&mut self, store: impl StateContainer + 'static) {
        if self.store.is_some() {
            debug!("Replacing registered state container");
        }
        self.store = Some(Box::new(store));
    }

    /// Remove the registered container, returning it
    pub fn unregister(&mut self) -> Option<Box<dyn StateContainer>> {
        self.store.take()
    }

    /// Whether a container is registered
    pub fn is_registered(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> KeystampResult<&dyn StateContainer> {
        self.store.as_deref().ok_or(KeystampError::UninitializedStore)
    }

    /// Build an action marking `key` as freshly written
    pub fn update_key(&self, key: impl Into<String>) -> KeystampResult<Action> {
        self.store()?;
        Ok(Action::update(key))
    }

    /// Build an action expiring `key`
    pub fn invalidate_key(&self, key: impl Into<String>) -> KeystampResult<Action> {
        self.store()?;
        Ok(Action::invalidate(key))
    }

    /// Apply `action` through the registered container
    pub fn dispatch(&self, action: Action) -> KeystampResult<()> {
        self.store()?.dispatch(action)
    }

    /// Snapshot of the container's current mapping
    pub fn current_state(&self) -> KeystampResult<Arc<KeyState>> {
        self.store()?.current_state()
    }

    /// Timestamp of the last valid write to `key`
    ///
    /// Unset and invalidated keys both report `UNSET_KEY_TIME`.
    pub fn key_time(&self, key: &str) -> KeystampResult<Timestamp> {
        Ok(self.current_state()?.key_time(key))
    }

    /// Latest write among `keys`; `UNSET_KEY_TIME` when empty
    pub fn max_key_time<K: AsRef<str>>(&self, keys: &[K]) -> KeystampResult<Timestamp> {
        Ok(self.current_state()?.max_key_time(keys))
    }

    /// Earliest write among `keys`; `UNSET_KEY_TIME` when empty
    pub fn min_key_time<K: AsRef<str>>(&self, keys: &[K]) -> KeystampResult<Timestamp> {
        Ok(self.current_state()?.min_key_time(keys))
    }

    /// Whether `key` was written validly and after all of `dependencies`
    ///
    /// Evaluated against a single snapshot of the container.
    pub fn key_is_valid<K: AsRef<str>>(
        &self,
        key: &str,
        dependencies: &[K],
    ) -> KeystampResult<bool> {
        Ok(self.current_state()?.key_is_valid(key, dependencies))
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTracker")
            .field("clock", &self.clock)
            .field("registered", &self.is_registered())
            .finish()
    }
}
