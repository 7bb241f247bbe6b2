//! State transition function for key freshness

use crate::keys::action::Action;
use crate::keys::clock::MonotonicClock;
use crate::keys::state::{KeyState, UNSET_KEY_TIME};
use std::sync::Arc;

/// Applies actions to key state, drawing write timestamps from a shared clock
#[derive(Debug, Clone)]
pub struct Reducer {
    clock: Arc<MonotonicClock>,
}

impl Reducer {
    /// Create a reducer issuing timestamps from `clock`
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self { clock }
    }

    /// Clock this reducer stamps writes with
    pub fn clock(&self) -> &Arc<MonotonicClock> {
        &self.clock
    }

    /// Produce the state that follows `action`
    ///
    /// Foreign actions return the same `Arc`, so callers can detect a no-op
    /// with `Arc::ptr_eq`.
    pub fn reduce(&self, state: &Arc<KeyState>, action: &Action) -> Arc<KeyState> {
        match action {
            Action::Update { key } => {
                Arc::new(state.with_key(key, self.clock.next_timestamp()))
            }
            Action::Invalidate { key } => Arc::new(state.with_key(key, UNSET_KEY_TIME)),
            Action::Foreign { .. } => Arc::clone(state),
        }
    }
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new(Arc::new(MonotonicClock::new()))
    }
}
