//! In-process state container

use crate::error::{KeystampError, KeystampResult};
use crate::keys::{Action, KeyState, Reducer};
use crate::store::StateContainer;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Container holding the current key state in memory
#[derive(Debug)]
pub struct MemoryStore {
    reducer: Reducer,
    state: RwLock<Arc<KeyState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new(reducer: Reducer) -> Self {
        Self::with_state(reducer, KeyState::default())
    }

    /// Create a store seeded with `state`
    ///
    /// The reducer's clock is advanced past every seeded timestamp.
    pub fn with_state(reducer: Reducer, state: KeyState) -> Self {
        reducer.clock().observe(state.latest_timestamp());
        Self {
            reducer,
            state: RwLock::new(Arc::new(state)),
        }
    }
}

impl StateContainer for MemoryStore {
    fn current_state(&self) -> KeystampResult<Arc<KeyState>> {
        let state = self
            .state
            .read()
            .map_err(|_| KeystampError::poisoned("memory store"))?;
        Ok(Arc::clone(&*state))
    }

    fn dispatch(&self, action: Action) -> KeystampResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| KeystampError::poisoned("memory store"))?;

        let next = self.reducer.reduce(&*state, &action);
        if Arc::ptr_eq(&*state, &next) {
            debug!("Ignored {}", action);
            return Ok(());
        }

        debug!("Applied {}", action);
        *state = next;
        Ok(())
    }
}
