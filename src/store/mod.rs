//! State container abstraction
//!
//! The key tracker never owns key state directly. It reads and writes through
//! a container that can hand out the current mapping and apply an action to
//! it:
//! - `MemoryStore`: in-process, lives as long as the container
//! - `FileStore`: JSON document on disk, shared across runs

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::KeystampResult;
use crate::keys::{Action, KeyState};
use std::sync::Arc;

/// Namespace the key mapping is stored under in shared documents
pub const DEFAULT_NAMESPACE: &str = "__cache";

/// Abstract state container interface
///
/// `dispatch` must apply the reducer and persist the result before returning,
/// and must serialize concurrent dispatches so no update is lost. Readers may
/// observe any state produced by a completed dispatch.
pub trait StateContainer: Send + Sync {
    /// Mapping currently stored
    fn current_state(&self) -> KeystampResult<Arc<KeyState>>;

    /// Apply `action` and persist the resulting mapping
    fn dispatch(&self, action: Action) -> KeystampResult<()>;
}

impl<T: StateContainer + ?Sized> StateContainer for Arc<T> {
    fn current_state(&self) -> KeystampResult<Arc<KeyState>> {
        (**self).current_state()
    }

    fn dispatch(&self, action: Action) -> KeystampResult<()> {
        (**self).dispatch(action)
    }
}
