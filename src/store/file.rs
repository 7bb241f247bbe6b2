//! JSON file state container
//!
//! The key mapping lives under a namespace inside a JSON object, e.g.
//!
//! ```json
//! { "__cache": { "build/app": 1718000000123, "deps/lock": 1718000000001 } }
//! ```
//!
//! Other top-level entries in the document are left untouched, so several
//! tools can share one state file.

use crate::error::{KeystampError, KeystampResult};
use crate::keys::{Action, KeyState, Reducer};
use crate::store::{StateContainer, DEFAULT_NAMESPACE};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Container persisting key state to a JSON document
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    namespace: String,
    reducer: Reducer,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path` using the default namespace
    pub fn open(path: impl Into<PathBuf>, reducer: Reducer) -> KeystampResult<Self> {
        Self::open_namespace(path, DEFAULT_NAMESPACE, reducer)
    }

    /// Open the store at `path`, keeping keys under `namespace`
    ///
    /// A missing file is treated as empty state. The reducer's clock is
    /// advanced past every persisted timestamp.
    pub fn open_namespace(
        path: impl Into<PathBuf>,
        namespace: impl Into<String>,
        reducer: Reducer,
    ) -> KeystampResult<Self> {
        let store = Self {
            path: path.into(),
            namespace: namespace.into(),
            reducer,
            write_lock: Mutex::new(()),
        };

        let state = store.load()?;
        store.reducer.clock().observe(state.latest_timestamp());
        debug!(
            "Opened state file {} ({} keys)",
            store.path.display(),
            state.len()
        );

        Ok(store)
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Namespace the key mapping is stored under
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn load(&self) -> KeystampResult<KeyState> {
        let document = self.read_document()?;
        self.extract(&document)
    }

    fn read_document(&self) -> KeystampResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            KeystampError::io(format!("reading state file {}", self.path.display()), e)
        })?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(self.corrupt("top level is not a JSON object")),
            Err(e) => Err(self.corrupt(e.to_string())),
        }
    }

    fn extract(&self, document: &Map<String, Value>) -> KeystampResult<KeyState> {
        match document.get(&self.namespace) {
            None => Ok(KeyState::default()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                self.corrupt(format!("namespace {}: {}", self.namespace, e))
            }),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> KeystampResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                KeystampError::io(format!("creating state directory {}", parent.display()), e)
            })?;
        }

        let content = serde_json::to_string_pretty(document)?;

        // Write then rename so readers never see a half-written document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .map_err(|e| KeystampError::io(format!("writing state file {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            KeystampError::io(format!("replacing state file {}", self.path.display()), e)
        })?;

        Ok(())
    }

    fn corrupt(&self, reason: impl Into<String>) -> KeystampError {
        KeystampError::StateCorrupt {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl StateContainer for FileStore {
    fn current_state(&self) -> KeystampResult<Arc<KeyState>> {
        Ok(Arc::new(self.load()?))
    }

    fn dispatch(&self, action: Action) -> KeystampResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| KeystampError::poisoned("file store"))?;

        let mut document = self.read_document()?;
        let state = Arc::new(self.extract(&document)?);

        // Another process may have written newer stamps since we opened
        self.reducer.clock().observe(state.latest_timestamp());

        let next = self.reducer.reduce(&state, &action);
        if Arc::ptr_eq(&state, &next) {
            debug!("Ignored {}", action);
            return Ok(());
        }

        document.insert(self.namespace.clone(), serde_json::to_value(&*next)?);
        self.write_document(&document)?;

        debug!("Applied {} to {}", action, self.path.display());
        Ok(())
    }
}
