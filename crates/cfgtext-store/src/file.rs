use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cfgtext_resolve::ChangeSet;
use cfgtext_types::NamespaceId;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::{AppliedChangeSet, Baseline, NamespaceInfo};
use crate::state::StoreState;
use crate::traits::ItemStore;

/// Item store backed by a single JSON document.
///
/// Every mutation reads the document, applies the change in memory, writes
/// the result to a temporary file in the same directory, and renames it over
/// the original. A crash leaves either the old or the new document, never a
/// mix. A process-local mutex serializes access; separate processes sharing
/// one file are not coordinated beyond the revision check.
pub struct JsonFileItemStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileItemStore {
    /// Open a store at `path`. The file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<StoreState> {
        if !self.path.exists() {
            return Ok(StoreState::default());
        }
        let data = fs::read(&self.path)?;
        serde_json::from_slice(&data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn persist(&self, state: &StoreState) -> StoreResult<()> {
        let data = serde_json::to_vec_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = data.len(), "store persisted");
        Ok(())
    }

    /// Run `f` on a copy of the state and persist the copy only if `f`
    /// succeeds.
    fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.guard.lock().expect("lock poisoned");
        let mut state = self.load()?;
        let out = f(&mut state)?;
        self.persist(&state)?;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.guard.lock().expect("lock poisoned");
        let state = self.load()?;
        f(&state)
    }
}

impl ItemStore for JsonFileItemStore {
    fn create_namespace(&self, app_id: &str, cluster: &str, name: &str) -> StoreResult<NamespaceInfo> {
        self.mutate(|state| state.create_namespace(app_id, cluster, name))
    }

    fn find_namespace(
        &self,
        app_id: &str,
        cluster: &str,
        name: &str,
    ) -> StoreResult<Option<NamespaceInfo>> {
        self.read(|state| Ok(state.find_namespace(app_id, cluster, name)))
    }

    fn namespace(&self, id: NamespaceId) -> StoreResult<Option<NamespaceInfo>> {
        self.read(|state| Ok(state.namespace(id).map(|record| record.info.clone())))
    }

    fn namespaces(&self) -> StoreResult<Vec<NamespaceInfo>> {
        self.read(|state| Ok(state.namespaces()))
    }

    fn snapshot(&self, namespace: NamespaceId) -> StoreResult<Baseline> {
        self.read(|state| state.snapshot(namespace))
    }

    fn apply(
        &self,
        namespace: NamespaceId,
        expected_revision: u64,
        changes: &ChangeSet,
    ) -> StoreResult<AppliedChangeSet> {
        self.mutate(|state| state.apply(namespace, expected_revision, changes))
    }
}

impl std::fmt::Debug for JsonFileItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileItemStore")
            .field("path", &self.path)
            .finish()
    }
}
