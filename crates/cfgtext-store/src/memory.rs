use std::sync::RwLock;

use cfgtext_resolve::ChangeSet;
use cfgtext_types::NamespaceId;

use crate::error::StoreResult;
use crate::model::{AppliedChangeSet, Baseline, NamespaceInfo};
use crate::state::StoreState;
use crate::traits::ItemStore;

/// In-memory item store.
///
/// Intended for tests and embedding. The whole state sits behind one
/// `RwLock`; `apply` validates and writes under the write lock, so a change
/// set is never observed half-applied.
pub struct InMemoryItemStore {
    state: RwLock<StoreState>,
}

impl InMemoryItemStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Number of items across all namespaces.
    pub fn item_count(&self) -> usize {
        let state = self.state.read().expect("lock poisoned");
        state
            .namespaces()
            .iter()
            .filter_map(|info| state.namespace(info.id))
            .map(|record| record.items.len())
            .sum()
    }

    /// Operator recorded by the last stamped change set of a namespace.
    pub fn last_modified_by(&self, namespace: NamespaceId) -> Option<String> {
        let state = self.state.read().expect("lock poisoned");
        state
            .namespace(namespace)
            .and_then(|record| record.last_modified_by.clone())
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for InMemoryItemStore {
    fn create_namespace(&self, app_id: &str, cluster: &str, name: &str) -> StoreResult<NamespaceInfo> {
        let mut state = self.state.write().expect("lock poisoned");
        state.create_namespace(app_id, cluster, name)
    }

    fn find_namespace(
        &self,
        app_id: &str,
        cluster: &str,
        name: &str,
    ) -> StoreResult<Option<NamespaceInfo>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.find_namespace(app_id, cluster, name))
    }

    fn namespace(&self, id: NamespaceId) -> StoreResult<Option<NamespaceInfo>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.namespace(id).map(|record| record.info.clone()))
    }

    fn namespaces(&self) -> StoreResult<Vec<NamespaceInfo>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.namespaces())
    }

    fn snapshot(&self, namespace: NamespaceId) -> StoreResult<Baseline> {
        let state = self.state.read().expect("lock poisoned");
        state.snapshot(namespace)
    }

    fn apply(
        &self,
        namespace: NamespaceId,
        expected_revision: u64,
        changes: &ChangeSet,
    ) -> StoreResult<AppliedChangeSet> {
        let mut state = self.state.write().expect("lock poisoned");
        state.apply(namespace, expected_revision, changes)
    }
}

impl std::fmt::Debug for InMemoryItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryItemStore")
            .field("item_count", &self.item_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::error::StoreError;
    use cfgtext_resolve::resolve;

    fn store_with_namespace() -> (InMemoryItemStore, NamespaceId) {
        let store = InMemoryItemStore::new();
        let info = store
            .create_namespace("app", "default", "application")
            .unwrap();
        (store, info.id)
    }

    #[test]
    fn registry_lookup() {
        let (store, ns) = store_with_namespace();
        let found = store
            .find_namespace("app", "default", "application")
            .unwrap()
            .expect("should exist");
        assert_eq!(found.id, ns);
        assert!(store.find_namespace("app", "other", "application").unwrap().is_none());
        assert_eq!(store.namespace(ns).unwrap().unwrap().name, "application");
        assert_eq!(store.namespaces().unwrap().len(), 1);
    }

    #[test]
    fn apply_then_snapshot() {
        let (store, ns) = store_with_namespace();
        let changes = resolve(ns, "a=1\nb=2", &[]).unwrap();
        store.apply(ns, 0, &changes).unwrap();

        let baseline = store.snapshot(ns).unwrap();
        assert_eq!(baseline.revision, 1);
        assert_eq!(baseline.items.len(), 2);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn last_modified_by_tracks_stamp() {
        let (store, ns) = store_with_namespace();
        assert!(store.last_modified_by(ns).is_none());
        let changes = resolve(ns, "a=1", &[]).unwrap().with_modified_by("alice");
        store.apply(ns, 0, &changes).unwrap();
        assert_eq!(store.last_modified_by(ns).as_deref(), Some("alice"));
    }

    #[test]
    fn concurrent_edits_of_one_baseline_admit_one_winner() {
        let (store, ns) = store_with_namespace();
        let store = Arc::new(store);
        let base = store.snapshot(ns).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let store = Arc::clone(&store);
                let base = base.clone();
                thread::spawn(move || {
                    let text = format!("writer = {n}");
                    let changes = resolve(ns, &text, &base.items).unwrap();
                    store.apply(ns, base.revision, &changes)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, StoreError::StaleBaseline { .. })));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn debug_shows_item_count() {
        let store = InMemoryItemStore::new();
        assert_eq!(format!("{store:?}"), "InMemoryItemStore { item_count: 0 }");
    }
}
