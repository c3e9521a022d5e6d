//! Backend-independent store state and the change set application rules.
//!
//! Both backends keep a [`StoreState`]; they differ only in where it lives and
//! how a mutation is published.

use std::collections::{BTreeMap, HashSet};

use cfgtext_resolve::ChangeSet;
use cfgtext_types::{Item, ItemId, NamespaceId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::model::{AppliedChangeSet, Baseline, NamespaceInfo};

/// One namespace's registry entry and items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRecord {
    pub info: NamespaceInfo,
    pub revision: u64,
    /// Operator of the last applied change set, if it was stamped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    pub items: BTreeMap<ItemId, Item>,
}

/// The complete contents of a store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    next_namespace_id: i64,
    next_item_id: i64,
    namespaces: BTreeMap<NamespaceId, NamespaceRecord>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_namespace_id: 1,
            next_item_id: 1,
            namespaces: BTreeMap::new(),
        }
    }
}

impl StoreState {
    pub fn create_namespace(
        &mut self,
        app_id: &str,
        cluster: &str,
        name: &str,
    ) -> StoreResult<NamespaceInfo> {
        if self.find_namespace(app_id, cluster, name).is_some() {
            return Err(StoreError::NamespaceExists {
                app_id: app_id.to_string(),
                cluster: cluster.to_string(),
                name: name.to_string(),
            });
        }

        let id = NamespaceId::new(self.next_namespace_id);
        self.next_namespace_id += 1;
        let info = NamespaceInfo {
            id,
            app_id: app_id.to_string(),
            cluster: cluster.to_string(),
            name: name.to_string(),
        };
        self.namespaces.insert(
            id,
            NamespaceRecord {
                info: info.clone(),
                revision: 0,
                last_modified_by: None,
                items: BTreeMap::new(),
            },
        );
        debug!(namespace = %id, coordinates = %info.coordinates(), "namespace created");
        Ok(info)
    }

    pub fn find_namespace(&self, app_id: &str, cluster: &str, name: &str) -> Option<NamespaceInfo> {
        self.namespaces
            .values()
            .find(|r| r.info.matches(app_id, cluster, name))
            .map(|r| r.info.clone())
    }

    pub fn namespace(&self, id: NamespaceId) -> Option<&NamespaceRecord> {
        self.namespaces.get(&id)
    }

    pub fn namespaces(&self) -> Vec<NamespaceInfo> {
        self.namespaces.values().map(|r| r.info.clone()).collect()
    }

    pub fn snapshot(&self, namespace: NamespaceId) -> StoreResult<Baseline> {
        let record = self
            .namespaces
            .get(&namespace)
            .ok_or(StoreError::NamespaceNotFound(namespace))?;

        let mut items: Vec<Item> = record.items.values().cloned().collect();
        items.sort_by_key(|item| (item.line_num, item.id));
        Ok(Baseline {
            namespace,
            revision: record.revision,
            items,
        })
    }

    /// Apply a change set, or leave the state untouched on any error.
    pub fn apply(
        &mut self,
        namespace: NamespaceId,
        expected_revision: u64,
        changes: &ChangeSet,
    ) -> StoreResult<AppliedChangeSet> {
        let record = self
            .namespaces
            .get(&namespace)
            .ok_or(StoreError::NamespaceNotFound(namespace))?;

        if record.revision != expected_revision {
            return Err(StoreError::StaleBaseline {
                namespace,
                expected: expected_revision,
                actual: record.revision,
            });
        }
        check_change_set(record, changes)?;

        // Every check passed; from here on nothing can fail.
        let mut next_item_id = self.next_item_id;
        let record = self
            .namespaces
            .get_mut(&namespace)
            .ok_or(StoreError::NamespaceNotFound(namespace))?;

        for item in changes.deletes() {
            record.items.remove(&item.id);
        }
        for item in changes.updates() {
            record.items.insert(item.id, item.clone());
        }
        let mut created = Vec::with_capacity(changes.creates().len());
        for item in changes.creates() {
            let id = ItemId::new(next_item_id);
            next_item_id += 1;
            let item = item.clone().with_id(id);
            record.items.insert(id, item.clone());
            created.push(item);
        }

        record.revision += 1;
        if let Some(operator) = changes.modified_by() {
            record.last_modified_by = Some(operator.to_string());
        }
        let revision = record.revision;
        self.next_item_id = next_item_id;

        debug!(
            namespace = %namespace,
            revision,
            creates = created.len(),
            updates = changes.updates().len(),
            deletes = changes.deletes().len(),
            "change set applied"
        );

        Ok(AppliedChangeSet {
            namespace,
            revision,
            created,
            updated: changes.updates().len(),
            deleted: changes.deletes().len(),
        })
    }
}

/// Structural checks that must all pass before any write.
fn check_change_set(record: &NamespaceRecord, changes: &ChangeSet) -> StoreResult<()> {
    let namespace = record.info.id;
    let foreign = changes
        .creates()
        .iter()
        .chain(changes.updates())
        .chain(changes.deletes())
        .find(|item| item.namespace_id != namespace);
    if let Some(foreign) = foreign {
        return Err(StoreError::InvalidChangeSet(format!(
            "item at line {} belongs to {}, not {}",
            foreign.line_num, foreign.namespace_id, namespace
        )));
    }

    if let Some(item) = changes.creates().iter().find(|item| item.is_persisted()) {
        return Err(StoreError::InvalidChangeSet(format!(
            "create at line {} already carries id {}",
            item.line_num, item.id
        )));
    }

    let mut touched = HashSet::new();
    for item in changes.updates().iter().chain(changes.deletes()) {
        if !record.items.contains_key(&item.id) {
            return Err(StoreError::ItemNotFound {
                namespace,
                id: item.id,
            });
        }
        if !touched.insert(item.id) {
            return Err(StoreError::InvalidChangeSet(format!(
                "item {} is scheduled more than once",
                item.id
            )));
        }
    }
    Ok(())
}
