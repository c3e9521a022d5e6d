use cfgtext_types::{Item, NamespaceId};
use serde::{Deserialize, Serialize};

/// A registered namespace and the coordinates it was registered under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub id: NamespaceId,
    pub app_id: String,
    pub cluster: String,
    pub name: String,
}

impl NamespaceInfo {
    /// `app+cluster+name`, the form used in import file names.
    pub fn coordinates(&self) -> String {
        format!("{}+{}+{}", self.app_id, self.cluster, self.name)
    }

    pub fn matches(&self, app_id: &str, cluster: &str, name: &str) -> bool {
        self.app_id == app_id && self.cluster == cluster && self.name == name
    }
}

/// Snapshot of one namespace's items, taken at a revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Baseline {
    pub namespace: NamespaceId,
    /// Revision the snapshot was read at. Pass it back to `apply`.
    pub revision: u64,
    /// Items ordered by line number.
    pub items: Vec<Item>,
}

/// Outcome of applying a change set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedChangeSet {
    pub namespace: NamespaceId,
    /// Revision after the change set was applied.
    pub revision: u64,
    /// Created items, with their freshly assigned ids.
    pub created: Vec<Item>,
    pub updated: usize,
    pub deleted: usize,
}
