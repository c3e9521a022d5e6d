use cfgtext_resolve::ChangeSet;
use cfgtext_types::NamespaceId;

use crate::error::StoreResult;
use crate::model::{AppliedChangeSet, Baseline, NamespaceInfo};

/// Persistent item storage and namespace registry.
///
/// All implementations must satisfy these invariants:
/// - `apply` is all-or-nothing. If any check fails, nothing is written.
/// - `apply` succeeds only against the revision the caller's baseline was
///   read at. This serializes concurrent edits of one namespace: of two
///   writers holding the same baseline, the second one fails with
///   `StaleBaseline`.
/// - Created items get fresh ids that are never reused.
/// - Snapshots list items ordered by line number.
pub trait ItemStore: Send + Sync {
    /// Register a namespace under `app+cluster+name` coordinates.
    ///
    /// Fails with `NamespaceExists` if the coordinates are taken.
    fn create_namespace(&self, app_id: &str, cluster: &str, name: &str)
        -> StoreResult<NamespaceInfo>;

    /// Look up a namespace by its coordinates.
    fn find_namespace(
        &self,
        app_id: &str,
        cluster: &str,
        name: &str,
    ) -> StoreResult<Option<NamespaceInfo>>;

    /// Look up a namespace by id.
    fn namespace(&self, id: NamespaceId) -> StoreResult<Option<NamespaceInfo>>;

    /// All registered namespaces, ordered by id.
    fn namespaces(&self) -> StoreResult<Vec<NamespaceInfo>>;

    /// Read the current items and revision of a namespace.
    fn snapshot(&self, namespace: NamespaceId) -> StoreResult<Baseline>;

    /// Apply a change set computed against the baseline read at
    /// `expected_revision`.
    fn apply(
        &self,
        namespace: NamespaceId,
        expected_revision: u64,
        changes: &ChangeSet,
    ) -> StoreResult<AppliedChangeSet>;
}
