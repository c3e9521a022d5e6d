//! The output of reconciliation: ordered creates, updates, and deletes.

use std::fmt;

use cfgtext_types::Item;
use serde::Serialize;

/// Three disjoint, ordered sequences of item operations.
///
/// Creates carry null ids; the store assigns fresh ones. Updates and deletes
/// carry the baseline id they act on. No id appears in more than one
/// sequence. A change set must be applied atomically: applying part of it
/// breaks the one-item-per-line invariant that the next reconciliation relies
/// on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    to_create: Vec<Item>,
    to_update: Vec<Item>,
    to_delete: Vec<Item>,
    /// Operator recorded by whoever applies the change set.
    #[serde(skip_serializing_if = "Option::is_none")]
    modified_by: Option<String>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_create(&mut self, item: Item) {
        self.to_create.push(item);
    }

    pub fn add_update(&mut self, item: Item) {
        self.to_update.push(item);
    }

    pub fn add_delete(&mut self, item: Item) {
        self.to_delete.push(item);
    }

    /// Stamp the operator that will be recorded as the modifier.
    pub fn with_modified_by(mut self, operator: impl Into<String>) -> Self {
        self.modified_by = Some(operator.into());
        self
    }

    pub fn creates(&self) -> &[Item] {
        &self.to_create
    }

    pub fn updates(&self) -> &[Item] {
        &self.to_update
    }

    pub fn deletes(&self) -> &[Item] {
        &self.to_delete
    }

    pub fn modified_by(&self) -> Option<&str> {
        self.modified_by.as_deref()
    }

    /// Returns `true` if nothing needs to change.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete.len()
    }

    pub fn summary(&self) -> ChangeSummary {
        ChangeSummary {
            creates: self.to_create.len(),
            updates: self.to_update.len(),
            deletes: self.to_delete.len(),
        }
    }
}

/// Operation counts of a [`ChangeSet`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} deleted",
            self.creates, self.updates, self.deletes
        )
    }
}
