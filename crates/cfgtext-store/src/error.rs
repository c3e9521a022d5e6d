use cfgtext_types::{ItemId, NamespaceId};

/// Errors from item store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The namespace id is not registered.
    #[error("namespace not found: {0}")]
    NamespaceNotFound(NamespaceId),

    /// A namespace with the same coordinates is already registered.
    #[error("namespace already exists: {app_id}+{cluster}+{name}")]
    NamespaceExists {
        app_id: String,
        cluster: String,
        name: String,
    },

    /// An update or delete names an item the namespace does not hold.
    #[error("item {id} not found in {namespace}")]
    ItemNotFound { namespace: NamespaceId, id: ItemId },

    /// The namespace changed since the baseline was read.
    #[error("stale baseline for {namespace}: read at revision {expected}, now at {actual}")]
    StaleBaseline {
        namespace: NamespaceId,
        expected: u64,
        actual: u64,
    },

    /// The change set violates a structural rule (foreign namespace, id reuse).
    #[error("invalid change set: {0}")]
    InvalidChangeSet(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
