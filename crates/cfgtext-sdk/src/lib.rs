//! High-level SDK for cfgtext.
//!
//! Wires the resolver, an item store, and an audit sink into one
//! [`ConfigService`]. This is the main entry point for applications that
//! edit configuration namespaces as text.

pub mod audit;
pub mod config;
pub mod error;
pub mod service;

pub use audit::{AuditRecord, AuditSink, MemoryAudit, NoOpAudit, TracingAudit};
pub use config::SdkConfig;
pub use error::{SdkError, SdkResult};
pub use service::{namespace_format, ConfigService, Plan, UpdateReport};

// Re-export key types
pub use cfgtext_import::{ConfigFileFormat, ImportTarget};
pub use cfgtext_resolve::{ChangeSet, ChangeSummary, ResolveError, TextPreview};
pub use cfgtext_store::{InMemoryItemStore, ItemStore, JsonFileItemStore, NamespaceInfo};
pub use cfgtext_types::{Item, ItemId, ItemKind, NamespaceId};
