//! Item storage for cfgtext.
//!
//! The resolver only computes change sets; this crate persists them. Every
//! namespace holds an ordered set of items plus a revision counter, and a
//! change set is applied against the revision its baseline was read at.
//!
//! # Storage Backends
//!
//! All backends implement the [`ItemStore`] trait:
//!
//! - [`InMemoryItemStore`] -- `RwLock`-guarded store for tests and embedding
//! - [`JsonFileItemStore`] -- whole-state JSON document on disk, replaced
//!   atomically on every write
//!
//! # Design Rules
//!
//! 1. A change set is applied completely or not at all.
//! 2. Applying against a stale revision fails; nothing is retried.
//! 3. Creates receive fresh, monotonically increasing ids.
//! 4. Reads hand out snapshots; callers never hold a reference into the store.

pub mod error;
pub mod file;
pub mod memory;
pub mod model;
pub mod state;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileItemStore;
pub use memory::InMemoryItemStore;
pub use model::{AppliedChangeSet, Baseline, NamespaceInfo};
pub use traits::ItemStore;
