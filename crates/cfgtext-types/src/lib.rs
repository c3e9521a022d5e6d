//! Foundation types for cfgtext.
//!
//! This crate provides the identity and structural types shared by the
//! resolver, the item stores, and the SDK. Every other cfgtext crate depends
//! on `cfgtext-types`.
//!
//! # Key Types
//!
//! - [`ItemId`]: Persisted item identity; the null id marks an unsaved item
//! - [`NamespaceId`]: Identity of the document scope that owns a set of items
//! - [`Item`]: One persisted line of a configuration document
//! - [`ItemKind`]: Data, comment, or blank, derived from an item's fields

pub mod error;
pub mod identity;
pub mod item;

pub use error::TypeError;
pub use identity::{ItemId, NamespaceId};
pub use item::{Item, ItemKind};
