//! Reconciliation engine for cfgtext.
//!
//! Given the persisted items of one namespace (the baseline) and a freshly
//! edited document, computes the creates, updates, and deletes that make the
//! persisted state match the document. The engine is a pure function: it
//! performs no I/O, never mutates the baseline, and either returns a complete
//! [`ChangeSet`] or rejects the document.
//!
//! # Pipeline
//!
//! 1. [`Document::parse`] classifies every line ([`Line`]) and rejects the
//!    document on a missing separator or a repeated key.
//! 2. [`reconcile`] walks the document against a per-call index of the
//!    baseline and emits a [`ChangeSet`].
//!
//! [`render`] is the inverse direction, and [`preview`] produces a
//! line diff for human review.

pub mod change_set;
pub mod error;
pub mod line;
pub mod preview;
pub mod reconcile;
pub mod render;
pub mod validate;

pub use change_set::{ChangeSet, ChangeSummary};
pub use error::{ResolveError, ResolveResult};
pub use line::{classify, parse_key_value, Line, LineClass};
pub use preview::{preview, PreviewHunk, PreviewLine, TextPreview};
pub use reconcile::{reconcile, resolve, PropertiesResolver, TextResolver};
pub use render::{render, render_line};
pub use validate::Document;
