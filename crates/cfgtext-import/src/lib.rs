//! Import target identification for cfgtext.
//!
//! Uploaded configuration files name their destination in the file name:
//! `appId+cluster+namespace.format`. This crate turns such a name into an
//! [`ImportTarget`] before any configuration text reaches the resolver. A
//! name that does not parse never gets that far.
//!
//! # Modules
//!
//! - [`error`]: Error types for import identification
//! - [`format`]: [`ConfigFileFormat`], the supported file formats
//! - [`names`]: File name parsing and upload checks

pub mod error;
pub mod format;
pub mod names;

pub use error::{ImportError, Result};
pub use format::ConfigFileFormat;
pub use names::{check_upload, ImportTarget};
