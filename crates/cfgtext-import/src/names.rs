//! Import file name parsing.
//!
//! A standard import file name is `appId+cluster+namespace.format`, for
//! example `123456+default+application.properties`. Properties namespaces are
//! named bare (`application`); every other format keeps its suffix in the
//! namespace name (`application.yml`).

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ImportError, Result};
use crate::format::ConfigFileFormat;

/// Separates app id, cluster, and namespace in a file name.
pub const PART_SEPARATOR: char = '+';

/// Characters forbidden in any part of a file name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '/', '\\', ':', '*', '?'];

/// Where an uploaded file should be imported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTarget {
    pub app_id: String,
    pub cluster: String,
    /// Namespace name as stored: bare for properties, `name.format` otherwise.
    pub namespace: String,
    pub format: ConfigFileFormat,
}

impl ImportTarget {
    /// Parse a standard file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgtext_import::{ConfigFileFormat, ImportTarget};
    ///
    /// let target = ImportTarget::parse("123+default+application.properties").unwrap();
    /// assert_eq!(target.app_id, "123");
    /// assert_eq!(target.namespace, "application");
    /// assert_eq!(target.format, ConfigFileFormat::Properties);
    ///
    /// let yaml = ImportTarget::parse("abc+north+password.yml").unwrap();
    /// assert_eq!(yaml.namespace, "password.yml");
    /// ```
    pub fn parse(file_name: &str) -> Result<Self> {
        let suffix = format_suffix(file_name)?;

        let parts: Vec<&str> = file_name.split(PART_SEPARATOR).collect();
        let [app_id, cluster, last] = parts.as_slice() else {
            return Err(invalid_name(
                file_name,
                format!("expected 3 parts separated by '+', got {}", parts.len()),
            ));
        };

        let mut namespace_and_format = last.split('.');
        let (Some(namespace), Some(_), None) = (
            namespace_and_format.next(),
            namespace_and_format.next(),
            namespace_and_format.next(),
        ) else {
            return Err(ImportError::InvalidNamespace {
                name: file_name.to_string(),
            });
        };

        for (label, part) in [("app id", *app_id), ("cluster", *cluster), ("namespace", namespace)] {
            validate_part(file_name, label, part)?;
        }

        let format: ConfigFileFormat = suffix.parse().map_err(|format| ImportError::UnsupportedFormat {
            name: file_name.to_string(),
            format,
        })?;

        let namespace = if format == ConfigFileFormat::Properties {
            namespace.to_string()
        } else {
            format!("{namespace}.{format}")
        };

        let target = Self {
            app_id: app_id.to_string(),
            cluster: cluster.to_string(),
            namespace,
            format,
        };
        debug!(file = file_name, target = %target, "import target identified");
        Ok(target)
    }

    /// Parse the final component of a path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| invalid_name(&path.display().to_string(), "no usable file name".into()))?;
        Self::parse(name)
    }

    /// The standard file name this target would be exported as.
    pub fn file_name(&self) -> String {
        let bare = match self.format {
            ConfigFileFormat::Properties => self.namespace.as_str(),
            _ => self
                .namespace
                .strip_suffix(&format!(".{}", self.format))
                .unwrap_or(&self.namespace),
        };
        format!(
            "{}{PART_SEPARATOR}{}{PART_SEPARATOR}{bare}.{}",
            self.app_id, self.cluster, self.format
        )
    }
}

impl fmt::Display for ImportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{} ({})", self.app_id, self.cluster, self.namespace, self.format)
    }
}

/// Reject an empty upload, then identify its target.
pub fn check_upload(file_name: &str, content: &[u8]) -> Result<ImportTarget> {
    if content.is_empty() {
        return Err(ImportError::EmptyFile {
            name: file_name.to_string(),
        });
    }
    ImportTarget::parse(file_name)
}

/// The text after the last `.`; fails if there is no `.` at all.
fn format_suffix(file_name: &str) -> Result<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, suffix)| suffix)
        .ok_or_else(|| ImportError::InvalidFormat {
            name: file_name.to_string(),
        })
}

fn validate_part(file_name: &str, label: &str, part: &str) -> Result<()> {
    if part.is_empty() {
        return Err(invalid_name(file_name, format!("{label} must not be empty")));
    }
    if let Some(ch) = part.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid_name(
            file_name,
            format!("{label} contains forbidden character: {ch:?}"),
        ));
    }
    Ok(())
}

fn invalid_name(file_name: &str, reason: String) -> ImportError {
    ImportError::InvalidFileName {
        name: file_name.to_string(),
        reason,
    }
}
