use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File formats a namespace can be stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFileFormat {
    Properties,
    Xml,
    Json,
    Yml,
    Yaml,
    Txt,
}

impl ConfigFileFormat {
    pub const ALL: [ConfigFileFormat; 6] = [
        ConfigFileFormat::Properties,
        ConfigFileFormat::Xml,
        ConfigFileFormat::Json,
        ConfigFileFormat::Yml,
        ConfigFileFormat::Yaml,
        ConfigFileFormat::Txt,
    ];

    /// The file suffix, without the dot.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFileFormat::Properties => "properties",
            ConfigFileFormat::Xml => "xml",
            ConfigFileFormat::Json => "json",
            ConfigFileFormat::Yml => "yml",
            ConfigFileFormat::Yaml => "yaml",
            ConfigFileFormat::Txt => "txt",
        }
    }

    /// Only properties documents are reconciled line by line.
    pub fn is_line_based(&self) -> bool {
        matches!(self, ConfigFileFormat::Properties)
    }
}

impl fmt::Display for ConfigFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFileFormat {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == lower)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_suffix() {
        for format in ConfigFileFormat::ALL {
            assert_eq!(format.as_str().parse::<ConfigFileFormat>(), Ok(format));
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("YML".parse(), Ok(ConfigFileFormat::Yml));
        assert_eq!("Properties".parse(), Ok(ConfigFileFormat::Properties));
    }

    #[test]
    fn unknown_suffix_is_returned_as_error() {
        assert_eq!("ini".parse::<ConfigFileFormat>(), Err("ini".to_string()));
    }

    #[test]
    fn only_properties_is_line_based() {
        let line_based: Vec<_> = ConfigFileFormat::ALL
            .into_iter()
            .filter(ConfigFileFormat::is_line_based)
            .collect();
        assert_eq!(line_based, vec![ConfigFileFormat::Properties]);
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&ConfigFileFormat::Yaml).unwrap();
        assert_eq!(json, "\"yaml\"");
    }
}
