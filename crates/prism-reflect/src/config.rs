//! Reflection configuration (prism-reflect.toml)
//!
//! ```toml
//! diagnostics_format = "json"
//! warn_on_swallowed_failure = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// How specialization diagnostics are rendered into their blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    /// Human-readable, uncolored terminal output
    #[default]
    Text,
    /// JSON array for tooling
    Json,
}

/// Settings for a [`crate::Reflection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionConfig {
    /// Diagnostics blob format
    #[serde(default)]
    pub diagnostics_format: DiagnosticsFormat,

    /// Emit a `warn` event when a collaborator failure is folded into a
    /// sentinel (name lookup, layout computation)
    #[serde(default = "default_warn_on_swallowed_failure")]
    pub warn_on_swallowed_failure: bool,
}

fn default_warn_on_swallowed_failure() -> bool {
    true
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            diagnostics_format: DiagnosticsFormat::default(),
            warn_on_swallowed_failure: default_warn_on_swallowed_failure(),
        }
    }
}

impl ReflectionConfig {
    /// Parse a config from TOML text
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReflectionConfig::from_str("").unwrap();
        assert_eq!(config, ReflectionConfig::default());
        assert_eq!(config.diagnostics_format, DiagnosticsFormat::Text);
        assert!(config.warn_on_swallowed_failure);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
diagnostics_format = "json"
warn_on_swallowed_failure = false
"#;
        let config = ReflectionConfig::from_str(toml).unwrap();
        assert_eq!(config.diagnostics_format, DiagnosticsFormat::Json);
        assert!(!config.warn_on_swallowed_failure);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = ReflectionConfig::from_str(r#"diagnostics_format = "xml""#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ReflectionConfig {
            diagnostics_format: DiagnosticsFormat::Json,
            warn_on_swallowed_failure: false,
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ReflectionConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prism-reflect.toml");
        std::fs::write(&path, "diagnostics_format = \"json\"\n").unwrap();
        let config = ReflectionConfig::from_file(&path).unwrap();
        assert_eq!(config.diagnostics_format, DiagnosticsFormat::Json);

        let missing = ReflectionConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::IoError(_))));
    }
}
