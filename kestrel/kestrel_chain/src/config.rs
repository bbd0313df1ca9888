//! Dispatch configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration:
//!
//! ```toml
//! catch_panics = true
//! audit_enabled = true
//! audit_capacity = 256
//! dispatch_log_level = "debug"
//! ```

use std::path::Path;

use kestrel_core::{wrap_err, ConfigError, LogLevel, Result};
use serde::{Deserialize, Serialize};

/// Settings for a [`crate::dispatch::Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Report panics inside terminal operations as dispatch errors
    #[serde(default = "default_catch_panics")]
    pub catch_panics: bool,

    /// Keep a record of every dispatch
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Number of dispatch records kept
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Level at which dispatch start and finish are logged
    #[serde(default)]
    pub dispatch_log_level: LogLevel,
}

fn default_catch_panics() -> bool {
    true
}

fn default_audit_enabled() -> bool {
    true
}

fn default_audit_capacity() -> usize {
    256
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            catch_panics: default_catch_panics(),
            audit_enabled: default_audit_enabled(),
            audit_capacity: default_audit_capacity(),
            dispatch_log_level: LogLevel::default(),
        }
    }
}

impl DispatchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = wrap_err!(std::fs::read_to_string(path), |e: std::io::Error| {
            ConfigError::LoadFailed(format!("{}: {}", path.display(), e))
        });
        Self::from_toml_str(&text)
    }

    /// Check that the settings are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.audit_enabled && self.audit_capacity == 0 {
            return Err(ConfigError::Invalid(
                "audit_capacity must be greater than zero when auditing is enabled".into(),
            )
            .into());
        }
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::Error;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DispatchConfig::from_toml_str("").unwrap();
        assert_eq!(config, DispatchConfig::default());
        assert!(config.catch_panics);
        assert_eq!(config.audit_capacity, 256);
        assert_eq!(config.dispatch_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_partial_document() {
        let config = DispatchConfig::from_toml_str(
            r#"
            catch_panics = false
            dispatch_log_level = "warn"
            "#,
        )
        .unwrap();
        assert!(!config.catch_panics);
        assert!(config.audit_enabled);
        assert_eq!(config.dispatch_log_level, LogLevel::Warning);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let err = DispatchConfig::from_toml_str("audit_capacity = 0").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));

        let config = DispatchConfig::from_toml_str("audit_enabled = false\naudit_capacity = 0");
        assert!(config.is_ok());
    }

    #[test]
    fn test_malformed_document() {
        let err = DispatchConfig::from_toml_str("catch_panics = \"sometimes\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DispatchConfig {
            audit_capacity: 8,
            ..DispatchConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(DispatchConfig::from_toml_str(&text).unwrap(), config);
    }
}
