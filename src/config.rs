//! Progress store configuration
//!
//! Fixed for the lifetime of a store once it is initialized.

use serde::{Deserialize, Serialize};

use crate::STORAGE_KEY;

/// Settings for a [`crate::ProgressStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Key of the progress record in both stores
    pub storage_key: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl ProgressConfig {
    /// Default config with a different storage key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProgressConfig::default();
        assert_eq!(config.storage_key, "gameProgress");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ProgressConfig::from_json(r#"{"storage_key":"slot"}"#).unwrap();
        assert_eq!(config.storage_key, "slot");

        let config = ProgressConfig::from_json("{}").unwrap();
        assert_eq!(config, ProgressConfig::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ProgressConfig::from_json("not-json").is_err());
    }
}
