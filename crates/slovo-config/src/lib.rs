use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::export::ExportConfig;
use self::model::ModelConfig;
use self::tags::TagsConfig;

pub mod dictionary;
pub mod export;
pub mod model;
pub mod tags;

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub model: ModelConfig,
    pub tags: TagsConfig,
    pub export: ExportConfig,

    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            model: ModelConfig::default(),
            tags: TagsConfig::default(),
            export: ExportConfig::default(),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let log_filter = env::var("SLOVO_LOG").unwrap_or_else(|_| default_log_filter());

        let log_json = env::var("SLOVO_LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Config {
            dictionary: DictionaryConfig::new(),
            model: ModelConfig::new(),
            log_filter,
            log_json,
            ..Config::default()
        }
    }

    /// Load a JSON config file; missing sections take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from: {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(
            r#"{
                "model": { "enabled": false },
                "dictionary": { "additional_paths": ["extra.json"] },
                "log_filter": "debug"
            }"#,
        )
        .unwrap();

        assert!(!config.model.enabled);
        assert_eq!(config.model.cache_dir, "models");
        assert_eq!(config.model.timeout_seconds, 30);
        assert!(config.dictionary.enabled);
        assert!(config.dictionary.guess_unknown);
        assert_eq!(config.dictionary.additional_paths, vec!["extra.json"]);
        assert_eq!(config.export.default_format, "csv");
        assert_eq!(config.log_filter, "debug");
        assert!(!config.log_json);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert!(config.model.enabled);
        assert!(config.tags.dictionary_overrides.is_none());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load(Path::new("does/not/exist.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
