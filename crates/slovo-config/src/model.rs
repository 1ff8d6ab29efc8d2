use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_cache_dir() -> String {
    "models".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Statistical backend model location
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    /// Try the statistical backend at startup
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Local model file, preferred over `url`
    pub path: Option<String>,
    /// Remote model, fetched once and stored in `cache_dir`
    pub url: Option<String>,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: None,
            url: None,
            cache_dir: default_cache_dir(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        let enabled = env::var("SLOVO_MODEL_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_enabled);

        let timeout_seconds = env::var("SLOVO_MODEL_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        let cache_dir = env::var("SLOVO_MODEL_CACHE").unwrap_or_else(|_| default_cache_dir());

        Self {
            enabled,
            path: env::var("SLOVO_MODEL_PATH").ok(),
            url: env::var("SLOVO_MODEL_URL").ok(),
            cache_dir,
            timeout_seconds,
        }
    }

    /// Where a model fetched from `url` is stored
    pub fn cache_path(&self) -> Option<PathBuf> {
        let url = self.url.as_deref()?;
        let without_query = url.split(['?', '#']).next().unwrap_or_default();
        let path = match without_query.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
            None => without_query,
        };
        let file_name = path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("model.json");
        Some(PathBuf::from(&self.cache_dir).join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_uses_last_url_segment() {
        let config = ModelConfig {
            url: Some("https://example.org/models/ru-syntagrus.json".to_string()),
            ..ModelConfig::default()
        };
        assert_eq!(
            config.cache_path(),
            Some(PathBuf::from("models").join("ru-syntagrus.json"))
        );
    }

    #[test]
    fn test_cache_path_ignores_host_and_query() {
        let cache_path = |url: &str| {
            ModelConfig {
                url: Some(url.to_string()),
                ..ModelConfig::default()
            }
            .cache_path()
        };

        assert_eq!(
            cache_path("https://example.org/"),
            Some(PathBuf::from("models").join("model.json"))
        );
        assert_eq!(
            cache_path("https://example.org"),
            Some(PathBuf::from("models").join("model.json"))
        );
        assert_eq!(
            cache_path("https://example.org/dl/ru.json?token=abc#top"),
            Some(PathBuf::from("models").join("ru.json"))
        );
    }

    #[test]
    fn test_cache_path_without_url() {
        assert_eq!(ModelConfig::default().cache_path(), None);
    }
}
