use std::path::PathBuf;
use std::time::Duration;

use slovo_config::model::ModelConfig;

use crate::error::ModelError;
use crate::statistical::{StatisticalAnalyzer, StatisticalModel};

/// Where statistical model data comes from
#[async_trait::async_trait]
pub trait ModelSource: Send + Sync {
    fn describe(&self) -> String;

    /// Fetch and parse the model
    async fn fetch(&self) -> Result<StatisticalModel, ModelError>;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ModelSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<StatisticalModel, ModelError> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(ModelError::NotFound(self.path.clone()));
        }
        let json = tokio::fs::read_to_string(&self.path).await?;
        StatisticalModel::from_json(&json)
    }
}

/// Model downloaded over HTTP and kept in a local cache file
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
}

impl HttpSource {
    pub fn new(
        url: impl Into<String>,
        cache_path: Option<PathBuf>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            cache_path,
        })
    }

    /// A cached model that no longer parses is removed and treated as missing
    async fn read_cache(&self) -> Option<StatisticalModel> {
        let path = self.cache_path.as_ref()?;
        let json = tokio::fs::read_to_string(path).await.ok()?;

        match StatisticalModel::from_json(&json) {
            Ok(model) => {
                tracing::debug!("Using cached model: {}", path.display());
                Some(model)
            }
            Err(e) => {
                tracing::warn!("Discarding invalid cached model {}: {}", path.display(), e);
                if let Err(e) = tokio::fs::remove_file(path).await {
                    tracing::warn!("Could not remove cached model: {}", e);
                }
                None
            }
        }
    }

    async fn write_cache(&self, json: &str) {
        let Some(path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!("Could not create model cache directory: {}", e);
                return;
            }
        }

        match tokio::fs::write(path, json).await {
            Ok(()) => tracing::info!("Cached model at {}", path.display()),
            Err(e) => tracing::warn!("Could not cache model: {}", e),
        }
    }
}

#[async_trait::async_trait]
impl ModelSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<StatisticalModel, ModelError> {
        if let Some(model) = self.read_cache().await {
            return Ok(model);
        }

        tracing::info!("Downloading model from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Http(status));
        }

        let json = response.text().await?;
        let model = StatisticalModel::from_json(&json)?;
        self.write_cache(&json).await;
        Ok(model)
    }
}

/// Source chosen by configuration: a local path wins over a URL
pub fn source_from_config(config: &ModelConfig) -> Result<Box<dyn ModelSource>, ModelError> {
    if !config.enabled {
        return Err(ModelError::Disabled);
    }

    if let Some(path) = &config.path {
        return Ok(Box::new(FileSource::new(path)));
    }

    if let Some(url) = &config.url {
        return Ok(Box::new(HttpSource::new(
            url,
            config.cache_path(),
            Duration::from_secs(config.timeout_seconds),
        )?));
    }

    Err(ModelError::NotConfigured)
}

pub async fn load_model(source: &dyn ModelSource) -> Result<StatisticalAnalyzer, ModelError> {
    tracing::info!("Loading statistical model from {}", source.describe());
    let model = source.fetch().await?;
    Ok(StatisticalAnalyzer::new(model))
}

pub async fn load_from_config(config: &ModelConfig) -> Result<StatisticalAnalyzer, ModelError> {
    let source = source_from_config(config)?;
    load_model(source.as_ref()).await
}
