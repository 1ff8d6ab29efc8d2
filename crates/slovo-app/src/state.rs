use std::sync::Arc;

use slovo_config::Config;
use slovo_core::AnalysisSession;
use slovo_core::backend::TextAnalyzer;
use slovo_core::selector::BackendSelector;
use slovo_lang_russian::{DictionaryAnalyzer, ModelError};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: Arc<AnalysisSession>,
}

impl AppState {
    pub fn new(config: Config, session: AnalysisSession) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Arc::new(session),
        }
    }

    /// Load dictionaries and tag tables, then pick the backend once
    pub async fn initialize(config: Config) -> anyhow::Result<Self> {
        let session = build_session(&config).await?;
        Ok(Self::new(config, session))
    }
}

pub async fn build_session(config: &Config) -> anyhow::Result<AnalysisSession> {
    let dictionary = Arc::new(DictionaryAnalyzer::from_config(&config.dictionary)?);
    let tags = slovo_lang_russian::normalizer_from_config(&config.tags)?;

    let selector = BackendSelector::new();
    match slovo_lang_russian::load_from_config(&config.model).await {
        Err(ModelError::Disabled) => {
            selector.select_dictionary(dictionary);
        }
        attempt => {
            let attempt = attempt.map(|analyzer| Arc::new(analyzer) as Arc<dyn TextAnalyzer>);
            selector.select(attempt, dictionary);
        }
    }

    Ok(AnalysisSession::new(selector, tags)?)
}
