use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::backend::{Backend, TextAnalyzer, WordAnalyzer};
use crate::error::{AnalysisError, Result};

/// Which backend a session runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackendKind {
    Uninitialized,
    Statistical,
    DictionaryFallback,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Uninitialized => "uninitialized",
            BackendKind::Statistical => "statistical",
            BackendKind::DictionaryFallback => "dictionary",
        }
    }
}

/// Non-fatal notice that the statistical backend could not be prepared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendWarning {
    pub backend: String,
    pub detail: String,
}

impl fmt::Display for BackendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} backend unavailable, using dictionary analysis: {}",
            self.backend, self.detail
        )
    }
}

enum BackendState {
    Statistical(Arc<dyn TextAnalyzer>),
    DictionaryFallback {
        analyzer: Arc<dyn WordAnalyzer>,
        warning: Option<BackendWarning>,
    },
}

/// One-shot choice between the statistical backend and the dictionary fallback
#[derive(Default)]
pub struct BackendSelector {
    state: OnceLock<BackendState>,
}

impl BackendSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the backend choice from the outcome of initializing the
    /// statistical analyzer. Later calls keep the first choice.
    pub fn select<E: fmt::Display>(
        &self,
        attempt: std::result::Result<Arc<dyn TextAnalyzer>, E>,
        fallback: Arc<dyn WordAnalyzer>,
    ) -> BackendKind {
        let state = match attempt {
            Ok(analyzer) => {
                tracing::info!("Using statistical backend: {}", analyzer.name());
                BackendState::Statistical(analyzer)
            }
            Err(e) => {
                let warning = BackendWarning {
                    backend: "statistical".to_string(),
                    detail: e.to_string(),
                };
                tracing::warn!("{}", warning);
                BackendState::DictionaryFallback {
                    analyzer: fallback,
                    warning: Some(warning),
                }
            }
        };

        self.freeze(state)
    }

    /// Use the dictionary backend without attempting the statistical one
    pub fn select_dictionary(&self, analyzer: Arc<dyn WordAnalyzer>) -> BackendKind {
        tracing::info!("Using dictionary backend: {}", analyzer.name());
        self.freeze(BackendState::DictionaryFallback {
            analyzer,
            warning: None,
        })
    }

    fn freeze(&self, state: BackendState) -> BackendKind {
        if self.state.set(state).is_err() {
            tracing::warn!("Backend already selected, keeping {}", self.kind().as_str());
        }
        self.kind()
    }

    pub fn kind(&self) -> BackendKind {
        match self.state.get() {
            None => BackendKind::Uninitialized,
            Some(BackendState::Statistical(_)) => BackendKind::Statistical,
            Some(BackendState::DictionaryFallback { .. }) => BackendKind::DictionaryFallback,
        }
    }

    pub fn warning(&self) -> Option<&BackendWarning> {
        match self.state.get() {
            Some(BackendState::DictionaryFallback { warning, .. }) => warning.as_ref(),
            _ => None,
        }
    }

    pub fn backend(&self) -> Result<Backend> {
        match self.state.get() {
            None => Err(AnalysisError::BackendNotReady),
            Some(BackendState::Statistical(analyzer)) => Ok(Backend::Statistical(analyzer.clone())),
            Some(BackendState::DictionaryFallback { analyzer, .. }) => {
                Ok(Backend::Dictionary(analyzer.clone()))
            }
        }
    }
}

impl fmt::Debug for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSelector")
            .field("kind", &self.kind())
            .field("warning", &self.warning())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Parse, ParsedWord};

    struct Dict;

    impl WordAnalyzer for Dict {
        fn name(&self) -> &str {
            "dict"
        }

        fn parse(&self, word: &str) -> Parse {
            Parse::new(word, None)
        }
    }

    struct Stat;

    impl TextAnalyzer for Stat {
        fn name(&self) -> &str {
            "stat"
        }

        fn process(&self, _text: &str) -> Result<Vec<ParsedWord>> {
            Ok(Vec::new())
        }
    }

    fn statistical() -> std::result::Result<Arc<dyn TextAnalyzer>, String> {
        Ok(Arc::new(Stat))
    }

    #[test]
    fn test_starts_uninitialized() {
        let selector = BackendSelector::new();
        assert_eq!(selector.kind(), BackendKind::Uninitialized);
        assert!(matches!(selector.backend(), Err(AnalysisError::BackendNotReady)));
    }

    #[test]
    fn test_successful_initialization_selects_statistical() {
        let selector = BackendSelector::new();
        let kind = selector.select(statistical(), Arc::new(Dict));

        assert_eq!(kind, BackendKind::Statistical);
        assert!(selector.warning().is_none());
        assert_eq!(selector.backend().unwrap().name(), "stat");
    }

    #[test]
    fn test_failed_initialization_falls_back_with_warning() {
        let selector = BackendSelector::new();
        let failed: std::result::Result<Arc<dyn TextAnalyzer>, String> =
            Err("model download failed".to_string());
        let kind = selector.select(failed, Arc::new(Dict));

        assert_eq!(kind, BackendKind::DictionaryFallback);
        let warning = selector.warning().unwrap();
        assert_eq!(warning.detail, "model download failed");
        assert!(warning.to_string().contains("using dictionary analysis"));
        assert_eq!(selector.backend().unwrap().name(), "dict");
    }

    #[test]
    fn test_choice_is_frozen() {
        let selector = BackendSelector::new();
        let failed: std::result::Result<Arc<dyn TextAnalyzer>, String> = Err("offline".to_string());
        selector.select(failed, Arc::new(Dict));

        let kind = selector.select(statistical(), Arc::new(Dict));
        assert_eq!(kind, BackendKind::DictionaryFallback);
        assert_eq!(selector.warning().unwrap().detail, "offline");
    }

    #[test]
    fn test_dictionary_only_has_no_warning() {
        let selector = BackendSelector::new();
        assert_eq!(
            selector.select_dictionary(Arc::new(Dict)),
            BackendKind::DictionaryFallback
        );
        assert!(selector.warning().is_none());
    }
}
