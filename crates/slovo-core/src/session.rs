use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::aggregate::Aggregator;
use crate::error::{AnalysisError, Result};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::selector::{BackendKind, BackendSelector, BackendWarning};
use crate::stats;
use crate::tags::TagNormalizer;
use crate::tokenizer::WordTokenizer;
use crate::types::{AnalysisReport, CoefficientTable, PosStat};

/// Process-wide analysis state: the frozen backend choice and the latest results
#[derive(Debug)]
pub struct AnalysisSession {
    selector: BackendSelector,
    tokenizer: WordTokenizer,
    tags: TagNormalizer,
    /// Held for the whole of a run so runs never overlap
    run_lock: Mutex<()>,
    latest: RwLock<Option<Arc<AnalysisReport>>>,
    runs: AtomicU64,
}

impl AnalysisSession {
    pub fn new(selector: BackendSelector, tags: TagNormalizer) -> Result<Self> {
        Ok(Self::with_tokenizer(selector, tags, WordTokenizer::new()?))
    }

    pub fn with_tokenizer(
        selector: BackendSelector,
        tags: TagNormalizer,
        tokenizer: WordTokenizer,
    ) -> Self {
        Self {
            selector,
            tokenizer,
            tags,
            run_lock: Mutex::new(()),
            latest: RwLock::new(None),
            runs: AtomicU64::new(0),
        }
    }

    /// Analyze `text` and replace the previous results.
    ///
    /// Returns [`AnalysisError::EmptyInput`] when the text has no words; the
    /// previous results are kept in that case and on any other error.
    pub fn analyze(&self, text: &str) -> Result<Arc<AnalysisReport>> {
        let _run = self.run_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let text = DefaultPreprocessor.process(text);
        if !self.tokenizer.has_words(&text) {
            tracing::info!("Nothing to analyze");
            return Err(AnalysisError::EmptyInput);
        }

        let backend = self.selector.backend()?;
        let words = backend.analyze(&text, &self.tokenizer, &self.tags)?;
        if words.is_empty() {
            tracing::info!("Backend {} found no words", backend.name());
            return Err(AnalysisError::EmptyInput);
        }

        let mut aggregator = Aggregator::new();
        for word in &words {
            aggregator.push(&word.surface, &word.result);
        }
        let report = Arc::new(aggregator.finish(backend.name()));

        tracing::debug!(
            "Analyzed {} words into {} lemmas with {}",
            report.total_words,
            report.entries.len(),
            backend.name()
        );

        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        self.runs.fetch_add(1, Ordering::Relaxed);

        Ok(report)
    }

    /// Results of the most recent successful run
    pub fn latest(&self) -> Result<Arc<AnalysisReport>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AnalysisError::NoData)
    }

    pub fn statistics(&self) -> Result<Vec<PosStat>> {
        let report = self.latest()?;
        stats::pos_statistics(&report.pos_summary, report.total_words)
    }

    pub fn coefficients(&self) -> Result<CoefficientTable> {
        let report = self.latest()?;
        stats::coefficients(&report.pos_summary, report.total_words)
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.selector.kind()
    }

    pub fn backend_name(&self) -> Option<String> {
        self.selector
            .backend()
            .ok()
            .map(|backend| backend.name().to_string())
    }

    pub fn backend_warning(&self) -> Option<&BackendWarning> {
        self.selector.warning()
    }

    /// Number of successful runs so far
    pub fn runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }
}
