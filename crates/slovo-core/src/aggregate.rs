use std::collections::HashMap;

use crate::types::{AnalysisReport, AnalysisResult, LemmaEntry, PosSummary};

/// Groups analyzed occurrences by lemma and counts labels
#[derive(Debug, Default)]
pub struct Aggregator {
    lemmas: HashMap<String, LemmaEntry>,
    pos_summary: PosSummary,
    total: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: &str, result: &AnalysisResult) {
        let entry = self
            .lemmas
            .entry(result.lemma.clone())
            .or_insert_with(|| LemmaEntry::new(result.lemma.clone()));
        entry.count += 1;

        // First label seen for a surface form is kept for the whole run
        entry
            .forms
            .entry(surface.to_lowercase())
            .or_insert_with(|| result.pos.clone());

        self.pos_summary.increment(&result.pos);
        self.total += 1;
    }

    /// Entries sorted by lemma in codepoint order
    pub fn finish(self, backend: &str) -> AnalysisReport {
        let mut entries: Vec<LemmaEntry> = self.lemmas.into_values().collect();
        entries.sort_by(|a, b| a.lemma.cmp(&b.lemma));

        AnalysisReport {
            entries,
            pos_summary: self.pos_summary,
            total_words: self.total,
            backend: backend.to_string(),
        }
    }
}
