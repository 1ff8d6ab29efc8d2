use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label used for missing or unmapped grammatical tags
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Human-readable part-of-speech label shared by every backend
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosLabel(String);

impl PosLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self(UNKNOWN_LABEL.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_LABEL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PosLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PosLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for PosLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Native analysis of a single word, before tag normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub normal_form: String,
    pub tag: Option<String>,
}

impl Parse {
    pub fn new(normal_form: impl Into<String>, tag: Option<&str>) -> Self {
        Self {
            normal_form: normal_form.into(),
            tag: tag.map(str::to_string),
        }
    }
}

/// Word detected by a whole-text analyzer, with its native tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWord {
    pub word: String,
    pub lemma: String,
    pub tag: Option<String>,
}

/// Lemma and shared label assigned to one word occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub lemma: String,
    pub pos: PosLabel,
}

/// Surface text of an occurrence paired with its analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedWord {
    pub surface: String,
    pub result: AnalysisResult,
}

/// All occurrences grouped under one lemma
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LemmaEntry {
    pub lemma: String,
    pub count: usize,
    /// Lowercase surface form -> label recorded when the form was first seen
    pub forms: BTreeMap<String, PosLabel>,
}

impl LemmaEntry {
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            count: 0,
            forms: BTreeMap::new(),
        }
    }

    /// `form (label), form (label)` sorted by surface form
    pub fn forms_display(&self) -> String {
        self.forms
            .iter()
            .map(|(form, pos)| format!("{form} ({pos})"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Occurrence count per label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosSummary(BTreeMap<PosLabel, usize>);

impl PosSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &PosLabel) {
        *self.0.entry(label.clone()).or_insert(0) += 1;
    }

    pub fn get(&self, label: &str) -> usize {
        self.0.get(&PosLabel::new(label)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PosLabel, usize)> {
        self.0.iter().map(|(label, count)| (label, *count))
    }
}

impl FromIterator<(PosLabel, usize)> for PosSummary {
    fn from_iter<I: IntoIterator<Item = (PosLabel, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One row of the part-of-speech summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosStat {
    pub label: PosLabel,
    pub count: usize,
    pub coefficient: f64,
}

/// Relative frequency per label
pub type CoefficientTable = BTreeMap<PosLabel, f64>;

/// Complete result of one analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Sorted by lemma
    pub entries: Vec<LemmaEntry>,
    pub pos_summary: PosSummary,
    pub total_words: usize,
    /// Name of the backend that produced the run
    pub backend: String,
}

impl AnalysisReport {
    pub fn entry(&self, lemma: &str) -> Option<&LemmaEntry> {
        self.entries
            .binary_search_by(|entry| entry.lemma.as_str().cmp(lemma))
            .ok()
            .map(|idx| &self.entries[idx])
    }
}
