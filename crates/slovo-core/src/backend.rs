use std::sync::Arc;

use crate::error::Result;
use crate::tags::{TagNormalizer, TagSet};
use crate::tokenizer::WordTokenizer;
use crate::types::{AnalysisResult, AnalyzedWord, Parse, ParsedWord};

/// Per-word morphological analysis (dictionary lookup with guessing)
pub trait WordAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    /// Most likely parse of a single word. Unknown words get a best-effort guess.
    fn parse(&self, word: &str) -> Parse;
}

/// Whole-text analysis with its own tokenization
pub trait TextAnalyzer: Send + Sync {
    fn name(&self) -> &str;

    /// Every word the analyzer detects, in input order
    fn process(&self, text: &str) -> Result<Vec<ParsedWord>>;
}

/// Active morphological backend
#[derive(Clone)]
pub enum Backend {
    Dictionary(Arc<dyn WordAnalyzer>),
    Statistical(Arc<dyn TextAnalyzer>),
}

impl Backend {
    pub fn name(&self) -> &str {
        match self {
            Backend::Dictionary(analyzer) => analyzer.name(),
            Backend::Statistical(analyzer) => analyzer.name(),
        }
    }

    pub fn tag_set(&self) -> TagSet {
        match self {
            Backend::Dictionary(_) => TagSet::Dictionary,
            Backend::Statistical(_) => TagSet::Universal,
        }
    }

    /// Analyze text into normalized (surface, lemma, label) occurrences.
    ///
    /// Words reported by a statistical backend are kept only if they match the
    /// tokenizer's word pattern in full.
    pub fn analyze(
        &self,
        text: &str,
        tokenizer: &WordTokenizer,
        tags: &TagNormalizer,
    ) -> Result<Vec<AnalyzedWord>> {
        let tag_set = self.tag_set();

        match self {
            Backend::Dictionary(analyzer) => Ok(tokenizer
                .tokens(text)
                .map(|token| {
                    let parse = analyzer.parse(token.text);
                    AnalyzedWord {
                        surface: token.text.to_string(),
                        result: AnalysisResult {
                            lemma: parse.normal_form.to_lowercase(),
                            pos: tags.normalize(tag_set, parse.tag.as_deref()),
                        },
                    }
                })
                .collect()),
            Backend::Statistical(analyzer) => {
                let detected = analyzer.process(text)?;
                let detected_count = detected.len();

                let words: Vec<AnalyzedWord> = detected
                    .into_iter()
                    .filter(|word| tokenizer.is_word(&word.word))
                    .map(|word| AnalyzedWord {
                        result: AnalysisResult {
                            lemma: word.lemma.to_lowercase(),
                            pos: tags.normalize(tag_set, word.tag.as_deref()),
                        },
                        surface: word.word,
                    })
                    .collect();

                let discarded = detected_count - words.len();
                if discarded > 0 {
                    tracing::debug!(
                        "Discarded {} of {} tokens not matching the word pattern",
                        discarded,
                        detected_count
                    );
                }

                Ok(words)
            }
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Dictionary(analyzer) => f.debug_tuple("Dictionary").field(&analyzer.name()).finish(),
            Backend::Statistical(analyzer) => {
                f.debug_tuple("Statistical").field(&analyzer.name()).finish()
            }
        }
    }
}
