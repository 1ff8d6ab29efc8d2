use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slovo_core::backend::TextAnalyzer;
use slovo_core::types::ParsedWord;

use crate::dictionary::fold_yo;
use crate::error::ModelError;

const MIN_STEM_CHARS: usize = 2;

fn default_weight() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub lemma: String,
    pub upos: String,
}

/// Ending-based lemma and UPOS prediction for forms outside the lexicon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    #[serde(default)]
    pub replace: String,
    pub upos: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

/// Serialized statistical model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticalModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub lexicon: HashMap<String, LexiconEntry>,
    #[serde(default)]
    pub suffixes: Vec<SuffixRule>,
    /// UPOS for Cyrillic words no rule covers
    #[serde(default)]
    pub default_upos: Option<String>,
}

impl StatisticalModel {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        if model.lexicon.is_empty() {
            return Err(ModelError::Empty);
        }
        Ok(model)
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, 'А'..='я' | 'Ё' | 'ё')
}

/// Bytes at the start of `s` whose chars satisfy `pred`
fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|(_, c)| !pred(*c))
        .map_or(s.len(), |(i, _)| i)
}

/// A run of `pred` chars, continued across single `joiners` ("кто-то", "3,5")
fn joined_run_len(s: &str, pred: impl Fn(char) -> bool + Copy, joiners: &[char]) -> usize {
    let mut end = run_len(s, pred);
    if end == 0 {
        return 0;
    }

    while let Some(joiner) = s[end..].chars().next().filter(|c| joiners.contains(c)) {
        let next = run_len(&s[end + joiner.len_utf8()..], pred);
        if next == 0 {
            break;
        }
        end += joiner.len_utf8() + next;
    }
    end
}

/// Dotted abbreviation such as "т.е." or "и.т.д.": two or more one- or
/// two-letter segments, each closed by a period
fn abbreviation_len(s: &str) -> usize {
    let mut end = 0;
    let mut segments = 0;

    loop {
        let rest = &s[end..];
        let letters = run_len(rest, char::is_alphabetic);
        if !(1..=2).contains(&rest[..letters].chars().count()) || !rest[letters..].starts_with('.') {
            break;
        }
        end += letters + 1;
        segments += 1;
    }

    if segments >= 2 && !s[end..].starts_with(char::is_alphanumeric) {
        end
    } else {
        0
    }
}

/// Words, numbers, abbreviations and single punctuation marks in text order.
///
/// Punctuation splits words even without surrounding spaces; hyphens inside
/// a word and separators inside a number stay.
pub fn split_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            break;
        };

        let len = [
            abbreviation_len(rest),
            joined_run_len(rest, |c| c.is_ascii_digit(), &['.', ',']),
            joined_run_len(rest, char::is_alphanumeric, &['-']),
        ]
        .into_iter()
        .find(|len| *len > 0)
        .unwrap_or(first.len_utf8());

        tokens.push(&rest[..len]);
        rest = &rest[len..];
    }

    tokens
}

/// Lexicon-and-suffix tagger reporting Universal Dependencies tags
#[derive(Debug, Clone)]
pub struct StatisticalAnalyzer {
    name: String,
    lexicon: HashMap<String, LexiconEntry>,
    /// ё-folded form -> lexicon key
    folded: HashMap<String, String>,
    /// Longest suffix first, then highest weight
    suffixes: Vec<SuffixRule>,
    default_upos: Option<String>,
}

impl StatisticalAnalyzer {
    pub fn new(model: StatisticalModel) -> Self {
        let lexicon: HashMap<String, LexiconEntry> = model
            .lexicon
            .into_iter()
            .map(|(form, entry)| (form.to_lowercase(), entry))
            .collect();

        let folded = lexicon
            .keys()
            .map(|form| (fold_yo(form), form.clone()))
            .collect();

        let mut suffixes = model.suffixes;
        suffixes.sort_by(|a, b| {
            b.suffix
                .chars()
                .count()
                .cmp(&a.suffix.chars().count())
                .then_with(|| b.weight.total_cmp(&a.weight))
        });

        tracing::info!(
            "Statistical model {} ready: {} forms, {} suffix rules",
            model.name,
            lexicon.len(),
            suffixes.len()
        );

        Self {
            name: model.name,
            lexicon,
            folded,
            suffixes,
            default_upos: model.default_upos,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(Self::new(StatisticalModel::from_json(json)?))
    }

    pub fn lexicon_size(&self) -> usize {
        self.lexicon.len()
    }

    fn lookup(&self, lower: &str) -> Option<&LexiconEntry> {
        self.lexicon.get(lower).or_else(|| {
            self.folded
                .get(&fold_yo(lower))
                .and_then(|form| self.lexicon.get(form))
        })
    }

    fn tag_token(&self, token: &str) -> ParsedWord {
        let lower = token.to_lowercase();
        let word = token.to_string();

        if let Some(entry) = self.lookup(&lower) {
            return ParsedWord {
                word,
                lemma: entry.lemma.clone(),
                tag: Some(entry.upos.clone()),
            };
        }

        let tagged = |lemma: String, tag: Option<&str>| ParsedWord {
            word: token.to_string(),
            lemma,
            tag: tag.map(str::to_string),
        };

        if token.chars().any(|c| c.is_ascii_digit())
            && token
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        {
            return tagged(lower, Some("NUM"));
        }

        if token.chars().all(|c| !c.is_alphanumeric()) {
            return tagged(lower, Some("PUNCT"));
        }

        if !token.chars().any(is_cyrillic) {
            return tagged(lower, Some("X"));
        }

        let chars = lower.chars().count();
        let guess = self.suffixes.iter().find_map(|rule| {
            let stem = lower.strip_suffix(rule.suffix.as_str())?;
            (chars - rule.suffix.chars().count() >= MIN_STEM_CHARS)
                .then(|| (format!("{stem}{}", rule.replace), rule.upos.as_str()))
        });

        match guess {
            Some((lemma, upos)) => tagged(lemma, Some(upos)),
            None => tagged(lower, self.default_upos.as_deref()),
        }
    }
}

impl TextAnalyzer for StatisticalAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, text: &str) -> slovo_core::Result<Vec<ParsedWord>> {
        Ok(split_tokens(text)
            .into_iter()
            .map(|token| self.tag_token(token))
            .collect())
    }
}
