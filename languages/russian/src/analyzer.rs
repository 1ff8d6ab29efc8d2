use std::path::Path;

use slovo_config::dictionary::DictionaryConfig;
use slovo_core::backend::WordAnalyzer;
use slovo_core::types::Parse;

use crate::dictionary::RussianDictionary;
use crate::error::LoadError;
use crate::guesser::SuffixGuesser;
use crate::loader::DictionaryLoader;

/// Dictionary-backed analyzer: lookup, then suffix guessing, then the word itself
#[derive(Debug, Clone)]
pub struct DictionaryAnalyzer {
    dictionary: RussianDictionary,
    guesser: Option<SuffixGuesser>,
}

impl DictionaryAnalyzer {
    pub fn new(dictionary: RussianDictionary) -> Self {
        Self {
            dictionary,
            guesser: Some(SuffixGuesser::new()),
        }
    }

    /// Embedded dictionary with guessing enabled
    pub fn embedded() -> Result<Self, LoadError> {
        Ok(Self::new(DictionaryLoader::load_embedded()?))
    }

    /// Embedded dictionary merged with each readable file in order
    pub fn with_additional_dicts(additional_paths: &[String]) -> Result<Self, LoadError> {
        let dictionary = DictionaryLoader::load_embedded()?;
        Ok(Self::new(merge_additional(dictionary, additional_paths)))
    }

    pub fn from_config(config: &DictionaryConfig) -> Result<Self, LoadError> {
        let dictionary = if config.enabled {
            DictionaryLoader::load_embedded()?
        } else {
            tracing::info!("Embedded dictionary disabled");
            RussianDictionary::empty("user")
        };

        let mut analyzer = Self::new(merge_additional(dictionary, &config.additional_paths));
        if !config.guess_unknown {
            analyzer.guesser = None;
        }
        Ok(analyzer)
    }

    pub fn without_guessing(mut self) -> Self {
        self.guesser = None;
        self
    }

    pub fn dictionary(&self) -> &RussianDictionary {
        &self.dictionary
    }
}

fn merge_additional(mut dict: RussianDictionary, additional_paths: &[String]) -> RussianDictionary {
    for path in additional_paths {
        match DictionaryLoader::load_from_file(Path::new(path)) {
            Ok(additional) => {
                tracing::info!("Merging additional dictionary from: {}", path);
                dict = DictionaryLoader::merge(dict, additional);
            }
            Err(e) => {
                tracing::warn!("Failed to load dictionary from {}: {}", path, e);
            }
        }
    }
    dict
}

impl WordAnalyzer for DictionaryAnalyzer {
    fn name(&self) -> &str {
        "dictionary"
    }

    fn parse(&self, word: &str) -> Parse {
        if let Some(parse) = self.dictionary.best(word) {
            return parse;
        }

        if let Some(parse) = self.guesser.as_ref().and_then(|g| g.guess(word)) {
            return parse;
        }

        tracing::trace!("No parse for {}", word);
        Parse::new(word.to_lowercase(), None)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dictionary_words() {
        let analyzer = DictionaryAnalyzer::embedded().unwrap();
        assert_eq!(analyzer.parse("Кошки"), Parse::new("кошка", Some("NOUN")));
        assert_eq!(analyzer.parse("сидели"), Parse::new("сидеть", Some("VERB")));
        assert_eq!(analyzer.parse("на"), Parse::new("на", Some("PREP")));
        assert_eq!(analyzer.parse("коврах"), Parse::new("ковёр", Some("NOUN")));
        assert_eq!(analyzer.parse("стали").normal_form, "стать");
    }

    #[test]
    fn test_unknown_words_are_guessed() {
        let analyzer = DictionaryAnalyzer::embedded().unwrap();
        assert_eq!(analyzer.parse("прыгали"), Parse::new("прыгать", Some("VERB")));
    }

    #[test]
    fn test_unguessable_word_is_its_own_lemma() {
        let analyzer = DictionaryAnalyzer::embedded().unwrap().without_guessing();
        assert_eq!(analyzer.parse("Прыгали"), Parse::new("прыгали", None));
    }

    #[test]
    fn test_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "user", "lemmas": [{{"lemma": "ёж", "forms": {{"ёж": "NOUN", "ежи": "NOUN"}}}}]}}"#
        )
        .unwrap();

        let config = DictionaryConfig {
            enabled: false,
            additional_paths: vec![file.path().display().to_string()],
            guess_unknown: false,
        };
        let analyzer = DictionaryAnalyzer::from_config(&config).unwrap();

        assert_eq!(analyzer.dictionary().entry_count(), 1);
        assert_eq!(analyzer.parse("ежи"), Parse::new("ёж", Some("NOUN")));
        assert_eq!(analyzer.parse("кошки").tag, None);
    }

    #[test]
    fn test_opencorpora_dump_from_config() {
        let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
        write!(
            file,
            r#"<dictionary version="0.92"><lemmata>
<lemma id="1"><l t="прыгать"><g v="INFN"/></l><f t="прыгать"/></lemma>
<lemma id="2"><l t="прыгаю"><g v="VERB"/></l><f t="прыгаю"/><f t="прыгнули"/></lemma>
</lemmata><link_types><type id="3">INFN-VERB</type></link_types>
<links><link id="1" from="1" to="2" type="3"/></links></dictionary>"#
        )
        .unwrap();

        let config = DictionaryConfig {
            enabled: false,
            additional_paths: vec![file.path().display().to_string()],
            guess_unknown: false,
        };
        let analyzer = DictionaryAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.parse("Прыгнули"), Parse::new("прыгать", Some("VERB")));
    }

    #[test]
    fn test_unreadable_additional_dictionary_is_skipped() {
        let embedded = DictionaryAnalyzer::embedded().unwrap();
        let analyzer =
            DictionaryAnalyzer::with_additional_dicts(&["missing.json".to_string()]).unwrap();
        assert_eq!(
            analyzer.dictionary().entry_count(),
            embedded.dictionary().entry_count()
        );
    }
}
