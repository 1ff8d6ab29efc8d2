use std::path::Path;

use slovo_config::tags::TagsConfig;
use slovo_core::tags::{TagNormalizer, TagSet, TagTable};

/// Shared labels
pub mod labels {
    pub const NOUN: &str = "Noun";
    pub const ADJECTIVE: &str = "Adjective";
    pub const SHORT_ADJECTIVE: &str = "Short adjective";
    pub const COMPARATIVE: &str = "Comparative";
    pub const VERB: &str = "Verb";
    pub const INFINITIVE: &str = "Infinitive";
    pub const PARTICIPLE: &str = "Participle";
    pub const SHORT_PARTICIPLE: &str = "Short participle";
    pub const GERUND: &str = "Gerund";
    pub const NUMERAL: &str = "Numeral";
    pub const ADVERB: &str = "Adverb";
    pub const PRONOUN: &str = "Pronoun";
    pub const PREDICATIVE: &str = "Predicative";
    pub const PREPOSITION: &str = "Preposition";
    pub const CONJUNCTION: &str = "Conjunction";
    pub const PARTICLE: &str = "Particle";
    pub const INTERJECTION: &str = "Interjection";
}

/// OpenCorpora POS grammemes reported by the dictionary backend
pub fn opencorpora_table() -> TagTable {
    use labels::*;

    TagTable::from_pairs([
        ("NOUN", NOUN),
        ("ADJF", ADJECTIVE),
        ("ADJS", SHORT_ADJECTIVE),
        ("COMP", COMPARATIVE),
        ("VERB", VERB),
        ("INFN", INFINITIVE),
        ("PRTF", PARTICIPLE),
        ("PRTS", SHORT_PARTICIPLE),
        ("GRND", GERUND),
        ("NUMR", NUMERAL),
        ("ADVB", ADVERB),
        ("NPRO", PRONOUN),
        ("PRED", PREDICATIVE),
        ("PREP", PREPOSITION),
        ("CONJ", CONJUNCTION),
        ("PRCL", PARTICLE),
        ("INTJ", INTERJECTION),
    ])
}

/// Universal Dependencies UPOS tags reported by the statistical backend.
/// PUNCT, SYM and X stay unmapped.
pub fn universal_table() -> TagTable {
    use labels::*;

    TagTable::from_pairs([
        ("NOUN", NOUN),
        ("PROPN", NOUN),
        ("ADJ", ADJECTIVE),
        ("VERB", VERB),
        ("AUX", VERB),
        ("ADV", ADVERB),
        ("PRON", PRONOUN),
        ("DET", PRONOUN),
        ("NUM", NUMERAL),
        ("ADP", PREPOSITION),
        ("CCONJ", CONJUNCTION),
        ("SCONJ", CONJUNCTION),
        ("PART", PARTICLE),
        ("INTJ", INTERJECTION),
    ])
}

pub fn default_normalizer() -> TagNormalizer {
    TagNormalizer::new(opencorpora_table(), universal_table())
}

/// Built-in tables extended with the configured override files
pub fn normalizer_from_config(config: &TagsConfig) -> slovo_core::Result<TagNormalizer> {
    let mut normalizer = default_normalizer();

    let overrides = [
        (TagSet::Dictionary, &config.dictionary_overrides),
        (TagSet::Universal, &config.statistical_overrides),
    ];
    for (tag_set, path) in overrides {
        if let Some(path) = path {
            let table = TagTable::load(Path::new(path))?;
            tracing::info!("Applying {} {:?} tag overrides", table.len(), tag_set);
            normalizer.table_mut(tag_set).extend(table);
        }
    }

    Ok(normalizer)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_tables_share_labels() {
        let tags = default_normalizer();
        let dict = |tag| tags.normalize(TagSet::Dictionary, Some(tag));
        let upos = |tag| tags.normalize(TagSet::Universal, Some(tag));

        assert_eq!(dict("NOUN"), upos("PROPN"));
        assert_eq!(dict("ADJF"), upos("ADJ"));
        assert_eq!(dict("PREP"), upos("ADP"));
        assert_eq!(dict("NPRO"), upos("DET"));
        assert_eq!(dict("ADJS").as_str(), labels::SHORT_ADJECTIVE);
        assert!(upos("PUNCT").is_unknown());
        assert!(upos("X").is_unknown());
        assert!(dict("LATN").is_unknown());
    }

    #[test]
    fn test_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"PUNCT": "Punctuation", "AUX": "Auxiliary"}}"#).unwrap();

        let config = TagsConfig {
            dictionary_overrides: None,
            statistical_overrides: Some(file.path().display().to_string()),
        };
        let tags = normalizer_from_config(&config).unwrap();

        assert_eq!(tags.normalize(TagSet::Universal, Some("PUNCT")).as_str(), "Punctuation");
        assert_eq!(tags.normalize(TagSet::Universal, Some("AUX")).as_str(), "Auxiliary");
        assert_eq!(tags.normalize(TagSet::Universal, Some("VERB")).as_str(), labels::VERB);
        assert!(tags.normalize(TagSet::Dictionary, Some("PUNCT")).is_unknown());
    }

    #[test]
    fn test_missing_override_file() {
        let config = TagsConfig {
            dictionary_overrides: Some("missing-tags.json".to_string()),
            statistical_overrides: None,
        };
        assert!(normalizer_from_config(&config).is_err());
    }
}
