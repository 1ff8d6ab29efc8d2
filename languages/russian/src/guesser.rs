use slovo_core::types::Parse;

/// Stem characters that must remain after stripping an ending
const MIN_STEM_CHARS: usize = 2;

/// Inflectional ending mapped back to its dictionary form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRule {
    pub ending: &'static str,
    pub replacement: &'static str,
    pub tag: &'static str,
}

const fn rule(ending: &'static str, replacement: &'static str, tag: &'static str) -> GuessRule {
    GuessRule {
        ending,
        replacement,
        tag,
    }
}

const DEFAULT_RULES: &[GuessRule] = &[
    // Infinitives
    rule("ться", "ться", "INFN"),
    rule("ать", "ать", "INFN"),
    rule("ять", "ять", "INFN"),
    rule("еть", "еть", "INFN"),
    rule("ить", "ить", "INFN"),
    rule("уть", "уть", "INFN"),
    rule("оть", "оть", "INFN"),
    rule("ыть", "ыть", "INFN"),
    // Present tense
    rule("ует", "овать", "VERB"),
    rule("уют", "овать", "VERB"),
    rule("ает", "ать", "VERB"),
    rule("ают", "ать", "VERB"),
    rule("яет", "ять", "VERB"),
    rule("яют", "ять", "VERB"),
    rule("ится", "иться", "VERB"),
    rule("ается", "аться", "VERB"),
    // Past tense
    rule("ал", "ать", "VERB"),
    rule("ала", "ать", "VERB"),
    rule("ало", "ать", "VERB"),
    rule("али", "ать", "VERB"),
    rule("ял", "ять", "VERB"),
    rule("яла", "ять", "VERB"),
    rule("яли", "ять", "VERB"),
    rule("ел", "еть", "VERB"),
    rule("ела", "еть", "VERB"),
    rule("ели", "еть", "VERB"),
    rule("ил", "ить", "VERB"),
    rule("ила", "ить", "VERB"),
    rule("ило", "ить", "VERB"),
    rule("или", "ить", "VERB"),
    // Participles
    rule("ующий", "овать", "PRTF"),
    rule("ющий", "ть", "PRTF"),
    // Full adjectives
    rule("ый", "ый", "ADJF"),
    rule("ий", "ий", "ADJF"),
    rule("ний", "ний", "ADJF"),
    rule("шний", "шний", "ADJF"),
    rule("жний", "жний", "ADJF"),
    rule("ая", "ый", "ADJF"),
    rule("яя", "ий", "ADJF"),
    rule("ое", "ый", "ADJF"),
    rule("ые", "ый", "ADJF"),
    rule("ие", "ий", "ADJF"),
    rule("ого", "ый", "ADJF"),
    rule("его", "ий", "ADJF"),
    rule("ому", "ый", "ADJF"),
    rule("ему", "ий", "ADJF"),
    rule("ым", "ый", "ADJF"),
    rule("им", "ий", "ADJF"),
    rule("ых", "ый", "ADJF"),
    rule("их", "ий", "ADJF"),
    rule("ыми", "ый", "ADJF"),
    rule("ими", "ий", "ADJF"),
    rule("ую", "ый", "ADJF"),
    rule("юю", "ий", "ADJF"),
    // Nouns
    rule("ость", "ость", "NOUN"),
    rule("ости", "ость", "NOUN"),
    rule("остью", "ость", "NOUN"),
    rule("остей", "ость", "NOUN"),
    rule("ние", "ние", "NOUN"),
    rule("ния", "ние", "NOUN"),
    rule("нию", "ние", "NOUN"),
    rule("нием", "ние", "NOUN"),
    rule("ений", "ение", "NOUN"),
    rule("аний", "ание", "NOUN"),
    rule("ция", "ция", "NOUN"),
    rule("ции", "ция", "NOUN"),
    rule("цию", "ция", "NOUN"),
    rule("цией", "ция", "NOUN"),
    rule("ций", "ция", "NOUN"),
    rule("тель", "тель", "NOUN"),
    rule("теля", "тель", "NOUN"),
    rule("телю", "тель", "NOUN"),
    rule("телем", "тель", "NOUN"),
    rule("тели", "тель", "NOUN"),
    rule("телей", "тель", "NOUN"),
    rule("ка", "ка", "NOUN"),
    rule("ки", "ка", "NOUN"),
    rule("ке", "ка", "NOUN"),
    rule("ку", "ка", "NOUN"),
    rule("кой", "ка", "NOUN"),
    rule("ками", "ка", "NOUN"),
    rule("ках", "ка", "NOUN"),
    // Adverbs
    rule("ски", "ски", "ADVB"),
];

/// Lemma guesser for words missing from the dictionary
#[derive(Debug, Clone)]
pub struct SuffixGuesser {
    /// Longest ending first, ties in table order
    rules: Vec<GuessRule>,
}

impl Default for SuffixGuesser {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }
}

impl SuffixGuesser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut rules: Vec<GuessRule>) -> Self {
        rules.sort_by(|a, b| b.ending.chars().count().cmp(&a.ending.chars().count()));
        Self { rules }
    }

    /// Guess a lemma and tag from the longest matching ending
    pub fn guess(&self, word: &str) -> Option<Parse> {
        let word = word.to_lowercase();
        let word_chars = word.chars().count();

        self.rules.iter().find_map(|rule| {
            let stem = word.strip_suffix(rule.ending)?;
            if word_chars - rule.ending.chars().count() < MIN_STEM_CHARS {
                return None;
            }
            tracing::trace!("Guessed {} via -{}", word, rule.ending);
            Some(Parse::new(format!("{stem}{}", rule.replacement), Some(rule.tag)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess(word: &str) -> Option<(String, String)> {
        SuffixGuesser::new()
            .guess(word)
            .map(|p| (p.normal_form, p.tag.unwrap_or_default()))
    }

    fn pair(lemma: &str, tag: &str) -> Option<(String, String)> {
        Some((lemma.to_string(), tag.to_string()))
    }

    #[test]
    fn test_verb_forms() {
        assert_eq!(guess("прыгали"), pair("прыгать", "VERB"));
        assert_eq!(guess("рисует"), pair("рисовать", "VERB"));
        assert_eq!(guess("Гуляет"), pair("гулять", "VERB"));
        assert_eq!(guess("бегать"), pair("бегать", "INFN"));
    }

    #[test]
    fn test_longest_ending_wins() {
        assert_eq!(guess("читающий"), pair("читать", "PRTF"));
        assert_eq!(guess("рисующий"), pair("рисовать", "PRTF"));
        assert_eq!(guess("радостью"), pair("радость", "NOUN"));
        assert_eq!(guess("по-русски"), pair("по-русски", "ADVB"));
    }

    #[test]
    fn test_adjectives_and_nouns() {
        assert_eq!(guess("зелёная"), pair("зелёный", "ADJF"));
        assert_eq!(guess("синими"), pair("синий", "ADJF"));
        assert_eq!(guess("информации"), pair("информация", "NOUN"));
        assert_eq!(guess("строителя"), pair("строитель", "NOUN"));
    }

    #[test]
    fn test_soft_adjectives_stay_adjectives() {
        assert_eq!(guess("синий"), pair("синий", "ADJF"));
        assert_eq!(guess("последний"), pair("последний", "ADJF"));
        assert_eq!(guess("летний"), pair("летний", "ADJF"));
        assert_eq!(guess("домашний"), pair("домашний", "ADJF"));
        assert_eq!(guess("решений"), pair("решение", "NOUN"));
        assert_eq!(guess("заданий"), pair("задание", "NOUN"));
    }

    #[test]
    fn test_soft_sign_nouns_are_not_infinitives() {
        assert_eq!(guess("часть"), None);
        assert_eq!(guess("новость"), pair("новость", "NOUN"));
        assert_eq!(guess("колоть"), pair("колоть", "INFN"));
        assert_eq!(guess("тянуть"), pair("тянуть", "INFN"));
    }

    #[test]
    fn test_short_stems_are_not_guessed() {
        assert_eq!(guess("кий"), None);
        assert_eq!(guess("ёж"), None);
        assert_eq!(guess(""), None);
    }
}
