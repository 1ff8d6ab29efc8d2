use std::sync::Arc;

use regex::Regex;

use crate::error::Result;

/// Cyrillic letters, optionally joined by single hyphens ("кто-то")
pub const CYRILLIC_WORD_PATTERN: &str = r"[А-Яа-яЁё]+(?:-[А-Яа-яЁё]+)*";

/// Word occurrence borrowed from the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Index among the words of the text
    pub position: usize,
    /// Byte offsets into the input
    pub start: usize,
    pub end: usize,
}

/// Splits text into word tokens using a regular expression
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    pattern: Arc<Regex>,
    exact: Arc<Regex>,
}

impl WordTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_pattern(CYRILLIC_WORD_PATTERN)
    }

    /// Tokenizer for a different alphabet or word shape
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let exact = Regex::new(&format!("^(?:{pattern})$"))?;
        let pattern = Regex::new(pattern)?;

        Ok(Self {
            pattern: Arc::new(pattern),
            exact: Arc::new(exact),
        })
    }

    /// Lazily yields the words of `text` from left to right.
    /// Calling again restarts from the beginning.
    pub fn tokens<'t>(&self, text: &'t str) -> impl Iterator<Item = Token<'t>> {
        self.pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, m)| Token {
                text: m.as_str(),
                position,
                start: m.start(),
                end: m.end(),
            })
    }

    pub fn has_words(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Whole-string match against the word pattern
    pub fn is_word(&self, candidate: &str) -> bool {
        self.exact.is_match(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &WordTokenizer, input: &str) -> Vec<String> {
        tokenizer.tokens(input).map(|t| t.text.to_string()).collect()
    }

    #[test]
    fn test_cyrillic_words_in_order() {
        let tokenizer = WordTokenizer::new().unwrap();
        assert_eq!(
            texts(&tokenizer, "Кошка сидела. Кошки сидели на коврах."),
            vec!["Кошка", "сидела", "Кошки", "сидели", "на", "коврах"]
        );
    }

    #[test]
    fn test_hyphenated_words_stay_whole() {
        let tokenizer = WordTokenizer::new().unwrap();
        assert_eq!(
            texts(&tokenizer, "Кто-то пришёл из-за угла - быстро-"),
            vec!["Кто-то", "пришёл", "из-за", "угла", "быстро"]
        );
    }

    #[test]
    fn test_separators_are_skipped() {
        let tokenizer = WordTokenizer::new().unwrap();
        assert_eq!(
            texts(&tokenizer, "В 2024 году hello, мир!"),
            vec!["В", "году", "мир"]
        );
    }

    #[test]
    fn test_separator_only_text_has_no_tokens() {
        let tokenizer = WordTokenizer::new().unwrap();
        assert_eq!(tokenizer.tokens("123 ... hello -- !").count(), 0);
        assert!(!tokenizer.has_words("  \n\t"));
    }

    #[test]
    fn test_offsets_and_positions() {
        let tokenizer = WordTokenizer::new().unwrap();
        let tokens: Vec<_> = tokenizer.tokens("да, нет").collect();

        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 1);
        assert_eq!(&"да, нет"[tokens[1].start..tokens[1].end], "нет");
        assert_eq!(tokens[0].text, "да");
    }

    #[test]
    fn test_tokens_restart() {
        let tokenizer = WordTokenizer::new().unwrap();
        let text = "раз два три";
        assert_eq!(tokenizer.tokens(text).count(), 3);
        assert_eq!(tokenizer.tokens(text).count(), 3);
    }

    #[test]
    fn test_is_word_requires_full_match() {
        let tokenizer = WordTokenizer::new().unwrap();
        assert!(tokenizer.is_word("кто-то"));
        assert!(tokenizer.is_word("Ёж"));
        assert!(!tokenizer.is_word("т.е."));
        assert!(!tokenizer.is_word("слово,"));
        assert!(!tokenizer.is_word("-слово"));
        assert!(!tokenizer.is_word(""));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(WordTokenizer::with_pattern("[unclosed").is_err());
    }
}
