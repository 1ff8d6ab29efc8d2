use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default: trim and compose, so "и" + U+0306 becomes "й"
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
