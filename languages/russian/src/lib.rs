pub mod analyzer;
pub mod dictionary;
pub mod error;
pub mod guesser;
pub mod loader;
pub mod opencorpora;
pub mod source;
pub mod statistical;
pub mod tags;

pub use analyzer::DictionaryAnalyzer;
pub use dictionary::{LemmaRecord, RussianDictionary};
pub use error::{LoadError, ModelError};
pub use guesser::SuffixGuesser;
pub use loader::DictionaryLoader;
pub use source::{FileSource, HttpSource, ModelSource, load_from_config, load_model};
pub use statistical::{StatisticalAnalyzer, StatisticalModel};
pub use tags::{default_normalizer, normalizer_from_config};
