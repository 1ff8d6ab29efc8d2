use std::env;
use std::ffi::OsStr;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_guess_unknown() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Load the embedded dictionary
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra dictionaries merged over the embedded one, in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
    /// Guess lemmas for words missing from the dictionary
    #[serde(default = "default_guess_unknown")]
    pub guess_unknown: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            additional_paths: vec![],
            guess_unknown: default_guess_unknown(),
        }
    }
}

impl DictionaryConfig {
    /// Defaults plus `SLOVO_DICTIONARY_PATHS`, a PATH-style list of JSON or OpenCorpora XML files
    pub fn new() -> Self {
        let additional_paths = env::var_os("SLOVO_DICTIONARY_PATHS")
            .map(|value| split_paths(&value))
            .unwrap_or_default();

        Self {
            additional_paths,
            ..Self::default()
        }
    }
}

fn split_paths(value: &OsStr) -> Vec<String> {
    env::split_paths(value)
        .filter(|path| !path.as_os_str().is_empty())
        .map(|path| path.display().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dictionary_paths() {
        let value = env::join_paths(["dict.opcorpora.xml", "extra.json"]).unwrap();
        assert_eq!(split_paths(&value), vec!["dict.opcorpora.xml", "extra.json"]);
        assert!(split_paths(OsStr::new("")).is_empty());
    }
}
