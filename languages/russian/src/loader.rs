use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dictionary::RussianDictionary;
use crate::error::LoadError;
use crate::opencorpora;

fn is_xml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load embedded dictionary data
    pub fn load_embedded() -> Result<RussianDictionary, LoadError> {
        let json = include_str!("../data/dictionary.json");
        tracing::info!("Loading embedded Russian dictionary...");
        let dict = RussianDictionary::from_json(json)?;
        tracing::info!(
            "Loaded {} lemmas ({} forms)",
            dict.entry_count(),
            dict.form_count()
        );
        Ok(dict)
    }

    /// Load dictionary from file path.
    /// `.xml` files are read as OpenCorpora dumps, anything else as JSON.
    pub fn load_from_file(path: &Path) -> Result<RussianDictionary, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        tracing::info!("Loading dictionary from file: {}", path.display());
        let dict = if is_xml(path) {
            opencorpora::parse(BufReader::new(File::open(path)?))?
        } else {
            let json = std::fs::read_to_string(path)?;
            RussianDictionary::from_json(&json)?
        };
        tracing::info!("Loaded {} lemmas from file", dict.entry_count());
        Ok(dict)
    }

    /// Merge two dictionaries (later entries override earlier ones by ID)
    pub fn merge(base: RussianDictionary, additional: RussianDictionary) -> RussianDictionary {
        base.merge(additional)
    }
}
