use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PosLabel;

/// Native tag vocabulary a backend reports in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagSet {
    /// OpenCorpora-style grammemes (NOUN, ADJF, ADJS, PRED, ...)
    Dictionary,
    /// Universal Dependencies UPOS (NOUN, ADJ, VERB, ...)
    Universal,
}

/// Lookup table from native tags to shared labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagTable {
    entries: HashMap<String, PosLabel>,
}

impl TagTable {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(tag, label)| (tag.to_string(), PosLabel::new(label)))
            .collect();
        Self { entries }
    }

    /// Parse a `{"TAG": "Label"}` JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading tag table from: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Entries from `other` override existing ones
    pub fn extend(&mut self, other: TagTable) {
        self.entries.extend(other.entries);
    }

    /// Missing, empty or unmapped tags become "Unknown"
    pub fn lookup(&self, tag: Option<&str>) -> PosLabel {
        tag.map(str::trim)
            .filter(|tag| !tag.is_empty())
            .and_then(|tag| self.entries.get(tag))
            .cloned()
            .unwrap_or_else(PosLabel::unknown)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Maps each backend's native tags onto one label vocabulary
#[derive(Debug, Clone, Default)]
pub struct TagNormalizer {
    dictionary: TagTable,
    universal: TagTable,
}

impl TagNormalizer {
    pub fn new(dictionary: TagTable, universal: TagTable) -> Self {
        Self {
            dictionary,
            universal,
        }
    }

    pub fn normalize(&self, tag_set: TagSet, tag: Option<&str>) -> PosLabel {
        self.table(tag_set).lookup(tag)
    }

    pub fn table(&self, tag_set: TagSet) -> &TagTable {
        match tag_set {
            TagSet::Dictionary => &self.dictionary,
            TagSet::Universal => &self.universal,
        }
    }

    pub fn table_mut(&mut self, tag_set: TagSet) -> &mut TagTable {
        match tag_set {
            TagSet::Dictionary => &mut self.dictionary,
            TagSet::Universal => &mut self.universal,
        }
    }
}
