use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use slovo_core::types::Parse;

fn default_weight() -> f32 {
    1.0
}

/// Replace ё with е so texts written without ё still match
pub fn fold_yo(word: &str) -> String {
    word.replace('ё', "е").replace('Ё', "Е")
}

/// One lemma with every inflected form it owns
#[derive(Debug, Clone, PartialEq)]
pub struct LemmaRecord {
    pub id: String,
    pub lemma: String,
    /// Relative likelihood among homonymous forms
    pub weight: f32,
    /// Lowercase form -> OpenCorpora POS grammeme
    pub forms: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct DictionaryJson {
    name: String,
    #[serde(default)]
    version: Option<String>,
    lemmas: Vec<LemmaJson>,
}

#[derive(Debug, Deserialize)]
struct LemmaJson {
    #[serde(default)]
    id: Option<String>,
    lemma: String,
    #[serde(default = "default_weight")]
    weight: f32,
    forms: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct FormRef {
    record: usize,
    tag: String,
}

/// Form-indexed Russian morphological dictionary
#[derive(Debug, Clone)]
pub struct RussianDictionary {
    name: String,
    version: Option<String>,
    records: Vec<LemmaRecord>,
    exact_index: HashMap<String, Vec<FormRef>>,
    folded_index: HashMap<String, Vec<FormRef>>,
}

impl RussianDictionary {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            records: Vec::new(),
            exact_index: HashMap::new(),
            folded_index: HashMap::new(),
        }
    }

    /// Parse `{"name", "version", "lemmas": [{"id"?, "lemma", "weight"?, "forms": {form: tag}}]}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: DictionaryJson = serde_json::from_str(json)?;

        let records = data
            .lemmas
            .into_iter()
            .map(|entry| {
                let lemma = entry.lemma.to_lowercase();
                LemmaRecord {
                    id: entry.id.unwrap_or_else(|| lemma.clone()),
                    forms: entry
                        .forms
                        .into_iter()
                        .map(|(form, tag)| (form.to_lowercase(), tag))
                        .collect(),
                    lemma,
                    weight: entry.weight,
                }
            })
            .collect();

        Ok(Self::from_records(data.name, data.version, records))
    }

    /// Build and index a dictionary from ready records
    pub fn from_records(
        name: impl Into<String>,
        version: Option<String>,
        records: Vec<LemmaRecord>,
    ) -> Self {
        let mut dict = Self {
            name: name.into(),
            version,
            records,
            exact_index: HashMap::new(),
            folded_index: HashMap::new(),
        };
        dict.rebuild_index();
        dict
    }

    fn rebuild_index(&mut self) {
        self.exact_index.clear();
        self.folded_index.clear();

        for (record, entry) in self.records.iter().enumerate() {
            for (form, tag) in &entry.forms {
                let form_ref = FormRef {
                    record,
                    tag: tag.clone(),
                };
                self.folded_index
                    .entry(fold_yo(form))
                    .or_default()
                    .push(form_ref.clone());
                self.exact_index
                    .entry(form.clone())
                    .or_default()
                    .push(form_ref);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn entry_count(&self) -> usize {
        self.records.len()
    }

    pub fn form_count(&self) -> usize {
        self.exact_index.len()
    }

    pub fn records(&self) -> &[LemmaRecord] {
        &self.records
    }

    /// Every parse of `word`, most likely first.
    ///
    /// Exact forms win; the ё-folded index is consulted only when nothing matches exactly.
    pub fn lookup(&self, word: &str) -> Vec<Parse> {
        let word = word.to_lowercase();
        let refs = self
            .exact_index
            .get(&word)
            .or_else(|| self.folded_index.get(&fold_yo(&word)));

        let Some(refs) = refs else {
            return Vec::new();
        };

        let mut ranked: Vec<(&LemmaRecord, &str)> = refs
            .iter()
            .map(|form_ref| (&self.records[form_ref.record], form_ref.tag.as_str()))
            .collect();
        ranked.sort_by(|(a, _), (b, _)| b.weight.total_cmp(&a.weight));

        ranked
            .into_iter()
            .map(|(record, tag)| Parse::new(record.lemma.clone(), Some(tag)))
            .collect()
    }

    pub fn best(&self, word: &str) -> Option<Parse> {
        self.lookup(word).into_iter().next()
    }

    /// Merge another dictionary into this one.
    /// Records with the same id are replaced in place, new ones are appended.
    pub fn merge(mut self, other: RussianDictionary) -> Self {
        let mut positions: HashMap<String, usize> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| (record.id.clone(), i))
            .collect();

        for record in other.records {
            match positions.get(&record.id) {
                Some(&i) => self.records[i] = record,
                None => {
                    positions.insert(record.id.clone(), self.records.len());
                    self.records.push(record);
                }
            }
        }

        self.rebuild_index();
        self
    }
}
