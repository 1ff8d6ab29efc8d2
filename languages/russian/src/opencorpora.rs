use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::dictionary::{LemmaRecord, RussianDictionary};
use crate::error::LoadError;

/// Link types whose dependent lemma is folded into the main one,
/// so "читал", "читающий" and "читая" all lemmatize to "читать"
const MERGED_LINK_TYPES: &[&str] = &[
    "ADJF-ADJS",
    "ADJF-COMP",
    "INFN-VERB",
    "INFN-PRTF",
    "INFN-GRND",
    "PRTF-PRTS",
    "ADJF-SUPR_ejsh",
    "ADJF-SUPR_ajsh",
    "ADJF-SUPR_suppl",
    "ADJF-SUPR_nai",
    "ADJF-SUPR_slng",
];

/// Guards against link cycles in damaged dumps
const MAX_LINK_DEPTH: usize = 8;

/// Tag for lemmata without a part-of-speech grammeme
const UNKNOWN_TAG: &str = "UNKN";

#[derive(Debug, Default)]
struct RawLemma {
    id: u32,
    normal_form: String,
    pos: Option<String>,
    forms: Vec<String>,
}

#[derive(Debug, Default)]
struct DumpReader {
    version: Option<String>,
    lemmata: Vec<RawLemma>,
    current: Option<RawLemma>,
    in_normal_form: bool,
    link_types: HashMap<u32, String>,
    current_type: Option<u32>,
    /// Dependent lemma id -> main lemma id
    parents: HashMap<u32, u32>,
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, LoadError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn required(element: &BytesStart<'_>, name: &str) -> Result<String, LoadError> {
    attribute(element, name)?.ok_or_else(|| {
        LoadError::Malformed(format!(
            "<{}> without {}",
            String::from_utf8_lossy(element.name().as_ref()),
            name
        ))
    })
}

fn required_id(element: &BytesStart<'_>, name: &str) -> Result<u32, LoadError> {
    let value = required(element, name)?;
    value
        .parse()
        .map_err(|_| LoadError::Malformed(format!("{name}=\"{value}\" is not a number")))
}

impl DumpReader {
    fn element(&mut self, element: &BytesStart<'_>) -> Result<(), LoadError> {
        match element.name().as_ref() {
            b"dictionary" => {
                self.version = attribute(element, "version")?;
            }
            b"lemma" => {
                self.current = Some(RawLemma {
                    id: required_id(element, "id")?,
                    ..RawLemma::default()
                });
            }
            b"l" => {
                if let Some(lemma) = self.current.as_mut() {
                    lemma.normal_form = required(element, "t")?.to_lowercase();
                    self.in_normal_form = true;
                }
            }
            b"g" => {
                // The first grammeme of the normal form is the part of speech
                if let Some(lemma) = self.current.as_mut() {
                    if self.in_normal_form && lemma.pos.is_none() {
                        lemma.pos = Some(required(element, "v")?);
                    }
                }
            }
            b"f" => {
                if let Some(lemma) = self.current.as_mut() {
                    lemma.forms.push(required(element, "t")?.to_lowercase());
                }
            }
            b"type" => {
                self.current_type = Some(required_id(element, "id")?);
            }
            b"link" => {
                let link_type = required_id(element, "type")?;
                let merged = self
                    .link_types
                    .get(&link_type)
                    .is_some_and(|name| MERGED_LINK_TYPES.contains(&name.as_str()));
                if merged {
                    let from = required_id(element, "from")?;
                    let to = required_id(element, "to")?;
                    self.parents.insert(to, from);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"l" => self.in_normal_form = false,
            b"lemma" => {
                if let Some(lemma) = self.current.take() {
                    self.lemmata.push(lemma);
                }
            }
            b"type" => self.current_type = None,
            _ => {}
        }
    }

    fn root(&self, mut id: u32) -> u32 {
        for _ in 0..MAX_LINK_DEPTH {
            match self.parents.get(&id) {
                Some(&parent) => id = parent,
                None => break,
            }
        }
        id
    }

    /// One record per main lemma; each form keeps the tag of the lemma it came from
    fn into_records(self) -> Vec<LemmaRecord> {
        let normal_forms: HashMap<u32, String> = self
            .lemmata
            .iter()
            .map(|lemma| (lemma.id, lemma.normal_form.clone()))
            .collect();
        let roots: Vec<u32> = self.lemmata.iter().map(|lemma| self.root(lemma.id)).collect();

        let mut positions: HashMap<u32, usize> = HashMap::new();
        let mut records: Vec<LemmaRecord> = Vec::new();

        for (lemma, root) in self.lemmata.into_iter().zip(roots) {
            let root = if normal_forms.contains_key(&root) {
                root
            } else {
                lemma.id
            };

            let position = *positions.entry(root).or_insert_with(|| {
                records.push(LemmaRecord {
                    id: format!("opencorpora:{root}"),
                    lemma: normal_forms
                        .get(&root)
                        .cloned()
                        .unwrap_or_else(|| lemma.normal_form.clone()),
                    weight: 1.0,
                    forms: BTreeMap::new(),
                });
                records.len() - 1
            });

            let tag = lemma.pos.unwrap_or_else(|| UNKNOWN_TAG.to_string());
            let forms = &mut records[position].forms;
            for form in lemma.forms {
                forms.entry(form).or_insert_with(|| tag.clone());
            }
        }

        records
    }
}

/// Parse an OpenCorpora dictionary dump (`dict.opcorpora.xml`).
///
/// Lemmata joined by adjective, verb and participle links are folded into
/// one record, so every form maps to the infinitive or the full adjective.
pub fn parse<R: BufRead>(input: R) -> Result<RussianDictionary, LoadError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut dump = DumpReader::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) => dump.element(&element)?,
            Event::Empty(element) => {
                dump.element(&element)?;
                dump.end(element.name().as_ref());
            }
            Event::Text(text) => {
                if let Some(id) = dump.current_type {
                    dump.link_types.insert(id, text.unescape()?.trim().to_string());
                }
            }
            Event::End(element) => dump.end(element.name().as_ref()),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        "OpenCorpora dump: {} lemmata, {} merging links",
        dump.lemmata.len(),
        dump.parents.len()
    );

    let version = dump.version.clone();
    Ok(RussianDictionary::from_records(
        "opencorpora",
        version,
        dump.into_records(),
    ))
}
