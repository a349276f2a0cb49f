use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryDescriptor;
use crate::DictionaryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    /// Number of words in the list.
    pub length: usize,
}

/// The dictionaries a user can pick from.
#[derive(Debug, Clone)]
pub struct DictionaryRegistry {
    entries: Vec<RegistryEntry>,
    chapter_length: usize,
}

impl DictionaryRegistry {
    pub fn builtin(chapter_length: usize) -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(id, name, description, url, length)| RegistryEntry {
                id: id.to_owned(),
                name: name.to_owned(),
                description: Some(description.to_owned()),
                url: url.to_owned(),
                length,
            })
            .collect();
        Self::new(entries, chapter_length)
    }

    pub fn new(entries: Vec<RegistryEntry>, chapter_length: usize) -> Self {
        Self {
            entries,
            chapter_length,
        }
    }

    /// Parses a json array of [`RegistryEntry`].
    pub fn from_json(json: &str, chapter_length: usize) -> Result<Self, DictionaryError> {
        let entries: Vec<RegistryEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries, chapter_length))
    }

    pub fn from_path(path: impl AsRef<Path>, chapter_length: usize) -> Result<Self, DictionaryError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json, chapter_length)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn descriptor(&self, id: &str) -> Result<DictionaryDescriptor, DictionaryError> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| self.describe(entry))
            .ok_or_else(|| DictionaryError::UnknownDictionary(id.to_owned()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = DictionaryDescriptor> + '_ {
        self.entries.iter().map(|entry| self.describe(entry))
    }

    fn describe(&self, entry: &RegistryEntry) -> DictionaryDescriptor {
        DictionaryDescriptor::with_length(
            entry.id.clone(),
            entry.name.clone(),
            entry.url.clone(),
            entry.length,
            self.chapter_length,
        )
    }
}

const BUILTIN: &[(&str, &str, &str, &str, usize)] = &[
    ("cet4", "CET-4", "College English Test band 4", "/dicts/CET4_T.json", 2607),
    ("cet6", "CET-6", "College English Test band 6", "/dicts/CET6_T.json", 2345),
    ("kaoyan", "Kaoyan", "Postgraduate entrance exam vocabulary", "/dicts/KaoYan_3_T.json", 3728),
    ("toefl", "TOEFL", "TOEFL vocabulary", "/dicts/TOEFL_3_T.json", 4264),
    ("ielts", "IELTS", "IELTS vocabulary", "/dicts/IELTS_3_T.json", 3575),
];
