use std::env;
use std::path::PathBuf;

use dictionary::{DictionaryError, DictionaryRegistry, DEFAULT_CHAPTER_LENGTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Words per chapter
    pub chapter_length: usize,
    pub database_url: String,
    /// Prefix for dictionaries registered with a relative url
    pub words_base_url: String,
    /// Json file replacing the built-in dictionary list
    pub dictionary_registry: Option<PathBuf>,
    /// Dictionary used until the user picks one
    pub default_dictionary: String,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let chapter_length = lookup("CHAPTER_LENGTH")
            .and_then(|v| v.parse().ok())
            .filter(|&length: &usize| length > 0)
            .unwrap_or(DEFAULT_CHAPTER_LENGTH);

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://sqlite.db".to_string());

        let words_base_url =
            lookup("WORDS_BASE_URL").unwrap_or_else(|| "https://qwerty.kaiyi.cool".to_string());

        let dictionary_registry = lookup("DICTIONARY_REGISTRY").map(PathBuf::from);

        let default_dictionary =
            lookup("DEFAULT_DICTIONARY").unwrap_or_else(|| "cet4".to_string());

        Config {
            chapter_length,
            database_url,
            words_base_url,
            dictionary_registry,
            default_dictionary,
        }
    }

    pub fn registry(&self) -> Result<DictionaryRegistry, DictionaryError> {
        match &self.dictionary_registry {
            Some(path) => DictionaryRegistry::from_path(path, self.chapter_length),
            None => Ok(DictionaryRegistry::builtin(self.chapter_length)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.chapter_length, 20);
        assert_eq!(config.database_url, "sqlite://sqlite.db");
        assert_eq!(config.default_dictionary, "cet4");
        assert!(config.dictionary_registry.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("CHAPTER_LENGTH", "15"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DEFAULT_DICTIONARY", "cet6"),
            ("DICTIONARY_REGISTRY", "dicts.json"),
        ]);
        assert_eq!(config.chapter_length, 15);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.default_dictionary, "cet6");
        assert_eq!(config.dictionary_registry, Some(PathBuf::from("dicts.json")));
    }

    #[test]
    fn ignores_invalid_chapter_length() {
        assert_eq!(config(&[("CHAPTER_LENGTH", "0")]).chapter_length, 20);
        assert_eq!(config(&[("CHAPTER_LENGTH", "many")]).chapter_length, 20);
    }

    #[test]
    fn builtin_registry_uses_chapter_length() {
        let registry = config(&[("CHAPTER_LENGTH", "100")]).registry().unwrap();
        assert_eq!(registry.descriptor("cet4").unwrap().chapter_count, 27);
    }
}
