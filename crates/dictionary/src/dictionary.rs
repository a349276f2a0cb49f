use serde::{Deserialize, Serialize};

/// A single entry of a word list, as served by the dictionary json files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub name: String,
    /// Some dictionaries leave holes in the translation list, kept as `None`.
    #[serde(default)]
    pub trans: Vec<Option<String>>,
    #[serde(default)]
    pub usphone: String,
    #[serde(default)]
    pub ukphone: String,
}

impl Word {
    pub fn translations(&self) -> impl Iterator<Item = &str> {
        self.trans.iter().filter_map(|trans| trans.as_deref())
    }
}

/// A word together with its position inside the chapter it was resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordWithIndex {
    #[serde(flatten)]
    pub word: Word,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryDescriptor {
    pub id: String,
    pub name: String,
    /// Location of the full word list, absolute or relative to the words base url.
    pub url: String,
    pub chapter_count: usize,
}

impl DictionaryDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        chapter_count: usize,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            chapter_count,
        }
    }

    /// Builds a descriptor whose chapter count covers `length` words.
    pub fn with_length(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        length: usize,
        chapter_length: usize,
    ) -> Self {
        Self::new(id, name, url, chapter_count(length, chapter_length))
    }
}

pub(crate) fn chapter_count(length: usize, chapter_length: usize) -> usize {
    if chapter_length == 0 {
        return 0;
    }
    length.div_ceil(chapter_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_word_with_missing_translation() {
        let json = r#"{
            "name": "govern",
            "trans": [null, "to officially control a country"],
            "usphone": "'ɡʌvɚn",
            "ukphone": "'gʌvn"
        }"#;
        let word: Word = serde_json::from_str(json).unwrap();
        assert_eq!(word.name, "govern");
        assert_eq!(word.trans.len(), 2);
        assert_eq!(word.trans[0], None);
        assert_eq!(
            word.translations().collect::<Vec<_>>(),
            vec!["to officially control a country"]
        );
    }

    #[test]
    fn word_without_phonetics_defaults_to_empty() {
        let word: Word = serde_json::from_str(r#"{"name": "kettle"}"#).unwrap();
        assert!(word.trans.is_empty());
        assert_eq!(word.usphone, "");
        assert_eq!(word.ukphone, "");
    }

    #[test]
    fn word_with_index_serializes_flat() {
        let word = WordWithIndex {
            word: Word {
                name: "sake".to_owned(),
                trans: vec![Some("in order to help".to_owned())],
                usphone: "sek".to_owned(),
                ukphone: "seɪk".to_owned(),
            },
            index: 3,
        };
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["name"], "sake");
        assert_eq!(value["index"], 3);
    }

    #[test]
    fn chapter_count_rounds_up() {
        assert_eq!(chapter_count(50, 20), 3);
        assert_eq!(chapter_count(40, 20), 2);
        assert_eq!(chapter_count(0, 20), 0);
        assert_eq!(chapter_count(10, 0), 0);
        let descriptor = DictionaryDescriptor::with_length("cet4", "CET-4", "/dicts/CET4_T.json", 2607, 20);
        assert_eq!(descriptor.chapter_count, 131);
    }
}
