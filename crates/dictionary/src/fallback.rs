use crate::dictionary::Word;

/// Id of the dictionary whose first chapter ships with the binary.
pub(crate) const FALLBACK_DICTIONARY_ID: &str = "cet4";

struct EmbeddedWord {
    name: &'static str,
    trans: &'static [Option<&'static str>],
    usphone: &'static str,
    ukphone: &'static str,
}

impl EmbeddedWord {
    fn to_word(&self) -> Word {
        Word {
            name: self.name.to_owned(),
            trans: self.trans.iter().map(|trans| trans.map(str::to_owned)).collect(),
            usphone: self.usphone.to_owned(),
            ukphone: self.ukphone.to_owned(),
        }
    }
}

/// First chapter of `cet4`, shown while the real word list is still on its way.
pub(crate) fn first_chapter() -> Vec<Word> {
    FIRST_CHAPTER.iter().map(EmbeddedWord::to_word).collect()
}

pub(crate) fn is_fallback_chapter(dictionary_id: &str, chapter: usize) -> bool {
    dictionary_id == FALLBACK_DICTIONARY_ID && chapter == 0
}

const FIRST_CHAPTER: [EmbeddedWord; 20] = [
    EmbeddedWord {
        name: "cancel",
        trans: &[Some("to decide that something that was officially planned will not happen")],
        usphone: "'kænsl",
        ukphone: "'kænsl",
    },
    EmbeddedWord {
        name: "explosive",
        trans: &[Some("able or likely to explode"), Some("a substance that can cause an explosion")],
        usphone: "ɪk'splosɪv; ɪk'splozɪv",
        ukphone: "ɪk'spləusɪv",
    },
    EmbeddedWord {
        name: "numerous",
        trans: &[Some("many")],
        usphone: "'numərəs",
        ukphone: "'njuːmərəs",
    },
    EmbeddedWord {
        name: "govern",
        trans: &[None, Some("to officially and legally control a country and make all the decisions about taxes, laws, public services etc")],
        usphone: "'ɡʌvɚn",
        ukphone: "'gʌvn",
    },
    EmbeddedWord {
        name: "analyse",
        trans: &[Some("to examine or think about something carefully, in order to understand it")],
        usphone: "'æn(ə)laɪz",
        ukphone: "'ænəlaɪz",
    },
    EmbeddedWord {
        name: "discourage",
        trans: &[Some("to make someone less confident or less willing to do something")],
        usphone: "dɪs'kɝɪdʒ",
        ukphone: "dɪs'kʌrɪdʒ",
    },
    EmbeddedWord {
        name: "resemble",
        trans: &[Some("to look like or be similar to someone or something")],
        usphone: "rɪ'zɛmbl",
        ukphone: "rɪ'zembl",
    },
    EmbeddedWord {
        name: "remote",
        trans: &[Some("far from towns or other places where people live")],
        usphone: "rɪ'mot",
        ukphone: "rɪ'məut",
    },
    EmbeddedWord {
        name: "salary",
        trans: &[Some("money that you receive as payment from the organization you work for, usually paid to you every month")],
        usphone: "'sæləri",
        ukphone: "'sæləri",
    },
    EmbeddedWord {
        name: "pollution",
        trans: &[Some("the process of making air, water, soil etc dangerously dirty and not suitable for people to use, or the state of being dangerously dirty")],
        usphone: "pə'luʃən",
        ukphone: "pə'luːʃn",
    },
    EmbeddedWord {
        name: "pretend",
        trans: &[Some("to behave as if something is true when in fact you know it is not, in order to deceive people or for fun")],
        usphone: "prɪ'tɛnd",
        ukphone: "prɪ'tend",
    },
    EmbeddedWord {
        name: "kettle",
        trans: &[Some("a container with a lid, a handle, and a spout,used for boiling and pouring water")],
        usphone: "'kɛtl",
        ukphone: "'ketl",
    },
    EmbeddedWord {
        name: "wreck",
        trans: &[Some("a ship that has sunk"), Some("to completely spoil something so that it cannot continue in a successful way")],
        usphone: "rɛk",
        ukphone: "rek",
    },
    EmbeddedWord {
        name: "drunk",
        trans: &[Some("unable to control your behaviour, speech etc because you have drunk too much alcohol")],
        usphone: "drʌŋk",
        ukphone: "drʌŋk",
    },
    EmbeddedWord {
        name: "calculate",
        trans: &[Some("to find out how much something will cost, how long something will take etc, by using numbers")],
        usphone: "'kælkjulet",
        ukphone: "'kælkjuleɪt",
    },
    EmbeddedWord {
        name: "persistent",
        trans: &[Some("continuing to exist or happen, especially for longer than is usual or desirable")],
        usphone: "pə'zɪstənt",
        ukphone: "pə'sɪstənt",
    },
    EmbeddedWord {
        name: "sake",
        trans: &[Some("in order to help, improve, or please someone or something")],
        usphone: "sek",
        ukphone: "seɪk",
    },
    EmbeddedWord {
        name: "conceal",
        trans: &[Some("to hide something carefully")],
        usphone: "kən'sil",
        ukphone: "kən'siːl",
    },
    EmbeddedWord {
        name: "audience",
        trans: &[Some("a group of people who come to watch and listen to someone speaking or performing in public")],
        usphone: "'ɔdɪəns",
        ukphone: "'ɔːdiəns",
    },
    EmbeddedWord {
        name: "meanwhile",
        trans: &[Some("while something else is happening")],
        usphone: "'minwaɪl",
        ukphone: "'miːnwaɪl",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_chapter_has_twenty_words() {
        let words = first_chapter();
        assert_eq!(words.len(), 20);
        assert_eq!(words[0].name, "cancel");
        assert_eq!(words[19].name, "meanwhile");
    }

    #[test]
    fn keeps_missing_translations() {
        let words = first_chapter();
        let govern = words.iter().find(|word| word.name == "govern").unwrap();
        assert_eq!(govern.trans[0], None);
        assert_eq!(govern.translations().count(), 1);
    }

    #[test]
    fn only_cet4_first_chapter_falls_back() {
        assert!(is_fallback_chapter("cet4", 0));
        assert!(!is_fallback_chapter("cet4", 1));
        assert!(!is_fallback_chapter("cet6", 0));
    }
}
