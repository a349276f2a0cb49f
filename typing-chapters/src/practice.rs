use dictionary::{Word, WordWithIndex};
use rand::{seq::SliceRandom, Rng};

use crate::storage::Storage;
use crate::utilities::input;

/// Similarity above which a wrong answer counts as a typo.
const CLOSE_SIMILARITY: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Correct,
    Close { similarity: f64 },
    Wrong,
    Skipped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChapterResult {
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
}

impl ChapterResult {
    pub fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Correct => self.correct += 1,
            Verdict::Close { .. } | Verdict::Wrong => self.wrong += 1,
            Verdict::Skipped => self.skipped += 1,
        }
    }
}

pub fn grade(expected: &str, typed: &str) -> Verdict {
    let typed = typed.trim();
    if matches!(&typed.to_lowercase()[..], ":s" | ":skip") {
        return Verdict::Skipped;
    }
    if typed.eq_ignore_ascii_case(expected) {
        return Verdict::Correct;
    }
    let similarity = strsim::jaro(&expected.to_lowercase(), &typed.to_lowercase());
    if similarity > CLOSE_SIMILARITY {
        Verdict::Close { similarity }
    } else {
        Verdict::Wrong
    }
}

/// Chapter order, or a shuffled copy of it.
pub fn practice_order<'a, R: Rng + ?Sized>(
    words: &'a [WordWithIndex],
    shuffle: bool,
    rng: &mut R,
) -> Vec<&'a WordWithIndex> {
    let mut order: Vec<&WordWithIndex> = words.iter().collect();
    if shuffle {
        order.shuffle(rng);
    }
    order
}

pub fn prompt_for(word: &Word) -> String {
    let mut prompt = word.translations().collect::<Vec<&str>>().join("; ");
    if prompt.is_empty() {
        prompt.push_str("(no translation)");
    }
    match (word.usphone.is_empty(), word.ukphone.is_empty()) {
        (false, false) => prompt.push_str(&format!("  US /{}/  UK /{}/", word.usphone, word.ukphone)),
        (false, true) => prompt.push_str(&format!("  US /{}/", word.usphone)),
        (true, false) => prompt.push_str(&format!("  UK /{}/", word.ukphone)),
        (true, true) => {}
    }
    prompt
}

/// Runs a typing drill over `words` and stores the result.
pub async fn practice_chapter(
    storage: &Storage,
    dict_id: &str,
    chapter: usize,
    words: &[WordWithIndex],
    shuffle: bool,
) -> anyhow::Result<ChapterResult> {
    let order = practice_order(words, shuffle, &mut rand::thread_rng());
    let mut result = ChapterResult::default();
    for (position, entry) in order.into_iter().enumerate() {
        if position != 0 {
            println!("----------------------------------------");
        }
        println!("[{}/{}] {}", position + 1, words.len(), prompt_for(&entry.word));
        let typed = input("Type the word: ")?;
        let verdict = grade(&entry.word.name, &typed);
        match verdict {
            Verdict::Correct => println!("Correct!"),
            Verdict::Close { similarity } => println!(
                "Almost ({:.0}% similar). The word is {}.",
                similarity * 100.0,
                entry.word.name
            ),
            Verdict::Wrong => println!("Incorrect. The word is {}.", entry.word.name),
            Verdict::Skipped => println!("Skipped {}.", entry.word.name),
        }
        result.add(verdict);
    }
    storage
        .record_chapter(dict_id, chapter, result.correct, result.wrong, result.skipped)
        .await?;
    tracing::info!(
        dictionary = dict_id,
        chapter,
        correct = result.correct,
        wrong = result.wrong,
        skipped = result.skipped,
        "chapter finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn word(name: &str, trans: &[Option<&str>], usphone: &str, ukphone: &str) -> Word {
        Word {
            name: name.to_owned(),
            trans: trans.iter().map(|trans| trans.map(str::to_owned)).collect(),
            usphone: usphone.to_owned(),
            ukphone: ukphone.to_owned(),
        }
    }

    #[test]
    fn grades_answers() {
        assert_eq!(grade("conceal", "conceal\n"), Verdict::Correct);
        assert_eq!(grade("conceal", "Conceal"), Verdict::Correct);
        assert!(matches!(grade("persistent", "persistant"), Verdict::Close { .. }));
        assert_eq!(grade("conceal", "kettle"), Verdict::Wrong);
        assert_eq!(grade("conceal", ":skip"), Verdict::Skipped);
    }

    #[test]
    fn counts_verdicts() {
        let mut result = ChapterResult::default();
        result.add(Verdict::Correct);
        result.add(Verdict::Close { similarity: 0.9 });
        result.add(Verdict::Wrong);
        result.add(Verdict::Skipped);
        assert_eq!(
            result,
            ChapterResult {
                correct: 1,
                wrong: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn shuffled_order_keeps_every_word() {
        let words: Vec<WordWithIndex> = (0..20)
            .map(|index| WordWithIndex {
                word: word(&format!("word{index}"), &[], "", ""),
                index,
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let plain = practice_order(&words, false, &mut rng);
        assert_eq!(plain.iter().map(|w| w.index).collect::<Vec<_>>(), (0..20).collect::<Vec<_>>());

        let mut shuffled: Vec<usize> = practice_order(&words, true, &mut rng).iter().map(|w| w.index).collect();
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn prompt_shows_translations_and_phonetics() {
        let govern = word("govern", &[None, Some("to control a country")], "'ɡʌvɚn", "'gʌvn");
        assert_eq!(prompt_for(&govern), "to control a country  US /'ɡʌvɚn/  UK /'gʌvn/");

        let bare = word("bare", &[], "", "");
        assert_eq!(prompt_for(&bare), "(no translation)");
    }
}
