use std::sync::Arc;

use crate::cache::FetchState;
use crate::dictionary::{DictionaryDescriptor, Word, WordWithIndex};
use crate::fallback::{first_chapter, is_fallback_chapter};
use crate::DictionaryError;

pub const DEFAULT_CHAPTER_LENGTH: usize = 20;

/// Outcome of checking a chapter selection against a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterCheck {
    InRange(usize),
    OutOfRange { requested: usize, corrected: usize },
}

impl ChapterCheck {
    /// Chapter the selection has to move to, if any.
    pub fn reset(self) -> Option<usize> {
        match self {
            ChapterCheck::InRange(_) => None,
            ChapterCheck::OutOfRange { corrected, .. } => Some(corrected),
        }
    }
}

pub fn validate_chapter(descriptor: &DictionaryDescriptor, chapter: usize) -> ChapterCheck {
    if chapter >= descriptor.chapter_count {
        ChapterCheck::OutOfRange {
            requested: chapter,
            corrected: 0,
        }
    } else {
        ChapterCheck::InRange(chapter)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// `None` until the word list has been fetched, unless the embedded first
    /// chapter applies.
    pub words: Option<Vec<WordWithIndex>>,
    pub is_loading: bool,
    pub error: Option<Arc<DictionaryError>>,
    /// Chapter the selection has to be moved to, when it was out of range.
    pub chapter_reset: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterWordResolver {
    chapter_length: usize,
}

impl Default for ChapterWordResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CHAPTER_LENGTH)
    }
}

impl ChapterWordResolver {
    pub fn new(chapter_length: usize) -> Self {
        Self {
            chapter_length: chapter_length.max(1),
        }
    }

    /// Words of `chapter` inside the full list, clipped to its end.
    pub fn chapter_slice<'a>(&self, words: &'a [Word], chapter: usize) -> &'a [Word] {
        let start = chapter.saturating_mul(self.chapter_length).min(words.len());
        let end = chapter
            .saturating_add(1)
            .saturating_mul(self.chapter_length)
            .min(words.len());
        &words[start..end]
    }

    /// Picks the words to practice for `chapter`.
    ///
    /// An out-of-range chapter is reported through [`Resolution::chapter_reset`]
    /// but the words are still cut with the requested value, so the caller
    /// sees an empty chapter until it applies the reset and resolves again.
    pub fn resolve(
        &self,
        descriptor: &DictionaryDescriptor,
        chapter: usize,
        fetch: &FetchState,
    ) -> Resolution {
        let fallback = is_fallback_chapter(&descriptor.id, chapter);

        let chapter_reset = validate_chapter(descriptor, chapter).reset();
        if chapter_reset.is_some() {
            tracing::debug!(
                dictionary = %descriptor.id,
                chapter,
                chapter_count = descriptor.chapter_count,
                "chapter out of range, requesting reset"
            );
        }

        let words = if fallback {
            Some(annotate(first_chapter()))
        } else {
            fetch
                .data
                .as_deref()
                .map(|words| annotate(self.chapter_slice(words, chapter).to_vec()))
        };

        Resolution {
            words,
            is_loading: fetch.is_loading,
            error: fetch.error.clone(),
            chapter_reset,
        }
    }
}

fn annotate(words: Vec<Word>) -> Vec<WordWithIndex> {
    words
        .into_iter()
        .enumerate()
        .map(|(index, word)| WordWithIndex { word, index })
        .collect()
}
