mod cache;
mod dictionary;
mod fallback;
mod registry;
mod resolver;
mod word_list_api;

use fallback::is_fallback_chapter;

pub use cache::{FetchState, WordListCache};
pub use dictionary::{DictionaryDescriptor, Word, WordWithIndex};
pub use registry::{DictionaryRegistry, RegistryEntry};
pub use resolver::{
    validate_chapter, ChapterCheck, ChapterWordResolver, Resolution, DEFAULT_CHAPTER_LENGTH,
};
pub use word_list_api::{HttpWordListFetcher, WordListFetcher};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to fetch word list: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("failed to parse word list: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("invalid word list url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("unknown dictionary {0:?}")]
    UnknownDictionary(String),
    #[error("invalid dictionary registry: {0}")]
    Registry(#[from] serde_json::Error),
    #[error("failed to read dictionary registry: {0}")]
    Io(#[from] std::io::Error),
}

/// Word lists of the selected dictionaries, cut into chapters.
pub struct Dictionary<F = HttpWordListFetcher> {
    cache: WordListCache<F>,
    resolver: ChapterWordResolver,
}

impl Dictionary {
    pub fn new(base_url: Option<&str>, chapter_length: usize) -> Result<Self, DictionaryError> {
        let fetcher = HttpWordListFetcher::new(base_url)?;
        Ok(Self::with_fetcher(fetcher, chapter_length))
    }
}

impl<F: WordListFetcher> Dictionary<F> {
    pub fn with_fetcher(fetcher: F, chapter_length: usize) -> Self {
        Self {
            cache: WordListCache::new(fetcher),
            resolver: ChapterWordResolver::new(chapter_length),
        }
    }

    /// Starts downloading the word list of `descriptor` without waiting for it.
    pub fn prefetch(&self, descriptor: &DictionaryDescriptor) {
        self.cache.state(&descriptor.url);
    }

    /// Resolves the chapter from whatever the cache holds right now, starting the
    /// download if nobody asked for this word list yet.
    pub fn chapter_words_now(&self, descriptor: &DictionaryDescriptor, chapter: usize) -> Resolution {
        let state = self.cache.state(&descriptor.url);
        self.resolver.resolve(descriptor, chapter, &state)
    }

    /// Resolves the chapter once the word list has been fetched. The embedded
    /// first chapter is returned straight away without waiting.
    pub async fn chapter_words(&self, descriptor: &DictionaryDescriptor, chapter: usize) -> Resolution {
        if is_fallback_chapter(&descriptor.id, chapter) {
            return self.chapter_words_now(descriptor, chapter);
        }
        let state = self.cache.load(&descriptor.url).await;
        self.resolver.resolve(descriptor, chapter, &state)
    }

    /// Drops the cached word list so the next request downloads it again.
    pub fn refresh(&self, descriptor: &DictionaryDescriptor) -> bool {
        self.cache.invalidate(&descriptor.url)
    }
}
