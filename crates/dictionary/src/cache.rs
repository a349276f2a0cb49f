use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::word_list_api::WordListFetcher;
use crate::{DictionaryError, Word};

type WordListResult = Result<Arc<Vec<Word>>, Arc<DictionaryError>>;
type SharedFetch = Shared<BoxFuture<'static, WordListResult>>;

/// Status of a word list request, as seen at one point in time.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub data: Option<Arc<Vec<Word>>>,
    pub error: Option<Arc<DictionaryError>>,
    pub is_loading: bool,
}

impl FetchState {
    pub fn pending() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: true,
        }
    }

    pub fn ready(words: Arc<Vec<Word>>) -> Self {
        Self {
            data: Some(words),
            error: None,
            is_loading: false,
        }
    }

    pub fn failed(error: Arc<DictionaryError>) -> Self {
        Self {
            data: None,
            error: Some(error),
            is_loading: false,
        }
    }

    fn from_result(result: &WordListResult) -> Self {
        match result {
            Ok(words) => Self::ready(Arc::clone(words)),
            Err(error) => Self::failed(Arc::clone(error)),
        }
    }
}

/// Word lists keyed by url. Concurrent requests for one url share a single
/// download, and the outcome stays cached until [`WordListCache::invalidate`].
pub struct WordListCache<F> {
    fetcher: F,
    entries: Mutex<HashMap<String, SharedFetch>>,
}

impl<F: WordListFetcher> WordListCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Current state of `url` without waiting. The first call for a url starts
    /// the download on the ambient tokio runtime.
    pub fn state(&self, url: &str) -> FetchState {
        let fetch = self.request(url);
        match fetch.peek() {
            Some(result) => FetchState::from_result(result),
            None => FetchState::pending(),
        }
    }

    pub async fn load(&self, url: &str) -> FetchState {
        let fetch = self.request(url);
        FetchState::from_result(&fetch.await)
    }

    /// Returns true if something was cached for `url`.
    pub fn invalidate(&self, url: &str) -> bool {
        let removed = self.entries().remove(url).is_some();
        if removed {
            tracing::debug!(url, "word list evicted");
        }
        removed
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, SharedFetch>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request(&self, url: &str) -> SharedFetch {
        let mut entries = self.entries();
        if let Some(fetch) = entries.get(url) {
            return fetch.clone();
        }

        tracing::debug!(url, "fetching word list");
        let download = self.fetcher.fetch(url);
        let key = url.to_owned();
        let fetch = async move {
            match download.await {
                Ok(words) => {
                    tracing::info!(url = %key, count = words.len(), "word list loaded");
                    Ok(Arc::new(words))
                }
                Err(error) => {
                    tracing::warn!(url = %key, %error, "word list request failed");
                    Err(Arc::new(error))
                }
            }
        }
        .boxed()
        .shared();
        entries.insert(url.to_owned(), fetch.clone());

        // keep the download going even when the caller only polls `state`
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(fetch.clone().map(drop));
        }
        fetch
    }
}
