// Word lists are the json files served next to the typing app, e.g.
// https://qwerty.kaiyi.cool/dicts/CET4_T.json

use futures::future::{BoxFuture, FutureExt};
use reqwest::Url;

use crate::{DictionaryError, Word};

/// Source of complete word lists, keyed by url.
pub trait WordListFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<Word>, DictionaryError>>;
}

#[derive(Debug, Clone)]
pub struct HttpWordListFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpWordListFetcher {
    /// `base_url` is used for dictionaries whose url is a path like `/dicts/CET4_T.json`.
    pub fn new(base_url: Option<&str>) -> Result<Self, DictionaryError> {
        let base_url = base_url
            .map(|base| {
                Url::parse(base).map_err(|error| DictionaryError::InvalidUrl {
                    url: base.to_owned(),
                    message: error.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn resolve_url(&self, url: &str) -> Result<Url, DictionaryError> {
        let parsed = match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        };
        parsed.map_err(|error| DictionaryError::InvalidUrl {
            url: url.to_owned(),
            message: error.to_string(),
        })
    }
}

impl WordListFetcher for HttpWordListFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<Vec<Word>, DictionaryError>> {
        let client = self.client.clone();
        let url = self.resolve_url(url);
        async move { get_word_list(&client, url?).await }.boxed()
    }
}

pub(crate) async fn get_word_list(
    client: &reqwest::Client,
    url: Url,
) -> Result<Vec<Word>, DictionaryError> {
    let res: reqwest::Response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(DictionaryError::Fetch)?;
    res.json::<Vec<Word>>()
        .await
        .map_err(DictionaryError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_urls_on_base() {
        let fetcher = HttpWordListFetcher::new(Some("https://qwerty.kaiyi.cool")).unwrap();
        let url = fetcher.resolve_url("/dicts/CET4_T.json").unwrap();
        assert_eq!(url.as_str(), "https://qwerty.kaiyi.cool/dicts/CET4_T.json");
    }

    #[test]
    fn absolute_urls_replace_base() {
        let fetcher = HttpWordListFetcher::new(Some("https://qwerty.kaiyi.cool")).unwrap();
        let url = fetcher.resolve_url("https://example.com/words.json").unwrap();
        assert_eq!(url.as_str(), "https://example.com/words.json");
    }

    #[test]
    fn relative_url_without_base_is_rejected() {
        let fetcher = HttpWordListFetcher::new(None).unwrap();
        let error = fetcher.resolve_url("/dicts/CET4_T.json").unwrap_err();
        assert!(matches!(error, DictionaryError::InvalidUrl { .. }));
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(HttpWordListFetcher::new(Some("not a url")).is_err());
    }

    #[tokio::test]
    async fn fetch_reports_invalid_url() {
        let fetcher = HttpWordListFetcher::new(None).unwrap();
        let result = fetcher.fetch("dicts/missing.json").await;
        assert!(matches!(result, Err(DictionaryError::InvalidUrl { .. })));
    }
}
