use dashmap::DashMap;
use reqwest::{Client, Url};
use thiserror::Error;

use crate::data_models::PageRecord;
use crate::extract;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid page url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Fetches pages and keeps every extracted record for the lifetime of the
/// widget. No eviction and no revalidation: a URL is fetched over the
/// network at most once per session, except that failures are not cached
/// and will be retried by a later search.
pub struct PageFetcher {
    client: Client,
    base: Url,
    cache: DashMap<String, PageRecord>,
}

impl PageFetcher {
    pub fn new(client: Client, base: Url) -> PageFetcher {
        PageFetcher {
            client,
            base,
            cache: DashMap::new(),
        }
    }

    /// Returns the extracted record for `url`, from cache when possible.
    ///
    /// Manifest entries may be site-relative; they are resolved against the
    /// deployment root. The response status is not inspected: an error page
    /// served with a body is still a page, only transport failures are
    /// errors. Two concurrent calls for the same uncached URL may both hit
    /// the network and both insert; they produce equivalent records and the
    /// last write wins.
    pub async fn fetch_page_text(&self, url: &str) -> Result<PageRecord, FetchError> {
        if let Some(cached) = self.cache.get(url) {
            log::debug!("page cache hit for {url}");
            return Ok(cached.value().clone());
        }

        let resolved = self.base.join(url)?;
        let response = self.client.get(resolved).send().await?;
        let html = response.text().await?;

        let record = extract::page_record(url, &html);
        self.cache.insert(url.to_string(), record.clone());
        Ok(record)
    }

    pub fn cached_pages(&self) -> usize {
        self.cache.len()
    }
}
