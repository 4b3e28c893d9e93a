use futures::future::join_all;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use crate::data_models::{ManifestEntry, ScoredResult};
use crate::dom::ResultsPanel;
use crate::fetcher::PageFetcher;
use crate::render;
use crate::scorer;

/// Orchestrates one search: fan out fetches over the manifest, score,
/// sort, render. Owns the cancellation state that lets a newer search
/// supersede an older one still in flight.
pub struct SearchController {
    pages: Vec<ManifestEntry>,
    fetcher: Arc<PageFetcher>,
    panel: Arc<dyn ResultsPanel>,
    current: Mutex<CancellationToken>,
    min_query_len: usize,
    snippet_max_chars: usize,
}

impl SearchController {
    pub fn new(
        pages: Vec<ManifestEntry>,
        fetcher: Arc<PageFetcher>,
        panel: Arc<dyn ResultsPanel>,
        min_query_len: usize,
        snippet_max_chars: usize,
    ) -> SearchController {
        SearchController {
            pages,
            fetcher,
            panel,
            current: Mutex::new(CancellationToken::new()),
            min_query_len,
            snippet_max_chars,
        }
    }

    /// Cancels whatever search was running and installs a fresh token for
    /// this one, so a superseded search can never reach the panel.
    fn begin_search(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let previous = {
            let mut current = self.current.lock().unwrap();
            std::mem::replace(&mut *current, fresh.clone())
        };
        previous.cancel();
        fresh
    }

    pub async fn search(&self, query: &str) {
        let token = self.begin_search();

        if query.trim().chars().count() < self.min_query_len {
            self.panel.set_hidden(true);
            return;
        }

        log::info!("searching {} pages for {query:?}", self.pages.len());

        let fetches = self.pages.iter().map(|entry| {
            let fetcher = self.fetcher.clone();
            let url = entry.url.clone();
            let token = token.clone();
            async move {
                tokio::select! {
                    _ = token.cancelled() => None,
                    fetched = fetcher.fetch_page_text(&url) => match fetched {
                        Ok(record) => Some(record),
                        Err(e) => {
                            // this page contributes no result; the search goes on
                            log::warn!("error fetching page {url}, error: {:#}", e);
                            None
                        }
                    },
                }
            }
        });
        let records = join_all(fetches).await;

        if token.is_cancelled() {
            log::debug!("search for {query:?} superseded, dropping results");
            return;
        }

        let mut results: Vec<ScoredResult> = records
            .into_iter()
            .flatten()
            .filter_map(|record| {
                let score = scorer::score_hit(query, &record);
                (score > 0).then_some(ScoredResult { record, score })
            })
            .collect();
        results.sort_by(scorer::by_relevance);

        if token.is_cancelled() {
            return;
        }
        render::render_results(&*self.panel, &results, query, self.snippet_max_chars);
    }
}
