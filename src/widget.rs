use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell as AsyncOnceCell;

use crate::config::Config;
use crate::controller::SearchController;
use crate::data_models::ManifestEntry;
use crate::dom::HostDom;
use crate::fetcher::PageFetcher;
use crate::manifest::ManifestLoader;
use crate::ui::UiBinder;

/// One activated search widget: owns its page list, cache and UI binding.
/// Hosts construct one per widget instance; nothing is process-global, so
/// several independent widgets can coexist.
pub struct SearchWidget {
    config: Config,
    dom: Arc<dyn HostDom>,
    loader: ManifestLoader,
    fetcher: Arc<PageFetcher>,
    manifest: AsyncOnceCell<Vec<ManifestEntry>>,
    controller: OnceCell<Arc<SearchController>>,
    bound: AtomicBool,
}

impl SearchWidget {
    pub fn new(config: Config, dom: Arc<dyn HostDom>) -> Result<SearchWidget> {
        let base = Url::parse(&config.root_url)
            .with_context(|| format!("parsing root url {:?}", config.root_url))?;
        let manifest_url = base
            .join(&config.manifest_path)
            .with_context(|| format!("resolving manifest path {:?}", config.manifest_path))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .context("building http client")?;

        Ok(SearchWidget {
            loader: ManifestLoader::new(client.clone(), manifest_url),
            fetcher: Arc::new(PageFetcher::new(client, base)),
            config,
            dom,
            manifest: AsyncOnceCell::new(),
            controller: OnceCell::new(),
            bound: AtomicBool::new(false),
        })
    }

    /// Host-facing initialization. Loads the manifest at most once for the
    /// widget's lifetime (a failed load is retried on the next call), then
    /// binds the UI listeners exactly once. Never panics and never returns
    /// an error to the host: failures are logged and the widget stays inert.
    pub async fn activate(&self) {
        let pages = match self.manifest.get_or_try_init(|| self.loader.load()).await {
            Ok(pages) => pages.clone(),
            Err(e) => {
                log::error!("search widget init failed, error: {:#}", e);
                return;
            }
        };

        // both host elements must exist, otherwise binding is a no-op
        let Some(panel) = self.dom.results_panel(&self.config.results_id) else {
            log::warn!("results element {:?} not found", self.config.results_id);
            return;
        };
        let Some(input) = self.dom.search_input(&self.config.input_id) else {
            log::warn!("input element {:?} not found", self.config.input_id);
            return;
        };

        let controller = self
            .controller
            .get_or_init(|| {
                Arc::new(SearchController::new(
                    pages,
                    self.fetcher.clone(),
                    panel.clone(),
                    self.config.min_query_len,
                    self.config.snippet_max_chars,
                ))
            })
            .clone();

        if self.bound.swap(true, Ordering::SeqCst) {
            return; // listeners attach once
        }
        let Some(events) = self.dom.events() else {
            log::warn!("host event stream already taken, ui not bound");
            return;
        };
        UiBinder::new(
            controller,
            input,
            panel,
            Duration::from_millis(self.config.debounce_ms),
            self.config.min_query_len,
        )
        .bind(events);
        log::info!("search widget activated");
    }

    /// Programmatic search entry for hosts that drive the widget without a
    /// UI event stream. Does nothing before a successful `activate`.
    pub async fn search(&self, query: &str) {
        match self.controller.get() {
            Some(controller) => controller.search(query).await,
            None => log::warn!("search called before widget activation"),
        }
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }
}
