use reqwest::{Client, Url};

use skimmer::fetcher::PageFetcher;
use skimmer::manifest::ManifestLoader;

mod test_helpers {
    use axum::Router;
    use axum::http::header::CONTENT_TYPE;
    use axum::response::Html;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Per-path request counter shared with the fixture routes, so tests
    /// can assert on actual network activity.
    #[derive(Clone, Default)]
    pub struct Hits(Arc<Mutex<HashMap<String, usize>>>);

    impl Hits {
        pub fn bump(&self, path: &str) {
            *self.0.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;
        }

        pub fn count(&self, path: &str) -> usize {
            self.0.lock().unwrap().get(path).copied().unwrap_or(0)
        }
    }

    pub struct Site {
        pub base: String,
        pub hits: Hits,
    }

    /// Binds a router on an ephemeral port and returns the base URL.
    pub async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    /// Serves a manifest plus a set of HTML pages, counting every request.
    pub async fn serve(manifest: serde_json::Value, pages: Vec<(&'static str, String)>) -> Site {
        let hits = Hits::default();
        let manifest_body = manifest.to_string();
        let mut router = Router::new();
        {
            let hits = hits.clone();
            router = router.route(
                "/manifest.json",
                get(move || {
                    let hits = hits.clone();
                    let body = manifest_body.clone();
                    async move {
                        hits.bump("/manifest.json");
                        ([(CONTENT_TYPE, "application/json")], body)
                    }
                }),
            );
        }
        for (path, html) in pages {
            let hits = hits.clone();
            router = router.route(
                path,
                get(move || {
                    let hits = hits.clone();
                    let html = html.clone();
                    async move {
                        hits.bump(path);
                        Html(html)
                    }
                }),
            );
        }
        let base = spawn(router).await;
        Site { base, hits }
    }
}

use test_helpers::*;

fn fetcher_for(base: &str) -> PageFetcher {
    PageFetcher::new(Client::new(), Url::parse(base).unwrap())
}

#[tokio::test]
async fn fetches_and_extracts_title_and_text() {
    let site = serve(
        serde_json::json!({ "runners": [] }),
        vec![(
            "/a",
            "<html><head><title>fallback</title></head>\
             <body><h1> Wikiprofia guide </h1><p>welcome  to\nthe guide</p>\
             <script>var tracker = 1;</script></body></html>"
                .to_string(),
        )],
    )
    .await;

    let fetcher = fetcher_for(&site.base);
    let record = fetcher.fetch_page_text("/a").await.unwrap();

    assert_eq!(record.url, "/a");
    assert_eq!(record.title, "Wikiprofia guide");
    assert_eq!(record.text, "Wikiprofia guide welcome to the guide");
    assert!(!record.text.contains("tracker"));
}

#[tokio::test]
async fn second_fetch_is_served_from_cache() {
    let site = serve(
        serde_json::json!({ "runners": [] }),
        vec![("/a", "<html><body><p>stable content</p></body></html>".to_string())],
    )
    .await;

    let fetcher = fetcher_for(&site.base);
    let first = fetcher.fetch_page_text("/a").await.unwrap();
    let second = fetcher.fetch_page_text("/a").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(site.hits.count("/a"), 1);
}

#[tokio::test]
async fn concurrent_fetches_of_one_url_converge_on_one_entry() {
    let site = serve(
        serde_json::json!({ "runners": [] }),
        vec![("/a", "<html><body><p>racy</p></body></html>".to_string())],
    )
    .await;

    let fetcher = fetcher_for(&site.base);
    let (a, b) = tokio::join!(fetcher.fetch_page_text("/a"), fetcher.fetch_page_text("/a"));

    assert_eq!(a.unwrap().text, "racy");
    assert_eq!(b.unwrap().text, "racy");
    assert_eq!(fetcher.cached_pages(), 1);
}

#[tokio::test]
async fn non_ok_status_still_yields_a_record() {
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;

    let router = axum::Router::new().route(
        "/broken",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<html><body><h1>Server error</h1></body></html>".to_string()),
            )
        }),
    );
    let base = spawn(router).await;

    let record = fetcher_for(&base).fetch_page_text("/broken").await.unwrap();
    assert_eq!(record.title, "Server error");
}

#[tokio::test]
async fn transport_failure_is_an_error_and_is_not_cached() {
    // nothing listens on port 9
    let fetcher = fetcher_for("http://127.0.0.1:9/");
    assert!(fetcher.fetch_page_text("/a").await.is_err());
    assert_eq!(fetcher.cached_pages(), 0);
}

#[tokio::test]
async fn manifest_loader_returns_entries() {
    let site = serve(
        serde_json::json!({ "runners": [ { "url": "/a" }, { "url": "/b", "extra": true } ] }),
        vec![],
    )
    .await;

    let loader = ManifestLoader::new(
        Client::new(),
        Url::parse(&site.base).unwrap().join("manifest.json").unwrap(),
    );
    let entries = loader.load().await.unwrap();
    let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec!["/a", "/b"]);
}

#[tokio::test]
async fn manifest_parse_failure_propagates() {
    let site = serve(serde_json::json!({ "runners": [] }), vec![]).await;

    // a 404 page is not JSON
    let loader = ManifestLoader::new(
        Client::new(),
        Url::parse(&site.base).unwrap().join("missing.json").unwrap(),
    );
    assert!(loader.load().await.is_err());
}
