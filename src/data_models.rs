use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One candidate page from the manifest. The manifest may carry other fields
/// per entry; only the URL is consumed.
#[derive(Deserialize, Debug, Clone)]
pub struct ManifestEntry {
    pub url: String,
}

/// Extracted representation of one fetched page, cached for the lifetime of
/// the widget. `text` is the plain body text with whitespace runs collapsed
/// and script/style content excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub text: String,
    pub fetched_at: DateTime<Utc>,
}

impl PageRecord {
    pub fn new(url: String, title: String, text: String) -> PageRecord {
        PageRecord {
            url,
            title,
            text,
            fetched_at: Utc::now(),
        }
    }
}

/// A page that matched the query. Recomputed on every search, never cached.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    pub record: PageRecord,
    pub score: u32,
}
