use std::cmp::Ordering;

use crate::data_models::{PageRecord, ScoredResult};

/// Weight of a case-insensitive substring hit in the page title.
pub const TITLE_WEIGHT: u32 = 5;
/// Weight of a hit anywhere in the body text.
pub const BODY_WEIGHT: u32 = 1;

/// Scores a page against the raw query. Title and body checks are
/// independent, so the possible scores are 0, 1, 5 and 6; zero means the
/// page is not a result at all.
pub fn score_hit(query: &str, page: &PageRecord) -> u32 {
    let needle = query.to_lowercase();
    let title_score = if page.title.to_lowercase().contains(&needle) {
        TITLE_WEIGHT
    } else {
        0
    };
    let body_score = if page.text.to_lowercase().contains(&needle) {
        BODY_WEIGHT
    } else {
        0
    };
    title_score + body_score
}

/// Result ordering: score descending, ties broken by title ascending.
/// Titles compare case-insensitively first, raw bytes last so the order is
/// total and deterministic.
pub fn by_relevance(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            a.record
                .title
                .to_lowercase()
                .cmp(&b.record.title.to_lowercase())
        })
        .then_with(|| a.record.title.cmp(&b.record.title))
}
