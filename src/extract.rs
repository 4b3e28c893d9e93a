use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::data_models::PageRecord;

static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());

/// Parses raw markup into the cached page representation.
///
/// Title preference: first non-empty `<h1>`, then `<title>`, then the URL
/// itself. Body text is the document's text content with script, style and
/// noscript subtrees excluded and whitespace runs collapsed to single
/// spaces.
pub fn page_record(url: &str, html: &str) -> PageRecord {
    let document = Html::parse_document(html);

    let title = first_text(&document, &H1_SELECTOR)
        .or_else(|| first_text(&document, &TITLE_SELECTOR))
        .unwrap_or_else(|| url.trim().to_string());

    let text = match document.select(&BODY_SELECTOR).next() {
        Some(body) => {
            let mut raw = String::new();
            push_content_text(body, &mut raw);
            collapse_whitespace(&raw)
        }
        // degraded path for markup the parser could not give a body for
        None => strip_markup(html),
    };

    PageRecord::new(url.to_string(), title, text)
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

fn push_content_text(element: ElementRef, out: &mut String) {
    if matches!(element.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            push_content_text(child_element, out);
        }
    }
}

/// Last-resort text extraction straight off the raw markup: drop
/// script/style blocks, collapse whatever is left. Tags other than those
/// survive as text, which is acceptable for the malformed documents that
/// reach this path.
pub fn strip_markup(html: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(html, " ");
    let without_styles = STYLE_BLOCK.replace_all(&without_scripts, " ");
    collapse_whitespace(&without_styles)
}

/// Collapses all whitespace runs (spaces, newlines, tabs) to single spaces
/// and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
