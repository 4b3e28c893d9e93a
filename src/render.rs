use crate::data_models::ScoredResult;
use crate::dom::ResultsPanel;
use crate::snippet::make_snippet;

/// Writes the ranked results into the host panel and makes it visible.
/// With no results a single "no results" entry is rendered instead. Titles,
/// URLs and the echoed query all pass through `escape_html`; the snippet
/// fragment is inserted as-is because it is built injection-safe.
pub fn render_results(
    panel: &dyn ResultsPanel,
    results: &[ScoredResult],
    query: &str,
    snippet_max_chars: usize,
) {
    if results.is_empty() {
        panel.set_html(&format!(
            "<div class=\"result\">No results for \u{201c}{}\u{201d}.</div>",
            escape_html(query)
        ));
        panel.set_hidden(false);
        return;
    }

    let mut html = String::new();
    for result in results {
        html.push_str(&format!(
            "<div class=\"result\">\
             <a class=\"title\" href=\"{}\">{}</a>\
             <div class=\"snippet\">{}</div>\
             </div>",
            escape_html(&result.record.url),
            escape_html(&result.record.title),
            make_snippet(&result.record.text, query, snippet_max_chars),
        ));
    }
    panel.set_html(&html);
    panel.set_hidden(false);
}

/// Minimal HTML entity escaping for text interpolated into the results
/// markup. Fetched pages are untrusted input.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::{PageRecord, ScoredResult};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct TestPanel {
        html: Mutex<String>,
        hidden: AtomicBool,
    }

    impl ResultsPanel for TestPanel {
        fn set_html(&self, html: &str) {
            *self.html.lock().unwrap() = html.to_string();
        }
        fn set_hidden(&self, hidden: bool) {
            self.hidden.store(hidden, Ordering::SeqCst);
        }
    }

    fn result(url: &str, title: &str, text: &str, score: u32) -> ScoredResult {
        ScoredResult {
            record: PageRecord::new(url.to_string(), title.to_string(), text.to_string()),
            score,
        }
    }

    #[test]
    fn empty_results_render_escaped_no_results_message() {
        let panel = TestPanel::default();
        panel.set_hidden(true);
        render_results(&panel, &[], "<script>alert(1)</script>", 180);

        let html = panel.html.lock().unwrap().clone();
        assert!(html.contains("No results for"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!panel.hidden.load(Ordering::SeqCst));
    }

    #[test]
    fn each_result_renders_link_and_snippet() {
        let panel = TestPanel::default();
        let results = vec![result("/a", "Alpha guide", "the alpha of it all", 6)];
        render_results(&panel, &results, "alpha", 180);

        let html = panel.html.lock().unwrap().clone();
        assert!(html.contains("href=\"/a\""));
        assert!(html.contains("Alpha guide"));
        assert!(html.contains("<b>alpha</b>"));
        assert!(!panel.hidden.load(Ordering::SeqCst));
    }

    #[test]
    fn hostile_title_is_escaped() {
        let panel = TestPanel::default();
        let results = vec![result("/a", "<img src=x onerror=pwn()>", "body fox text", 1)];
        render_results(&panel, &results, "fox", 180);

        let html = panel.html.lock().unwrap().clone();
        assert!(html.contains("&lt;img"));
        assert!(!html.contains("<img"));
    }
}
