use dotenvy::dotenv;
use std::env;

/// Widget settings. `Default` is what a host page embedding the widget gets;
/// `from_env` layers `SKIMMER_*` environment overrides on top (loading a
/// .env file if present).
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment root every relative URL (manifest and pages) resolves against.
    pub root_url: String,
    /// Manifest location relative to `root_url`.
    pub manifest_path: String,
    pub input_id: String,
    pub results_id: String,
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub snippet_max_chars: usize,
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_url: "http://localhost:8000/".to_string(),
            manifest_path: "manifest.json".to_string(),
            input_id: "search-input".to_string(),
            results_id: "search-results".to_string(),
            debounce_ms: 160,
            min_query_len: 2,
            snippet_max_chars: 180,
            fetch_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        dotenv().ok(); // Load .env file if present
        let defaults = Config::default();
        Config {
            root_url: get_env_or_default("SKIMMER_ROOT_URL", &defaults.root_url),
            manifest_path: get_env_or_default("SKIMMER_MANIFEST_PATH", &defaults.manifest_path),
            input_id: get_env_or_default("SKIMMER_INPUT_ID", &defaults.input_id),
            results_id: get_env_or_default("SKIMMER_RESULTS_ID", &defaults.results_id),
            debounce_ms: get_env_parsed("SKIMMER_DEBOUNCE_MS", defaults.debounce_ms),
            min_query_len: get_env_parsed("SKIMMER_MIN_QUERY_LEN", defaults.min_query_len),
            snippet_max_chars: get_env_parsed(
                "SKIMMER_SNIPPET_MAX_CHARS",
                defaults.snippet_max_chars,
            ),
            fetch_timeout_secs: get_env_parsed(
                "SKIMMER_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout_secs,
            ),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
