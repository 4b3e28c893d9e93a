//! Client-side search over a manifest of page URLs: fetch, cache, score by
//! substring containment, and render highlighted snippets into a host panel.

pub mod config;
pub mod controller;
pub mod data_models;
pub mod dom;
pub mod extract;
pub mod fetcher;
pub mod manifest;
pub mod render;
pub mod scorer;
pub mod snippet;
pub mod ui;
pub mod widget;

pub use config::Config;
pub use data_models::{ManifestEntry, PageRecord, ScoredResult};
pub use dom::{HostDom, ResultsPanel, SearchBox, UiEvent};
pub use widget::SearchWidget;
