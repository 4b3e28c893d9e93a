use std::sync::Arc;
use tokio::sync::mpsc;

/// UI events the host page forwards into the widget. The host decides hit
/// testing for clicks; the widget only needs to know whether the click
/// landed on its two elements.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// The search box content changed; carries the full current value.
    Input(String),
    /// The search box gained focus.
    Focus,
    /// A click anywhere in the document.
    DocumentClick { on_input: bool, on_panel: bool },
}

/// The text input the user types queries into.
pub trait SearchBox: Send + Sync {
    fn value(&self) -> String;
}

/// The container the widget renders result markup into. Starts hidden;
/// the widget toggles visibility as results come and go.
pub trait ResultsPanel: Send + Sync {
    fn set_html(&self, html: &str);
    fn set_hidden(&self, hidden: bool);
}

/// Host-page side of the widget: lookups for the two collaborating elements
/// by their stable ids, plus the event stream. A host returns `None` for an
/// element that does not exist on the page, in which case the widget never
/// binds. `events` yields its receiver once; later calls return `None`.
pub trait HostDom: Send + Sync {
    fn search_input(&self, id: &str) -> Option<Arc<dyn SearchBox>>;
    fn results_panel(&self, id: &str) -> Option<Arc<dyn ResultsPanel>>;
    fn events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>>;
}
