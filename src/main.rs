use anyhow::Result;
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use skimmer::{Config, HostDom, ResultsPanel, SearchBox, SearchWidget, UiEvent};

/// Terminal harness for the search widget: searches a deployed site's
/// manifest and prints the rendered result markup.
#[derive(Parser)]
struct Cli {
    /// Deployment root the manifest and pages are fetched from.
    #[arg(long)]
    root: Option<String>,
    /// Run a single search and exit; without it, every stdin line is fed
    /// through the debounced input path.
    #[arg(long)]
    query: Option<String>,
}

struct TerminalPanel {
    hidden: AtomicBool,
}

impl ResultsPanel for TerminalPanel {
    fn set_html(&self, html: &str) {
        println!("{html}");
    }
    fn set_hidden(&self, hidden: bool) {
        if hidden && !self.hidden.swap(true, Ordering::SeqCst) {
            println!("(results hidden)");
        } else if !hidden {
            self.hidden.store(false, Ordering::SeqCst);
        }
    }
}

struct TerminalInput {
    value: Mutex<String>,
}

impl SearchBox for TerminalInput {
    fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }
}

struct TerminalDom {
    input: Arc<TerminalInput>,
    panel: Arc<TerminalPanel>,
    events_tx: mpsc::UnboundedSender<UiEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<UiEvent>>>,
}

impl TerminalDom {
    fn new() -> TerminalDom {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        TerminalDom {
            input: Arc::new(TerminalInput {
                value: Mutex::new(String::new()),
            }),
            panel: Arc::new(TerminalPanel {
                hidden: AtomicBool::new(true),
            }),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }

    fn type_query(&self, value: &str) {
        *self.input.value.lock().unwrap() = value.to_string();
        let _ = self.events_tx.send(UiEvent::Input(value.to_string()));
    }
}

impl HostDom for TerminalDom {
    fn search_input(&self, _id: &str) -> Option<Arc<dyn SearchBox>> {
        Some(self.input.clone())
    }
    fn results_panel(&self, _id: &str) -> Option<Arc<dyn ResultsPanel>> {
        Some(self.panel.clone())
    }
    fn events(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.events_rx.lock().unwrap().take()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(root) = cli.root {
        config.root_url = root;
    }

    let dom = Arc::new(TerminalDom::new());
    let widget = SearchWidget::new(config, dom.clone())?;
    widget.activate().await;

    match cli.query {
        Some(query) => {
            widget.search(&query).await;
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut lines = stdin.lines();
            while let Some(line) = lines.next_line().await? {
                dom.type_query(line.trim_end());
            }
            // let the last debounced search finish before exiting
            tokio::time::sleep(std::time::Duration::from_millis(750)).await;
        }
    }
    Ok(())
}
