use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::controller::SearchController;
use crate::dom::{ResultsPanel, SearchBox, UiEvent};

/// Connects the host's event stream to the controller. Keystrokes are
/// debounced: each input resets the timer and only the last value within
/// the window is searched. Focus re-shows previous results; clicks outside
/// both elements dismiss the panel.
pub struct UiBinder {
    controller: Arc<SearchController>,
    input: Arc<dyn SearchBox>,
    panel: Arc<dyn ResultsPanel>,
    debounce: Duration,
    min_query_len: usize,
}

impl UiBinder {
    pub fn new(
        controller: Arc<SearchController>,
        input: Arc<dyn SearchBox>,
        panel: Arc<dyn ResultsPanel>,
        debounce: Duration,
        min_query_len: usize,
    ) -> UiBinder {
        UiBinder {
            controller,
            input,
            panel,
            debounce,
            min_query_len,
        }
    }

    /// Spawns the event loop. Searches run on their own tasks so typing is
    /// never blocked by an in-flight search; the controller's cancellation
    /// handles the resulting overlap. The loop ends when the host drops its
    /// event sender.
    pub fn bind(self, mut events: mpsc::UnboundedReceiver<UiEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut pending: Option<String> = None;
            let mut deadline = Instant::now();
            loop {
                tokio::select! {
                    event = events.recv() => {
                        let Some(event) = event else { break };
                        match event {
                            UiEvent::Input(value) => {
                                deadline = Instant::now() + self.debounce;
                                pending = Some(value);
                            }
                            UiEvent::Focus => {
                                if self.input.value().chars().count() >= self.min_query_len {
                                    self.panel.set_hidden(false);
                                }
                            }
                            UiEvent::DocumentClick { on_input, on_panel } => {
                                if !on_input && !on_panel {
                                    self.panel.set_hidden(true);
                                }
                            }
                        }
                    }
                    _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                        if let Some(query) = pending.take() {
                            let controller = self.controller.clone();
                            tokio::spawn(async move {
                                controller.search(&query).await;
                            });
                        }
                    }
                }
            }
        })
    }
}
