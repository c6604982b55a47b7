//! App actor - message loop processing UI events, network responses and
//! animation ticks

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::app::state::{AppState, PageDirection};
use crate::constants::TICK_MS;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial load on mount
        let commands = self.state.start_load();
        self.send_all(commands);
        self.render();

        let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();

        loop {
            tokio::select! {
                ui_event = ui_rx.recv() => match ui_event {
                    Some(event) => {
                        if self.handle_ui_event(event) {
                            // Quit signal received
                            let _ = self.network_tx.send(NetworkCommand::Shutdown);
                            break;
                        }
                        self.render();
                    }
                    // UI loop gone without a quit
                    None => {
                        tracing::warn!("UI channel closed, shutting down");
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                },
                Some(response) = net_rx.recv() => {
                    tracing::trace!(id = response.id(), "network response");
                    if let Some(cmd) = self.state.handle_response(response) {
                        let _ = self.network_tx.send(cmd);
                    }
                    self.render();
                }
                _ = ticker.tick() => {
                    let now = Instant::now();
                    if self.state.tick(now - last_tick) {
                        self.render();
                    }
                    last_tick = now;
                }
            }
        }
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    fn send_all(&self, commands: Vec<NetworkCommand>) {
        for cmd in commands {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Tap => self.state.toggle_focus(),

            UiEvent::NextPage => {
                if let Some(cmd) = self.state.change_page(PageDirection::Next) {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::PrevPage => {
                if let Some(cmd) = self.state.change_page(PageDirection::Prev) {
                    let _ = self.network_tx.send(cmd);
                }
            }

            UiEvent::Refresh => {
                let commands = self.state.refresh();
                self.send_all(commands);
            }
            UiEvent::Share => {
                if let Some(cmd) = self.state.share() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::Save => {
                if let Some(cmd) = self.state.save() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            UiEvent::DismissNotice => self.state.dismiss_notice(),

            UiEvent::Quit => return true,
        }

        false
    }
}
