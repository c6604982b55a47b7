//! Wallpaper Browser - Actor-based terminal wallpaper carousel
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - reducer and focus animation processing events
//! - Network Layer (Tokio) - async fetch, share and save

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use wallpaper_browser::config::{app_dir, Config};
use wallpaper_browser::constants::{APP_NAME, LOG_FILE, TICK_MS};
use wallpaper_browser::messages::ui_events::key_to_ui_event;
use wallpaper_browser::{
    ui, AppActor, BatchEndpoint, ClipboardShare, Collaborators, NetworkActor, NetworkCommand,
    NetworkResponse, PicturesLibrary, RenderState, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration problems are reported before the terminal is taken over
    let config = Config::load()?;
    config.validate()?;

    // Initialize logging to file
    let log_dir = app_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(app = APP_NAME, api_url = %config.api_url, batch_size = config.batch_size, "starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let collaborators = Collaborators {
        share: Arc::new(ClipboardShare),
        media: Arc::new(PicturesLibrary::new(config.library_dir())),
        staging_dir: config.staging_dir(),
    };
    let network_actor = NetworkActor::new(net_resp_tx, BatchEndpoint::from_config(&config), collaborators);
    let network_handle = tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    let result = run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await;

    // Wait for the actors to wind down so in-flight tasks are cancelled
    let _ = tokio::time::timeout(Duration::from_secs(1), async {
        let _ = app_handle.await;
        let _ = network_handle.await;
    })
    .await;
    tracing::info!("stopped");

    result
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| ui::draw(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(TICK_MS))? {
            let ui_event = match event::read()? {
                Event::Key(key) => key_to_ui_event(
                    key,
                    current_state.focus,
                    current_state.load,
                    current_state.notice.is_some(),
                ),
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        let size = terminal.size()?;
                        let area = Rect::new(0, 0, size.width, size.height);
                        ui::hit_test(area, &current_state, column, row)
                    }
                    MouseEventKind::ScrollDown if current_state.can_page => Some(UiEvent::NextPage),
                    MouseEventKind::ScrollUp if current_state.can_page => Some(UiEvent::PrevPage),
                    _ => None,
                },
                _ => None,
            };

            if let Some(event) = ui_event {
                let _ = ui_tx.send(event);
                if event == UiEvent::Quit {
                    break;
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}
