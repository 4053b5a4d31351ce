use std::io::Stdout;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{self, Event};
use exodo_tui::config::AppConfig;
use exodo_tui::fetch::{build_client, load_facts, load_maps};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::{debug, info};

use crate::app::{handle_input, App, LoadEvent};
use crate::ui;

// Upper bound on how long a frame waits for input
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Starts both catalog loads; each result arrives on the channel as soon as
/// it completes, independently of the other.
pub fn spawn_loads(config: &AppConfig) -> Result<UnboundedReceiver<LoadEvent>> {
    let client = build_client(config.timeout)?;
    let (tx, rx) = mpsc::unbounded_channel();

    let facts_tx = tx.clone();
    let facts_client = client.clone();
    let facts_source = config.data.clone();
    tokio::spawn(async move {
        let result = load_facts(&facts_client, &facts_source).await;
        // The receiver is gone only when the UI has already quit.
        let _ = facts_tx.send(LoadEvent::Facts(result));
    });

    let maps_source = config.maps.clone();
    tokio::spawn(async move {
        let result = load_maps(&client, &maps_source).await;
        let _ = tx.send(LoadEvent::Maps(result));
    });

    Ok(rx)
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut loads: UnboundedReceiver<LoadEvent>,
) -> Result<()> {
    info!("event loop started");

    while app.running {
        drain_loads(app, &mut loads);
        app.tick(app.now());

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Wake up in time for a pending debounced search.
        let timeout = app
            .debouncer
            .time_until_due(app.now())
            .map_or(EVENT_POLL_TIMEOUT, |due| due.min(EVENT_POLL_TIMEOUT));

        if matches!(event::poll(timeout), Ok(true)) {
            let now = app.now();
            match event::read() {
                Ok(Event::Key(key)) => handle_input(app, key, now),
                Ok(Event::Resize(width, height)) => debug!(width, height, "resized"),
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }

        // Let the loader tasks make progress between frames.
        tokio::task::yield_now().await;
    }

    info!(link = %app.share_link(), "event loop finished");
    Ok(())
}

fn drain_loads(app: &mut App, loads: &mut UnboundedReceiver<LoadEvent>) {
    loop {
        match loads.try_recv() {
            Ok(event) => app.on_load(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
        }
    }
}
