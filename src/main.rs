use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use spotify_clone::audio::AudioBackend;
use spotify_clone::config::Config;
use spotify_clone::controller::{AppController, PlaybackController, StateHolderFactory};
use spotify_clone::logging;
use spotify_clone::model::{CatalogClient, TrackCache, TrackStore};
use spotify_clone::view::{AppView, Screen};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Spotify Clone Starting ===");

    let client = CatalogClient::new(config.catalog_config()).context("Invalid catalog configuration")?;
    let store = TrackStore::new(client, TrackCache::new(config.cache_capacity));

    // The output device opens on first play, so a missing one shows on the status line
    let backend = AudioBackend::new().context("Failed to build the audio HTTP client")?;
    let player = Arc::new(PlaybackController::new(Arc::new(backend), config.sample_interval()));

    let controller = AppController::new(StateHolderFactory::new(store, player.clone()));

    // Popular tracks and the playlist sidebar load in the background
    let home = controller.home();
    tokio::spawn(async move {
        futures::join!(home.on_activate(), home.load_playlists(None));
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    if let Err(e) = player.release().await {
        tracing::warn!(error = %e, "Player release failed");
    }

    tracing::info!("Spotify Clone shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: AppController,
) -> io::Result<()> {
    let home = controller.home();
    let song_info = controller.song_info();
    let search_rx = home.subscribe();
    let playlists_rx = home.subscribe_playlists();
    let playback_rx = song_info.playback();

    loop {
        // Get current state
        let ui_state = controller.ui_state().await;
        let search = search_rx.borrow().clone();
        let playlists = playlists_rx.borrow().clone();
        let playback = *playback_rx.borrow();
        let now_playing = song_info.track();

        if ui_state.should_quit {
            break;
        }

        // Draw UI
        terminal.draw(|f| {
            AppView::render(
                f,
                &Screen {
                    ui: &ui_state,
                    search: &search,
                    playlists: &playlists,
                    playback: &playback,
                    now_playing: now_playing.as_ref(),
                },
            );
        })?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
