//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, styles, scrollable lists)
//! - `layout`: Search bar and sidebar (moods, playlists)
//! - `content`: Track results list
//! - `song_info`: Now-playing detail screen
//! - `progress`: Progress bar rendering
//! - `overlays`: Error banner

mod utils;
mod layout;
mod content;
mod song_info;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlaybackState, Playlist, Route, SearchState, Track, UiState};

/// Everything a frame needs, snapshotted from the state holders
pub struct Screen<'a> {
    pub ui: &'a UiState,
    pub search: &'a SearchState,
    pub playlists: &'a [Playlist],
    pub playback: &'a PlaybackState,
    pub now_playing: Option<&'a Track>,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, screen: &Screen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Main content (sidebar + content)
                Constraint::Length(3), // Progress bar with playback info
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], screen.ui, screen.search);

        match screen.ui.route {
            Route::Home => {
                let main_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(30), // Sidebar (Moods + Playlists)
                        Constraint::Percentage(70), // Results
                    ])
                    .split(chunks[1]);

                layout::render_sidebar(frame, main_chunks[0], screen.ui, screen.playlists);

                let current_track_id = screen.now_playing.map(|t| t.id.as_str());
                content::render_results(frame, main_chunks[1], screen.ui, screen.search, current_track_id);
            }
            Route::SongInfo { .. } => {
                song_info::render_song_info(frame, chunks[1], screen.now_playing, screen.playback);
            }
        }

        progress::render_progress_bar(frame, chunks[2], screen.playback, screen.now_playing);

        // Player failures first, then search/load failures
        let error = screen
            .ui
            .status_message
            .as_deref()
            .or(screen.search.error_message.as_deref());
        if let Some(message) = error {
            overlays::render_error_notification(frame, message);
        }
    }
}
