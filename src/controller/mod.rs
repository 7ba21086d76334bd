//! Controller module - Application logic and event handling
//!
//! This module contains the state holders the screens observe and the
//! application controller that maps user input onto them.
//! It is organized into submodules by responsibility:
//!
//! - `playback`: Idle/Playing/Paused state machine over the media player
//! - `home`: Search, mood and playlist loading for the home screen
//! - `song_info`: Now-playing intents for the song-info screen
//! - `factory`: Route -> state holder resolution
//! - `navigation`: Opening results, moods and playlists; going back
//! - `input`: Key event handling

mod playback;
mod home;
mod song_info;
mod factory;
mod navigation;
mod input;

pub use factory::{StateHolder, StateHolderFactory};
pub use home::HomeState;
pub use playback::PlaybackController;
pub use song_info::SongInfoState;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::PlayerError;
use crate::model::UiState;

#[derive(Clone)]
pub struct AppController {
    factory: StateHolderFactory,
    pub(crate) ui: Arc<Mutex<UiState>>,
}

impl AppController {
    pub fn new(factory: StateHolderFactory) -> Self {
        Self {
            factory,
            ui: Arc::new(Mutex::new(UiState::default())),
        }
    }

    pub fn home(&self) -> HomeState {
        self.factory.home()
    }

    pub fn song_info(&self) -> SongInfoState {
        self.factory.song_info()
    }

    pub async fn ui_state(&self) -> UiState {
        self.ui.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        self.ui.lock().await.should_quit
    }

    pub async fn clear_status(&self) {
        self.ui.lock().await.status_message = None;
    }

    /// Runs a player intent in the background and reports failures on the
    /// status line instead of the search error text.
    pub(crate) fn spawn_player_intent<F, Fut>(&self, intent: F)
    where
        F: FnOnce(SongInfoState) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), PlayerError>> + Send + 'static,
    {
        let song_info = self.song_info();
        let ui = self.ui.clone();
        tokio::spawn(async move {
            if let Err(e) = intent(song_info).await {
                tracing::error!(error = %e, "Player intent failed");
                ui.lock().await.status_message = Some(Self::format_error(&e));
            }
        });
    }

    pub(crate) fn format_error(error: &PlayerError) -> String {
        match error {
            PlayerError::Output(_) => "No audio output device available.".to_string(),
            PlayerError::Fetch(_) => "Could not download the track. Check your connection.".to_string(),
            PlayerError::Decode(_) => "This track's audio format is not supported.".to_string(),
            PlayerError::NothingLoaded => "Nothing is loaded. Pick a track first.".to_string(),
            other => format!("Error: {}", other),
        }
    }

    pub async fn toggle_playback(&self) {
        let Some(track) = self.song_info().track() else {
            tracing::debug!("Play/pause ignored, no track selected");
            return;
        };
        self.spawn_player_intent(move |song_info| async move {
            song_info.on_play_pause_click(&track).await
        });
    }

    pub async fn stop_playback(&self) {
        self.spawn_player_intent(|song_info| async move { song_info.stop_song().await });
    }

    pub async fn seek_relative(&self, delta_ms: i64) {
        self.spawn_player_intent(move |song_info| async move { song_info.seek_by(delta_ms).await });
    }
}
