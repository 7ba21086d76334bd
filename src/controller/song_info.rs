//! Now-playing state holder

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::error::PlayerError;
use crate::model::{PlaybackState, Track};

use super::playback::PlaybackController;

/// Forwards now-playing intents to the [`PlaybackController`] and exposes its
/// observables unchanged.
#[derive(Clone)]
pub struct SongInfoState {
    player: Arc<PlaybackController>,
    track: Arc<Mutex<Option<Track>>>,
}

impl SongInfoState {
    pub fn new(player: Arc<PlaybackController>) -> Self {
        Self {
            player,
            track: Arc::new(Mutex::new(None)),
        }
    }

    pub fn playback(&self) -> watch::Receiver<PlaybackState> {
        self.player.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.player.snapshot()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn controller(&self) -> &Arc<PlaybackController> {
        &self.player
    }

    /// Track shown on the now-playing screen
    pub fn track(&self) -> Option<Track> {
        self.track.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn select_track(&self, track: Track) {
        *self.track.lock().unwrap_or_else(PoisonError::into_inner) = Some(track);
    }

    /// Forget the shown track, so the screen reads "Loading track..." until
    /// the next one resolves
    pub fn clear_track(&self) {
        self.track.lock().unwrap_or_else(PoisonError::into_inner).take();
    }

    pub async fn play_song(&self, track: &Track) -> Result<(), PlayerError> {
        self.select_track(track.clone());
        self.player.play_track(track).await
    }

    pub async fn pause_song(&self) -> Result<(), PlayerError> {
        self.player.pause().await
    }

    pub async fn stop_song(&self) -> Result<(), PlayerError> {
        self.player.stop().await
    }

    pub async fn on_play_pause_click(&self, track: &Track) -> Result<(), PlayerError> {
        if self.player.is_playing() {
            self.pause_song().await
        } else {
            self.play_song(track).await
        }
    }

    pub async fn on_seek(&self, position_ms: u64) -> Result<(), PlayerError> {
        self.player.seek_to(position_ms).await
    }

    /// Seek relative to the last published position, clamped to the track
    pub async fn seek_by(&self, delta_ms: i64) -> Result<(), PlayerError> {
        let state = self.player.snapshot();
        let target = state.position_ms.saturating_add_signed(delta_ms);
        let target = if state.duration_ms > 0 { target.min(state.duration_ms) } else { target };
        self.on_seek(target).await
    }
}
