//! Navigation-related controller methods (search, moods, playlists, song info)

use crate::error::StoreError;
use crate::model::{ActiveSection, Mood, Route};

use super::factory::StateHolder;
use super::AppController;

impl AppController {
    pub async fn perform_search(&self) {
        let home = self.home();
        if home.snapshot().query.trim().is_empty() {
            return;
        }
        self.show_results().await;
        tokio::spawn(async move { home.search_tracks().await });
    }

    pub async fn load_selected_mood(&self) {
        let selected = self.ui.lock().await.mood_selected;
        let Some(mood) = Mood::presets().get(selected).copied() else {
            return;
        };
        self.show_results().await;
        let home = self.home();
        tokio::spawn(async move { home.load_mood(&mood).await });
    }

    pub async fn open_selected_playlist(&self) {
        let selected = self.ui.lock().await.playlist_selected;
        let home = self.home();
        let Some(playlist) = home.playlists().into_iter().nth(selected) else {
            return;
        };
        tracing::debug!(playlist = %playlist.name, "Opening playlist");
        self.show_results().await;
        tokio::spawn(async move { home.open_playlist(&playlist.id).await });
    }

    pub async fn open_selected_result(&self) {
        let selected = self.ui.lock().await.result_selected;
        let Some(track) = self.home().snapshot().results.into_iter().nth(selected) else {
            return;
        };
        self.navigate(&Route::song_info(track.id).to_string()).await;
    }

    /// Switch screens by route string; unknown routes land on the status line
    pub async fn navigate(&self, destination: &str) {
        let route: Route = match destination.parse() {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(error = %e, "Navigation rejected");
                self.ui.lock().await.status_message = Some(e.to_string());
                return;
            }
        };
        tracing::debug!(%route, "Navigating");

        let holder = self.factory.for_route(&route);
        self.ui.lock().await.route = route.clone();

        match holder {
            StateHolder::Home(home) => {
                tokio::spawn(async move { home.on_activate().await });
            }
            StateHolder::SongInfo(_) => {
                if let Route::SongInfo { track_id } = route {
                    self.play_by_id(track_id);
                }
            }
        }
    }

    pub async fn navigate_back(&self) {
        let route = self.ui.lock().await.route.clone();
        if route != Route::Home {
            self.navigate(&Route::Home.to_string()).await;
        }
    }

    /// Resolve the track from the cache, falling back to the catalog, then play it
    fn play_by_id(&self, track_id: String) {
        let store = self.home().store().clone();
        let ui = self.ui.clone();
        let song_info = self.song_info();
        // The previous track must not stay on screen under the new route
        song_info.clear_track();
        tokio::spawn(async move {
            let track = match store.cached(&track_id) {
                Some(track) => track,
                None => match store.fetch_by_id(&track_id).await {
                    Ok(track) => track,
                    Err(e) => {
                        tracing::error!(track_id, error = %e, "Could not resolve track");
                        let message = match e {
                            StoreError::NotFound(msg) => msg.to_string(),
                            other => format!("Failed to load track: {other}"),
                        };
                        ui.lock().await.status_message = Some(message);
                        return;
                    }
                },
            };

            if let Err(e) = song_info.play_song(&track).await {
                tracing::error!(track_id, error = %e, "Playback failed");
                ui.lock().await.status_message = Some(Self::format_error(&e));
            }
        });
    }

    async fn show_results(&self) {
        let mut ui = self.ui.lock().await;
        ui.active_section = ActiveSection::Results;
        ui.result_selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::audio::fake::FakePlayer;
    use crate::model::{Artist, Track};
    use super::super::tests::controller_with;
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artist: Artist { id: "a".to_string(), name: "Artist".to_string() },
            album: None,
            cover_url: String::new(),
            audio_url: format!("https://cdn.example/{id}.mp3"),
            duration_ms: 90_000,
            release_date: None,
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn navigate_to_cached_track_plays_it() {
        let player = Arc::new(FakePlayer::default());
        let controller = controller_with(player.clone());
        controller.home().store().cache().insert(track("42"));

        controller.navigate("song_info/42").await;
        settle().await;

        assert_eq!(controller.ui_state().await.route, Route::song_info("42"));
        assert_eq!(*player.loaded.lock().unwrap(), vec!["https://cdn.example/42.mp3"]);
        assert_eq!(controller.song_info().track().map(|t| t.id), Some("42".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_output_device_lands_on_status_line() {
        let player = Arc::new(FakePlayer::without_output());
        let controller = controller_with(player.clone());
        controller.home().store().cache().insert(track("42"));

        controller.navigate("song_info/42").await;
        settle().await;

        let ui = controller.ui_state().await;
        assert_eq!(ui.status_message.as_deref(), Some("No audio output device available."));
        assert_eq!(ui.route, Route::song_info("42"));
        assert!(!controller.should_quit().await);
        assert!(!controller.song_info().is_playing());
    }

    #[tokio::test]
    async fn navigating_to_another_track_clears_the_old_one() {
        let controller = controller_with(Arc::new(FakePlayer::default()));
        controller.song_info().select_track(track("A"));

        // "B" is neither cached nor reachable
        controller.navigate("song_info/B").await;
        assert!(controller.song_info().track().is_none());

        let message = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(message) = controller.ui_state().await.status_message {
                    return message;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        assert!(message.starts_with("Failed to load track: "));
        assert!(controller.song_info().track().is_none());
        assert_eq!(controller.ui_state().await.route, Route::song_info("B"));
    }

    #[tokio::test]
    async fn unknown_route_keeps_current_screen() {
        let controller = controller_with(Arc::new(FakePlayer::default()));

        controller.navigate("settings").await;

        let ui = controller.ui_state().await;
        assert_eq!(ui.route, Route::Home);
        assert!(ui.status_message.unwrap().contains("settings"));
    }

    #[tokio::test]
    async fn blank_search_stays_in_search_section() {
        let controller = controller_with(Arc::new(FakePlayer::default()));
        controller.home().update_query("   ");

        controller.perform_search().await;

        assert_eq!(controller.ui_state().await.active_section, ActiveSection::Search);
    }
}
