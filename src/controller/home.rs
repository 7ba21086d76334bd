//! Home screen state holder: search text, results, loading flag, error text.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::StoreResult;
use crate::model::{Mood, Playlist, SearchState, Track, TrackStore};

const NO_RESULTS: &str = "No result found";
const NO_TRACKS: &str = "No tracks found";

/// Owns the home screen's [`SearchState`] and publishes every change.
///
/// Concurrent loads are not coordinated: whichever response lands last
/// decides the results.
#[derive(Clone)]
pub struct HomeState {
    store: TrackStore,
    state: Arc<watch::Sender<SearchState>>,
    playlists: Arc<watch::Sender<Vec<Playlist>>>,
}

impl HomeState {
    pub fn new(store: TrackStore) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let (playlists, _) = watch::channel(Vec::new());
        Self {
            store,
            state: Arc::new(state),
            playlists: Arc::new(playlists),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn subscribe_playlists(&self) -> watch::Receiver<Vec<Playlist>> {
        self.playlists.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.borrow().clone()
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    /// Called when the home screen becomes visible
    pub async fn on_activate(&self) {
        if self.state.borrow().results.is_empty() {
            self.load_popular().await;
        }
    }

    pub fn update_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|state| state.query = query);
    }

    pub fn push_query_char(&self, c: char) {
        self.state.send_modify(|state| state.query.push(c));
    }

    pub fn pop_query_char(&self) {
        self.state.send_modify(|state| {
            state.query.pop();
        });
    }

    pub async fn search_tracks(&self) {
        let query = self.state.borrow().query.trim().to_string();
        if query.is_empty() {
            tracing::debug!("Blank query, search skipped");
            return;
        }

        tracing::info!(%query, "Searching tracks");
        let result = self.run_load(|store| async move { store.search_by_text(&query).await }).await;
        self.publish_tracks(result, NO_RESULTS, "Search failed");
    }

    pub async fn load_popular(&self) {
        tracing::info!("Loading popular tracks");
        let result = self.run_load(|store| async move { store.list_popular().await }).await;
        self.publish_tracks(result, NO_TRACKS, "Failed to load tracks");
    }

    pub async fn load_mood(&self, mood: &Mood) {
        tracing::info!(mood = mood.name, tag = mood.tag, "Loading mood");
        let tag = mood.tag;
        let result = self.run_load(|store| async move { store.search_by_mood(tag).await }).await;
        self.publish_tracks(result, NO_TRACKS, "Failed to load tracks");
    }

    pub async fn open_playlist(&self, playlist_id: &str) {
        tracing::info!(playlist_id, "Opening playlist");
        let playlist_id = playlist_id.to_string();
        let result = self
            .run_load(|store| async move { store.list_playlist_tracks(&playlist_id).await })
            .await;
        self.publish_tracks(result, NO_TRACKS, "Failed to load playlist");
    }

    pub async fn load_playlists(&self, name: Option<&str>) {
        match self.store.list_playlists(name).await {
            Ok(playlists) => {
                tracing::debug!(count = playlists.len(), "Playlists loaded");
                self.playlists.send_replace(playlists);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load playlists");
                self.state
                    .send_modify(|state| state.error_message = Some(format!("Failed to load playlists: {e}")));
            }
        }
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error_message.take().is_some());
    }

    async fn run_load<F, Fut>(&self, load: F) -> StoreResult<Vec<Track>>
    where
        F: FnOnce(TrackStore) -> Fut,
        Fut: Future<Output = StoreResult<Vec<Track>>>,
    {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
        load(self.store.clone()).await
    }

    fn publish_tracks(&self, result: StoreResult<Vec<Track>>, empty_message: &str, failure_prefix: &str) {
        self.state.send_modify(|state| {
            match result {
                Ok(tracks) => {
                    if tracks.is_empty() {
                        state.error_message = Some(empty_message.to_string());
                    }
                    state.results = tracks;
                }
                Err(e) => {
                    tracing::error!(error = %e, "{failure_prefix}");
                    state.error_message = Some(format!("{failure_prefix}: {e}"));
                }
            }
            state.is_loading = false;
        });
    }
}
