//! Track store: catalog fetch + mapping + memoization

use crate::error::{StoreError, StoreResult};
use crate::log_api_result;

use super::cache::TrackCache;
use super::catalog_client::CatalogClient;
use super::mapper::map_tracks;
use super::types::{Playlist, Track};

/// Façade over [`CatalogClient`] that maps every response into canonical
/// [`Track`]s and remembers them by id.
///
/// Failures never touch the cache.
#[derive(Clone)]
pub struct TrackStore {
    client: CatalogClient,
    cache: TrackCache,
}

impl TrackStore {
    pub fn new(client: CatalogClient, cache: TrackCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &TrackCache {
        &self.cache
    }

    fn remember(&self, tracks: &[Track]) {
        self.cache.insert_all(tracks);
        tracing::trace!(count = tracks.len(), cached = self.cache.len(), "Tracks cached");
    }

    /// Free-text search over track names, artists and tags
    pub async fn search_by_text(&self, query: &str) -> StoreResult<Vec<Track>> {
        let result = self.client.search_tracks(query).await;
        log_api_result!("search_tracks", result);

        let tracks = map_tracks(result?);
        self.remember(&tracks);
        Ok(tracks)
    }

    pub async fn search_by_mood(&self, tag: &str) -> StoreResult<Vec<Track>> {
        let result = self.client.tracks_by_tag(tag).await;
        log_api_result!("tracks_by_tag", result);

        let tracks = map_tracks(result?);
        self.remember(&tracks);
        Ok(tracks)
    }

    pub async fn list_popular(&self) -> StoreResult<Vec<Track>> {
        let result = self.client.popular_tracks().await;
        log_api_result!("popular_tracks", result);

        let tracks = map_tracks(result?);
        self.remember(&tracks);
        Ok(tracks)
    }

    pub async fn fetch_by_id(&self, track_id: &str) -> StoreResult<Track> {
        let result = self.client.track_by_id(track_id).await;
        log_api_result!("track_by_id", result);

        let track = result?
            .into_iter()
            .next()
            .map(Track::from)
            .ok_or(StoreError::NotFound("Track not found"))?;

        self.cache.insert(track.clone());
        Ok(track)
    }

    /// Cache-only lookup, no network
    pub fn cached(&self, track_id: &str) -> Option<Track> {
        self.cache.get(track_id)
    }

    pub async fn list_playlists(&self, name: Option<&str>) -> StoreResult<Vec<Playlist>> {
        let result = self.client.playlists(name).await;
        log_api_result!("playlists", result);

        Ok(result?.into_iter().map(Playlist::from).collect())
    }

    pub async fn list_playlist_tracks(&self, playlist_id: &str) -> StoreResult<Vec<Track>> {
        let result = self.client.playlist_tracks(playlist_id).await;
        log_api_result!("playlist_tracks", result);

        let playlist = result?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound("Playlist not found"))?;

        let tracks = map_tracks(playlist.tracks);
        self.remember(&tracks);
        Ok(tracks)
    }
}
