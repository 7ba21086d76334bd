//! Model module - catalog access and data types
//!
//! - `types`: domain types (track, playlist, mood), observable state, routes
//! - `dto`: Jamendo transfer objects
//! - `mapper`: transfer object -> domain conversions
//! - `cache`: bounded track cache
//! - `catalog_client`: Jamendo API client
//! - `track_store`: fetch + map + cache façade

mod types;
mod dto;
mod mapper;
mod cache;
mod catalog_client;
mod track_store;

pub use types::{
    ActiveSection, AlbumRef, Artist, Mood, PlaybackState, PlayerStatus, Playlist, Route,
    SearchState, Track, UiState, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};

pub use dto::{PlaylistDto, PlaylistTracksDto, TrackDto};

pub use cache::TrackCache;

pub use catalog_client::{CatalogClient, CatalogConfig};

pub use track_store::TrackStore;
