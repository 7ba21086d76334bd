//! Core type definitions for the application

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::FactoryError;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ARTIST_ID: &str = "unknown";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Canonical track shape every catalog response is mapped into
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: Artist,
    pub album: Option<AlbumRef>,
    /// Empty when the catalog has no artwork
    pub cover_url: String,
    pub audio_url: String,
    pub duration_ms: u64,
    pub release_date: Option<NaiveDate>,
}

impl Track {
    pub fn album_name(&self) -> &str {
        self.album.as_ref().map(|a| a.name.as_str()).unwrap_or(UNKNOWN_ALBUM)
    }

    pub fn has_cover(&self) -> bool {
        !self.cover_url.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: String,
}

/// A community playlist from the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub created: Option<NaiveDate>,
    pub track_count: usize,
}

/// A mood preset: a display name and the catalog tag it searches for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mood {
    pub name: &'static str,
    pub tag: &'static str,
}

const MOOD_PRESETS: [Mood; 6] = [
    Mood { name: "Chill", tag: "chillout" },
    Mood { name: "Focus", tag: "ambient" },
    Mood { name: "Happy", tag: "happy" },
    Mood { name: "Energetic", tag: "energetic" },
    Mood { name: "Rock", tag: "rock" },
    Mood { name: "Jazz", tag: "jazz" },
];

impl Mood {
    pub fn presets() -> &'static [Mood] {
        &MOOD_PRESETS
    }
}

/// Player status as seen by the playback controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Observable playback values for the now-playing view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
}

impl PlaybackState {
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_ms > 0 {
            (self.position_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Observable state of the home screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Track>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

const HOME_ROUTE: &str = "home";
const SONG_INFO_PREFIX: &str = "song_info/";

/// Navigation destinations
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    SongInfo { track_id: String },
}

impl Route {
    pub fn song_info(track_id: impl Into<String>) -> Self {
        Route::SongInfo { track_id: track_id.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str(HOME_ROUTE),
            Route::SongInfo { track_id } => write!(f, "{SONG_INFO_PREFIX}{track_id}"),
        }
    }
}

impl FromStr for Route {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == HOME_ROUTE {
            return Ok(Route::Home);
        }
        match s.strip_prefix(SONG_INFO_PREFIX) {
            Some(track_id) if !track_id.is_empty() => Ok(Route::song_info(track_id)),
            _ => Err(FactoryError::UnknownStateHolder(s.to_string())),
        }
    }
}

/// Which section of the home screen has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Moods,
    Playlists,
    Results,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Moods,
            ActiveSection::Moods => ActiveSection::Playlists,
            ActiveSection::Playlists => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Moods => ActiveSection::Search,
            ActiveSection::Playlists => ActiveSection::Moods,
            ActiveSection::Results => ActiveSection::Playlists,
        }
    }
}

/// View-only state: focus, selections, current screen
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub route: Route,
    pub active_section: ActiveSection,
    pub mood_selected: usize,
    pub playlist_selected: usize,
    pub result_selected: usize,
    /// Player failures; search failures live in [`SearchState`]
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl UiState {
    pub fn move_up(&mut self) {
        let index = match self.active_section {
            ActiveSection::Moods => &mut self.mood_selected,
            ActiveSection::Playlists => &mut self.playlist_selected,
            ActiveSection::Results => &mut self.result_selected,
            ActiveSection::Search => return,
        };
        *index = index.saturating_sub(1);
    }

    /// `len` is the length of the list in the focused section
    pub fn move_down(&mut self, len: usize) {
        let index = match self.active_section {
            ActiveSection::Moods => &mut self.mood_selected,
            ActiveSection::Playlists => &mut self.playlist_selected,
            ActiveSection::Results => &mut self.result_selected,
            ActiveSection::Search => return,
        };
        if *index + 1 < len {
            *index += 1;
        }
    }
}
