//! Transfer object -> canonical model conversions

use chrono::NaiveDate;

use super::dto::{PlaylistDto, TrackDto};
use super::types::{
    AlbumRef, Artist, Playlist, Track, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_ARTIST_ID, UNKNOWN_OWNER,
};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    // Jamendo uses plain dates for tracks and "YYYY-MM-DD hh:mm:ss" for playlists
    let date_part = value.split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

impl From<TrackDto> for Track {
    fn from(dto: TrackDto) -> Self {
        let album_name = non_empty(dto.album_name);
        let album_id = non_empty(dto.album_id);
        let album = if album_name.is_some() || album_id.is_some() {
            Some(AlbumRef {
                id: album_id,
                name: album_name.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            })
        } else {
            None
        };

        let cover_url = non_empty(dto.album_image)
            .or_else(|| non_empty(dto.image))
            .unwrap_or_default();

        let audio_url = if dto.audio.trim().is_empty() {
            non_empty(dto.audiodownload).unwrap_or_default()
        } else {
            dto.audio
        };

        Track {
            release_date: parse_date(dto.releasedate.as_deref()),
            id: dto.id,
            title: dto.name,
            artist: Artist {
                id: non_empty(dto.artist_id).unwrap_or_else(|| UNKNOWN_ARTIST_ID.to_string()),
                name: non_empty(dto.artist_name).unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            },
            album,
            cover_url,
            audio_url,
            duration_ms: dto.duration.saturating_mul(1000),
        }
    }
}

impl From<PlaylistDto> for Playlist {
    fn from(dto: PlaylistDto) -> Self {
        Playlist {
            created: parse_date(dto.creationdate.as_deref()),
            track_count: dto.tracks.as_ref().map(Vec::len).unwrap_or(0),
            id: dto.id,
            name: dto.name,
            owner: non_empty(dto.user_name).unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
        }
    }
}

pub fn map_tracks(dtos: Vec<TrackDto>) -> Vec<Track> {
    dtos.into_iter().map(Track::from).collect()
}
