//! Jamendo response shapes. These exist only to decode one response and are
//! mapped into [`Track`](super::Track) / [`Playlist`](super::Playlist) right away.

use serde::{Deserialize, Deserializer};

/// Every Jamendo response is wrapped in this envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub headers: ResponseHeaders,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseHeaders {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub results_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub album_id: Option<String>,
    #[serde(default)]
    pub album_image: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub audiodownload: Option<String>,
    /// Seconds
    #[serde(default, deserialize_with = "number_or_string")]
    pub duration: u64,
    #[serde(default)]
    pub releasedate: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub creationdate: Option<String>,
    #[serde(default)]
    pub tracks: Option<Vec<TrackDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksDto {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<TrackDto>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Unsigned(n) => n.to_string(),
            StringOrNumber::Signed(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(0),
        Some(StringOrNumber::Unsigned(n)) => Ok(n),
        Some(StringOrNumber::Signed(n)) => Ok(n.max(0) as u64),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(0),
        Some(StringOrNumber::String(s)) => s.trim().parse().map_err(D::Error::custom),
    }
}
