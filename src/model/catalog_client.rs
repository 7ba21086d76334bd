//! Jamendo catalog API client

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};
use crate::log_api_request;

use super::dto::{Envelope, PlaylistDto, PlaylistTracksDto, TrackDto};

const AUDIO_FORMAT: &str = "mp32";
const POPULARITY_ORDER: &str = "popularity_week";

/// Connection settings for the catalog
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub client_id: String,
    pub limit: u32,
}

/// Thin client over the Jamendo v3.0 REST API.
///
/// One call is one GET round trip. There is no retry and no backoff; the
/// timeouts are the reqwest defaults.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    config: Arc<CatalogConfig>,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> ApiResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url} must start with http:// or https://"
            )));
        }

        let http = Client::builder()
            .user_agent(format!("spotify-clone/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(CatalogConfig { base_url, ..config }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<Vec<T>> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let limit = self.config.limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("client_id", self.config.client_id.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Catalog returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if envelope.headers.code != 0 {
            return Err(ApiError::Upstream {
                code: envelope.headers.code,
                message: envelope.headers.error_message,
            });
        }

        tracing::trace!(%url, results = envelope.results.len(), "Catalog response decoded");
        Ok(envelope.results)
    }

    pub async fn search_tracks(&self, query: &str) -> ApiResult<Vec<TrackDto>> {
        log_api_request!("search_tracks", query);
        self.get("tracks/", &[("search", query), ("audioformat", AUDIO_FORMAT)])
            .await
    }

    pub async fn tracks_by_tag(&self, tag: &str) -> ApiResult<Vec<TrackDto>> {
        log_api_request!("tracks_by_tag", tag);
        self.get("tracks/", &[("tags", tag), ("audioformat", AUDIO_FORMAT)])
            .await
    }

    pub async fn popular_tracks(&self) -> ApiResult<Vec<TrackDto>> {
        log_api_request!("popular_tracks", order = POPULARITY_ORDER);
        self.get("tracks/", &[("order", POPULARITY_ORDER), ("audioformat", AUDIO_FORMAT)])
            .await
    }

    pub async fn track_by_id(&self, track_id: &str) -> ApiResult<Vec<TrackDto>> {
        log_api_request!("track_by_id", track_id);
        self.get("tracks/", &[("id", track_id), ("audioformat", AUDIO_FORMAT)])
            .await
    }

    pub async fn playlists(&self, name: Option<&str>) -> ApiResult<Vec<PlaylistDto>> {
        log_api_request!("playlists", name = ?name);
        match name {
            Some(name) => self.get("playlists/", &[("name", name)]).await,
            None => self.get("playlists/", &[]).await,
        }
    }

    pub async fn playlist_tracks(&self, playlist_id: &str) -> ApiResult<Vec<PlaylistTracksDto>> {
        log_api_request!("playlist_tracks", playlist_id);
        self.get("playlists/tracks/", &[("id", playlist_id), ("audioformat", AUDIO_FORMAT)])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> CatalogConfig {
        CatalogConfig {
            base_url: url.to_string(),
            client_id: "test".to_string(),
            limit: 20,
        }
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = CatalogClient::new(config("https://api.jamendo.com/v3.0///")).unwrap();
        assert_eq!(client.base_url(), "https://api.jamendo.com/v3.0");
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        match CatalogClient::new(config("api.jamendo.com")) {
            Err(ApiError::InvalidUrl(msg)) => assert!(msg.contains("http://")),
            Err(other) => panic!("Expected InvalidUrl, got {other}"),
            Ok(_) => panic!("Expected InvalidUrl"),
        }
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            CatalogClient::new(config("")),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
