//! Error types shared by the catalog client, the track store and the player.

use thiserror::Error;

/// Failures of a single round trip to the music catalog.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Connection, TLS or body transfer failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not the JSON shape we expect
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Jamendo answers HTTP 200 and reports failures in its `headers` block
    #[error("catalog error {code}: {message}")]
    Upstream { code: i64, message: String },
}

/// Failures surfaced by [`TrackStore`](crate::model::TrackStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    NotFound(&'static str),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Failures of the audio backend and the playback controller.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("audio output unavailable: {0}")]
    Output(String),

    #[error("failed to fetch audio stream: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to decode audio stream: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("failed to open audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("no stream loaded")]
    NothingLoaded,

    #[error("player already released")]
    Released,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FactoryError {
    #[error("unknown state holder requested for route `{0}`")]
    UnknownStateHolder(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
