//! Mock Jamendo server helpers shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use spotify_clone::model::{CatalogClient, CatalogConfig, TrackCache, TrackStore};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-client";
pub const LIMIT: u32 = 10;

pub fn store_for(server: &MockServer) -> TrackStore {
    store_with_url(&server.uri())
}

pub fn store_with_url(base_url: &str) -> TrackStore {
    let client = CatalogClient::new(CatalogConfig {
        base_url: base_url.to_string(),
        client_id: CLIENT_ID.to_string(),
        limit: LIMIT,
    })
    .expect("test URL is valid");
    TrackStore::new(client, TrackCache::new(64))
}

pub fn envelope(results: Value) -> Value {
    let count = results.as_array().map_or(0, Vec::len);
    json!({
        "headers": {
            "status": "success",
            "code": 0,
            "error_message": "",
            "warnings": "",
            "results_count": count
        },
        "results": results
    })
}

pub fn upstream_error(code: i64, message: &str) -> Value {
    json!({
        "headers": {
            "status": "failed",
            "code": code,
            "error_message": message,
            "warnings": "",
            "results_count": 0
        },
        "results": []
    })
}

pub fn track_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "duration": 214,
        "artist_id": "7908",
        "artist_name": "Brad Sucks",
        "album_name": "Out of It",
        "album_id": "24",
        "releasedate": "2012-03-01",
        "album_image": format!("https://usercontent.jamendo.com/?type=album&id={id}"),
        "image": "",
        "audio": format!("https://prod-1.storage.jamendo.com/?trackid={id}&format=mp32"),
        "audiodownload": format!("https://prod-1.storage.jamendo.com/download/track/{id}/mp32/")
    })
}
