//! Home state holder tests against a mock Jamendo catalog.

mod common;

use common::{envelope, store_for, track_json};
use serde_json::json;
use spotify_clone::controller::HomeState;
use spotify_clone::model::Mood;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_tracks(server: &MockServer, param: (&str, &str), tracks: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param(param.0, param.1))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(tracks)))
        .mount(server)
        .await;
}

// =============================================================================
// Search
// =============================================================================

mod search {
    use super::*;

    #[tokio::test]
    async fn test_blank_query_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
            .expect(0)
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.update_query("   ");
        let before = home.snapshot();

        home.search_tracks().await;

        assert_eq!(home.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_query_does_not_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
            .expect(0)
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        let mut rx = home.subscribe();

        home.update_query("lo");
        home.push_query_char('f');
        home.push_query_char('i');

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().query, "lofi");
    }

    #[tokio::test]
    async fn test_zero_results_reports_no_result_found() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("search", "lofi"), json!([])).await;

        let home = HomeState::new(store_for(&server));
        home.update_query("lofi");
        home.search_tracks().await;

        let state = home.snapshot();
        assert_eq!(state.error_message.as_deref(), Some("No result found"));
        assert!(!state.is_loading);
        assert!(state.results.is_empty());
    }

    #[tokio::test]
    async fn test_results_replace_previous_and_clear_error() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("search", "rock"), json!([track_json("1", "Riff")])).await;

        let home = HomeState::new(store_for(&server));
        home.update_query("rock");
        home.search_tracks().await;

        let state = home.snapshot();
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].title, "Riff");
        assert!(state.error_message.is_none());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_query_is_trimmed_before_search() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("search", "jazz"), json!([track_json("3", "Blue")])).await;

        let home = HomeState::new(store_for(&server));
        home.update_query("  jazz ");
        home.search_tracks().await;

        assert_eq!(home.snapshot().results.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_cause_in_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.update_query("lofi");
        home.search_tracks().await;

        let state = home.snapshot();
        let message = state.error_message.unwrap();
        assert!(message.starts_with("Search failed: "), "{message}");
        assert!(message.contains("503"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("search", "lofi"), json!([])).await;

        let home = HomeState::new(store_for(&server));
        home.update_query("lofi");
        home.search_tracks().await;
        home.clear_error();

        assert!(home.snapshot().error_message.is_none());
    }
}

// =============================================================================
// Browsing
// =============================================================================

mod browsing {
    use super::*;

    #[tokio::test]
    async fn test_activate_loads_popular_only_when_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .and(query_param("order", "popularity_week"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(json!([track_json("9", "Top")]))),
            )
            .expect(1)
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.on_activate().await;
        home.on_activate().await;

        assert_eq!(home.snapshot().results[0].title, "Top");
    }

    #[tokio::test]
    async fn test_popular_failure_keeps_cause_in_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .and(query_param("order", "popularity_week"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.on_activate().await;

        let state = home.snapshot();
        let message = state.error_message.unwrap();
        assert!(message.starts_with("Failed to load tracks: "), "{message}");
        assert!(message.contains("503"));
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_popular_with_no_tracks() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("order", "popularity_week"), json!([])).await;

        let home = HomeState::new(store_for(&server));
        home.load_popular().await;

        let state = home.snapshot();
        assert_eq!(state.error_message.as_deref(), Some("No tracks found"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_load_mood_searches_its_tag() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("tags", "chillout"), json!([track_json("4", "Drift")])).await;

        let home = HomeState::new(store_for(&server));
        let chill = Mood::presets()[0];
        home.load_mood(&chill).await;

        assert_eq!(home.snapshot().results[0].title, "Drift");
    }

    #[tokio::test]
    async fn test_load_mood_with_no_tracks() {
        let server = MockServer::start().await;
        mount_tracks(&server, ("tags", "jazz"), json!([])).await;

        let home = HomeState::new(store_for(&server));
        let jazz = Mood::presets().iter().find(|m| m.tag == "jazz").copied().unwrap();
        home.load_mood(&jazz).await;

        assert_eq!(home.snapshot().error_message.as_deref(), Some("No tracks found"));
    }

    #[tokio::test]
    async fn test_open_playlist_shows_its_tracks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/tracks/"))
            .and(query_param("id", "77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                { "id": 77, "name": "Road Trip", "tracks": [track_json("5", "Highway")] }
            ]))))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.open_playlist("77").await;

        let state = home.snapshot();
        assert_eq!(state.results[0].title, "Highway");
        assert!(state.error_message.is_none());
    }

    #[tokio::test]
    async fn test_open_missing_playlist_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/tracks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.open_playlist("0").await;

        let message = home.snapshot().error_message.unwrap();
        assert!(message.starts_with("Failed to load playlist"), "{message}");
    }

    #[tokio::test]
    async fn test_load_playlists_publishes_sidebar() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
                { "id": "1", "name": "Focus", "user_name": "jamendo" },
                { "id": "2", "name": "Workout" }
            ]))))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        let mut rx = home.subscribe_playlists();
        home.load_playlists(None).await;

        assert!(rx.has_changed().unwrap());
        let playlists = rx.borrow_and_update().clone();
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[1].owner, "Unknown");
    }

    #[tokio::test]
    async fn test_load_playlists_failure_sets_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let home = HomeState::new(store_for(&server));
        home.load_playlists(None).await;

        let state = home.snapshot();
        let message = state.error_message.unwrap();
        assert!(message.starts_with("Failed to load playlists: "), "{message}");
        assert!(message.contains("500"));
        assert!(!state.is_loading);
        assert!(home.playlists().is_empty());
    }
}
