//! Tests for the catalog client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a running catalog service.

use serde_json::json;
use sterophile_client::{CatalogClient, ClientConfig, ClientError};
use sterophile_core::{CatalogProvider, CoreError, TrackId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn song(id: usize, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": name,
        "artist": "Test Artist",
        "imageUrl": format!("https://cdn.test/{id}.jpg"),
        "audioUrl": format!("https://cdn.test/{id}.mp3"),
    })
}

async fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(ClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_valid_urls() {
        assert!(CatalogClient::new(ClientConfig::new("https://example.com")).is_ok());
        assert!(CatalogClient::new(ClientConfig::new("http://localhost:4000")).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match CatalogClient::new(ClientConfig::new("")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match CatalogClient::new(ClientConfig::new("example.com")) {
            Err(ClientError::InvalidUrl(msg)) => assert!(msg.contains("http://")),
            other => panic!("Expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_ftp_scheme_rejected() {
        assert!(matches!(
            CatalogClient::new(ClientConfig::new("ftp://example.com")),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_missing_host_rejected() {
        assert!(matches!(
            CatalogClient::new(ClientConfig::new("http://")),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_normalization_trailing_slash() {
        let client = CatalogClient::new(ClientConfig::new("https://example.com/")).unwrap();
        assert_eq!(client.url(), "https://example.com");
    }
}

// =============================================================================
// Health Tests
// =============================================================================

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "ok", "version": "0.1.0", "songs": 4 })),
            )
            .mount(&server)
            .await;

        let health = client_for(&server).await.health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, "0.1.0");
        assert_eq!(health.songs, 4);
    }

    #[tokio::test]
    async fn test_health_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        match client_for(&server).await.health().await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = CatalogClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();
        assert!(matches!(
            client.health().await,
            Err(ClientError::ServerUnreachable(_))
        ));
    }
}

// =============================================================================
// Song Tests
// =============================================================================

mod songs {
    use super::*;

    #[tokio::test]
    async fn test_list_tracks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "songs": [song(0, "Dreams"), song(1, "Sunrise")],
                "total": 2,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tracks = client_for(&server).await.list_tracks().await.unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1].title, "Sunrise");
        assert_eq!(tracks[1].audio_url, "https://cdn.test/1.mp3");
    }

    #[tokio::test]
    async fn test_get_track() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song(1, "Sunrise")))
            .mount(&server)
            .await;

        let track = client_for(&server)
            .await
            .get_track(TrackId::new(1))
            .await
            .unwrap();
        assert_eq!(track.id, TrackId::new(1));
        assert_eq!(track.title, "Sunrise");
    }

    #[tokio::test]
    async fn test_get_track_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs/42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Song not found" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.get_track(TrackId::new(42)).await,
            Err(ClientError::NotFound(id)) if id == "42"
        ));

        let provided = CatalogProvider::get_track(&client, TrackId::new(42)).await;
        assert!(matches!(provided, Ok(None)));
    }

    #[tokio::test]
    async fn test_error_body_message_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "catalog offline" })),
            )
            .mount(&server)
            .await;

        match client_for(&server).await.list_tracks().await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "catalog offline");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).await.list_tracks().await,
            Err(ClientError::ParseError(_))
        ));
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_fetch_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "songs": [song(0, "A"), song(1, "B"), song(2, "C")],
                "total": 3,
            })))
            .mount(&server)
            .await;

        let catalog = client_for(&server).await.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(TrackId::new(2)).unwrap().title, "C");
    }

    #[tokio::test]
    async fn test_fetch_catalog_rejects_gaps() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "songs": [song(0, "A"), song(2, "C")],
                "total": 2,
            })))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).await.fetch_catalog().await,
            Err(ClientError::InvalidCatalog(CoreError::IdMismatch { position: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn test_provider_maps_failures_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/songs"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert!(matches!(
            client.load_catalog().await,
            Err(CoreError::Unavailable(_))
        ));
    }
}
