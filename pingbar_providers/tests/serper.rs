//! `SerperProvider` against a local mock of the Serper API.

use std::time::Duration;

use pingbar_core::{ProviderError, SearchProvider, parse_places};
use pingbar_providers::SerperProvider;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> SerperProvider {
    SerperProvider::new("test-key".to_string())
        .with_base_url(server.uri())
        .with_retry_delays(vec![Duration::from_millis(1)])
}

#[tokio::test]
async fn fetch_places_returns_raw_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/places"))
        .and(header("X-API-KEY", "test-key"))
        .and(body_partial_json(json!({
            "q": "farmacia madrid",
            "location": "madrid, España",
            "num": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                {"title": "Farmacia Sol", "address": "Puerta del Sol 1, Madrid", "rating": 4.2}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = provider(&server)
        .fetch_places("farmacia", "madrid", 5)
        .await
        .unwrap();
    let places = parse_places(&raw).unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].title, "Farmacia Sol");
}

#[tokio::test]
async fn fetch_snippets_queries_hours() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"q": "horario bar pepe madrid", "num": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic": [
                {"title": "Bar Pepe", "snippet": "Abierto de 10:00 a 23:00"},
                {"title": "Sin snippet"},
                {"title": "Otro", "snippet": "Tapas y raciones"}
            ]
        })))
        .mount(&server)
        .await;

    let snippets = provider(&server)
        .fetch_snippets("bar pepe", "madrid")
        .await
        .unwrap();
    assert_eq!(snippets, vec!["Abierto de 10:00 a 23:00", "Tapas y raciones"]);
}

#[tokio::test]
async fn status_codes_map_to_errors() {
    let server = MockServer::start().await;
    Mock::given(path("/places"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = provider(&server);
    assert!(matches!(
        provider.fetch_places("bar", "madrid", 1).await,
        Err(ProviderError::InvalidKey)
    ));
    assert!(matches!(
        provider.fetch_snippets("bar", "madrid").await,
        Err(ProviderError::LimitReached)
    ));
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(path("/places"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider(&server).fetch_places("bar", "madrid", 1).await;
    assert!(matches!(result, Err(ProviderError::Status(500))));
}

#[tokio::test]
async fn missing_api_key_fails_fast() {
    let server = MockServer::start().await;
    let provider = SerperProvider::new(String::new()).with_base_url(server.uri());

    assert!(matches!(
        provider.fetch_places("bar", "madrid", 1).await,
        Err(ProviderError::NoApiKey)
    ));
    assert!(matches!(
        provider.fetch_snippets("bar", "madrid").await,
        Err(ProviderError::NoApiKey)
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    let provider = SerperProvider::new("test-key".to_string())
        .with_base_url("http://127.0.0.1:9".to_string())
        .with_retry_delays(vec![Duration::from_millis(1)]);

    let result = provider.fetch_snippets("bar", "madrid").await;
    assert!(matches!(result, Err(ProviderError::Connection(_))));
}
