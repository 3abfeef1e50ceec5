//! Integration tests for list pagination.
//!
//! These tests verify cursor and offset pagination, the derivation of the
//! next page's query, and auto-paging across pages.

use airwallex_api::resources::{PaymentIntent, Transfer};
use airwallex_api::rest::List;
use airwallex_api::{AirwallexConfig, ApiKey, BaseUrl, Client, ClientId, ErrorKind};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTENTS: &str = "/api/v1/pa/payment_intents";

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/authentication/login"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "tok_1"})))
        .mount(&server)
        .await;

    let config = AirwallexConfig::builder()
        .client_id(ClientId::new("test-client-id").unwrap())
        .api_key(ApiKey::new("test-api-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    (server, Client::new(config).unwrap())
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

fn ids(items: &[PaymentIntent]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.id().map(ToString::to_string))
        .collect()
}

// Specific matchers are mounted first: wiremock serves the first matching mock.

async fn mount_cursor_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(INTENTS))
        .and(query_param("next_cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "int_3"}],
            "has_more": false
        })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(INTENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "int_1"}, {"id": "int_2"}],
            "has_more": true,
            "next_cursor": "c2"
        })))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Single pages
// ============================================================================

#[tokio::test]
async fn test_cursor_pagination_fetches_next_page() {
    let (server, client) = setup().await;
    mount_cursor_pages(&server).await;

    let first = PaymentIntent::list(&client, None, None).await.unwrap();
    assert_eq!(ids(first.data()), vec!["int_1", "int_2"]);
    assert!(first.has_more());
    assert_eq!(first.next_cursor(), Some("c2"));

    let second = first.next_page(&client, None).await.unwrap().unwrap();
    assert_eq!(ids(second.data()), vec!["int_3"]);
    assert!(!second.has_more());

    assert!(second.next_page(&client, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_offset_pagination_advances_by_page_size() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transfers"))
        .and(query_param("offset", "2"))
        .and(query_param("page_size", "2"))
        .and(query_param("status", "PAID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "tr_3"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transfers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "tr_1"}, {"id": "tr_2"}],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = params(json!({"page_size": 2, "status": "PAID"}));
    let first = Transfer::list(&client, Some(&query), None).await.unwrap();
    assert_eq!(first.len(), 2);

    let second = first.next_page(&client, None).await.unwrap().unwrap();
    assert_eq!(second[0].id(), Some("tr_3"));
    assert_eq!(second.params()["offset"], 2);
}

#[tokio::test]
async fn test_list_error_is_propagated() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INTENTS))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "access_denied",
            "message": "Not allowed"
        })))
        .mount(&server)
        .await;

    let error = PaymentIntent::list(&client, None, None).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Permission);
}

// ============================================================================
// Auto-paging
// ============================================================================

#[tokio::test]
async fn test_auto_paging_yields_every_item_in_order() {
    let (server, client) = setup().await;
    mount_cursor_pages(&server).await;

    let first = PaymentIntent::list(&client, None, None).await.unwrap();
    let mut pager = first.auto_paging(&client, None);

    let mut seen = Vec::new();
    while let Some(intent) = pager.next().await.unwrap() {
        seen.push(intent.id().unwrap().to_string());
    }

    assert_eq!(seen, vec!["int_1", "int_2", "int_3"]);
    assert!(pager.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_for_each_across_all_pages_visits_every_item() {
    let (server, client) = setup().await;
    mount_cursor_pages(&server).await;

    let first = PaymentIntent::list(&client, None, None).await.unwrap();
    let mut count = 0;
    first
        .for_each_across_all_pages(&client, None, |_| count += 1)
        .await
        .unwrap();

    assert_eq!(count, 3);
}

#[tokio::test]
async fn test_auto_paging_stops_on_empty_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INTENTS))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(INTENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "int_1"}],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let first = PaymentIntent::list(&client, None, None).await.unwrap();
    let mut seen = Vec::new();
    first
        .for_each_across_all_pages(&client, None, |intent| {
            seen.push(intent.id().unwrap().to_string());
        })
        .await
        .unwrap();

    assert_eq!(seen, vec!["int_1"]);
}

#[tokio::test]
async fn test_bare_array_response_is_a_single_page() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(INTENTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "int_1"},
            {"id": "int_2"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = PaymentIntent::list(&client, None, None).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(!page.has_more());
    assert!(page.next_page(&client, None).await.unwrap().is_none());
}
