//! Integration tests for resource operations.
//!
//! These tests verify the wire contract of the capability traits (create,
//! retrieve, update, save, delete, refresh) and of the per-resource actions,
//! using a `wiremock` server in place of the Airwallex API.

use airwallex_api::resources::{Balance, Beneficiary, Customer, Dispute, PaymentIntent, Rate, Transfer};
use airwallex_api::rest::{ApiResource, Create, Delete, List, Retrieve, Update};
use airwallex_api::{AirwallexConfig, ApiKey, BaseUrl, Client, ClientId, ErrorKind};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server with a login endpoint mounted.
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

async fn last_body(server: &MockServer, target: &str) -> Value {
    let request = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| request.url.path() == target)
        .last()
        .unwrap();
    serde_json::from_slice(&request.body).unwrap()
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// ============================================================================
// Generic operations
// ============================================================================

#[tokio::test]
async fn test_create_posts_to_create_path() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/pa/customers/create"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "cus_1",
            "email": "ada@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let customer = Customer::create(&client, json!({"email": "ada@example.com"}), None)
        .await
        .unwrap();

    assert_eq!(customer.id(), Some("cus_1"));
    assert_eq!(customer.get_str("email"), Some("ada@example.com"));
    assert!(!customer.is_dirty());
}

#[tokio::test]
async fn test_retrieve_percent_encodes_id() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transfers/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a/b"})))
        .expect(1)
        .mount(&server)
        .await;

    let transfer = Transfer::retrieve(&client, "a/b", None).await.unwrap();
    assert_eq!(transfer.id(), Some("a/b"));
}

#[tokio::test]
async fn test_save_sends_only_changed_fields() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pa/customers/cus_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cus_1",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Byron"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/pa/customers/cus_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cus_1",
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "updated_at": "2024-01-01T00:00:00+0000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut customer = Customer::retrieve(&client, "cus_1", None).await.unwrap();
    customer.set("last_name", "King");
    customer.set("last_name", "Lovelace");
    customer.save(&client, None).await.unwrap();

    let body = last_body(&server, "/api/v1/pa/customers/cus_1").await;
    let sent = body.as_object().unwrap();
    assert_eq!(sent["last_name"], "Lovelace");
    assert!(sent.contains_key("request_id"));
    assert!(!sent.contains_key("email"));
    assert!(!sent.contains_key("first_name"));
    assert_eq!(sent.len(), 2);

    assert!(!customer.is_dirty());
    assert_eq!(customer.get_str("updated_at"), Some("2024-01-01T00:00:00+0000"));
}

#[tokio::test]
async fn test_save_without_changes_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut intent = PaymentIntent::from_value(json!({"id": "int_1", "amount": 5}));
    intent.save(&client, None).await.unwrap();

    assert_eq!(intent.get("amount").unwrap(), &json!(5));
}

#[tokio::test]
async fn test_save_without_id_is_unknown_attribute() {
    let (_server, client) = setup().await;

    let mut intent = PaymentIntent::from_value(json!({"amount": 5}));
    intent.set("amount", 6);

    let error = intent.save(&client, None).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownAttribute);
}

#[tokio::test]
async fn test_class_level_update_puts_params() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/pa/payment_intents/int_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "int_1",
            "descriptor": "ACME"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let intent = PaymentIntent::update(&client, "int_1", json!({"descriptor": "ACME"}), None)
        .await
        .unwrap();

    assert_eq!(intent.get_str("descriptor"), Some("ACME"));
}

#[tokio::test]
async fn test_delete_sends_delete() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/beneficiaries/ben_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    Beneficiary::delete(&client, "ben_1", None).await.unwrap();
}

#[tokio::test]
async fn test_refresh_reloads_and_discards_local_changes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transfers/tr_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tr_1",
            "status": "SETTLED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut transfer = Transfer::from_value(json!({"id": "tr_1", "status": "NEW"}));
    transfer.set("reference", "local");
    transfer.refresh(&client).await.unwrap();

    assert_eq!(transfer.get_str("status"), Some("SETTLED"));
    assert!(!transfer.has("reference"));
    assert!(!transfer.is_dirty());
}

// ============================================================================
// Resource actions
// ============================================================================

#[tokio::test]
async fn test_payment_intent_confirm_posts_action_and_loads_result() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/pa/payment_intents/int_1/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "int_1",
            "status": "SUCCEEDED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut intent = PaymentIntent::from_value(json!({
        "id": "int_1",
        "status": "REQUIRES_PAYMENT_METHOD"
    }));
    intent
        .confirm(&client, json!({"payment_method_id": "pm_1"}), None)
        .await
        .unwrap();

    assert_eq!(intent.get_str("status"), Some("SUCCEEDED"));
    let body = last_body(&server, "/api/v1/pa/payment_intents/int_1/confirm").await;
    assert_eq!(body["payment_method_id"], "pm_1");
}

#[tokio::test]
async fn test_transfer_cancel_posts_empty_body_with_request_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transfers/tr_1/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tr_1",
            "status": "CANCELLED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut transfer = Transfer::from_value(json!({"id": "tr_1"}));
    transfer.cancel(&client, None).await.unwrap();

    assert_eq!(transfer.get_str("status"), Some("CANCELLED"));
    let body = last_body(&server, "/api/v1/transfers/tr_1/cancel").await;
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_dispute_submit_evidence_posts_to_evidence() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/disputes/dsp_1/evidence"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dsp_1",
            "status": "CHALLENGED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut dispute = Dispute::from_value(json!({"id": "dsp_1"}));
    dispute
        .submit_evidence(&client, json!({"documents": ["file_1"]}), None)
        .await
        .unwrap();

    assert_eq!(dispute.get_str("status"), Some("CHALLENGED"));
}

#[tokio::test]
async fn test_customer_payment_methods_filters_by_customer() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/pa/payment_methods"))
        .and(query_param("customer_id", "cus_1"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": "pm_1"}, {"id": "pm_2"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let customer = Customer::from_value(json!({"id": "cus_1"}));
    let methods = customer
        .payment_methods(&client, Some(&params(json!({"page_size": 5}))), None)
        .await
        .unwrap();

    let ids: Vec<_> = methods.iter().filter_map(|m| m.id()).collect();
    assert_eq!(ids, vec!["pm_1", "pm_2"]);
    assert_eq!(methods.params()["customer_id"], "cus_1");
}

#[tokio::test]
async fn test_rate_retrieve_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fx/rates/current"))
        .and(query_param("buy_currency", "EUR"))
        .and(query_param("sell_currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "currency_pair": "EURUSD",
            "rate": 1.0831
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rate = Rate::retrieve(
        &client,
        Some(&params(json!({"buy_currency": "EUR", "sell_currency": "USD"}))),
        None,
    )
    .await
    .unwrap();

    assert_eq!(rate.get_f64("rate"), Some(1.0831));
    assert_eq!(Rate::PATH, "/api/v1/fx/rates/current");
}

#[tokio::test]
async fn test_rate_list_reads_items() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/fx/rates/current"))
        .and(query_param("sell_currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"currency_pair": "EURUSD", "rate": 1.0831},
                {"currency_pair": "GBPUSD", "rate": 1.2712}
            ],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rates = Rate::list(&client, Some(&params(json!({"sell_currency": "USD"}))), None)
        .await
        .unwrap();

    assert_eq!(rates.len(), 2);
    assert_eq!(rates.get(1).unwrap().get_str("currency_pair"), Some("GBPUSD"));
    assert!(rates.next_page_params().is_none());
}

#[tokio::test]
async fn test_balance_retrieve_finds_currency() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/balances/current"))
        .and(query_param("currency", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"currency": "EUR", "available_amount": 1},
            {"currency": "USD", "available_amount": 10.5, "pending_amount": 2, "reserved_amount": 0}
        ])))
        .mount(&server)
        .await;

    let balance = Balance::retrieve(&client, "usd", None).await.unwrap();

    assert_eq!(balance.get_str("currency"), Some("USD"));
    assert!((balance.total_amount() - 12.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_balance_retrieve_missing_currency_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/balances/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"currency": "EUR", "available_amount": 1}
        ])))
        .mount(&server)
        .await;

    let error = Balance::retrieve(&client, "JPY", None).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert_eq!(error.to_string(), "Balance not found for currency: JPY");
    assert_eq!(error.http_status(), None);
}
