#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scrapedeck_api::{ApiClient, CompanyRecord, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn acme() -> serde_json::Value {
    json!({
        "_id": "665f1c2ab7e2d90012aa41c7",
        "name": "Acme Corp",
        "description": "We make everything.",
        "websiteUrl": "https://acme.example",
        "email": "hello@acme.example",
        "phoneNumbers": ["+1 555 0100", "+1 555 0101"],
        "facebookUrl": "https://facebook.com/acme",
        "screenshotUrl": "https://cdn.example/shots/acme.png",
        "createdAt": "2024-11-02T09:15:00Z"
    })
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_companies() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [acme()] })))
        .mount(&server)
        .await;

    let companies = client.list_companies().await.unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id, "665f1c2ab7e2d90012aa41c7");
    assert_eq!(companies[0].name.as_deref(), Some("Acme Corp"));
    assert_eq!(companies[0].phone_numbers.len(), 2);
}

#[tokio::test]
async fn test_list_companies_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let companies = client.list_companies().await.unwrap();
    assert!(companies.is_empty());
}

// ── Get one ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_company() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/data/665f1c2ab7e2d90012aa41c7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": acme() })))
        .mount(&server)
        .await;

    let company = client.get_company("665f1c2ab7e2d90012aa41c7").await.unwrap();
    assert_eq!(company.website_url.as_deref(), Some("https://acme.example"));
}

#[tokio::test]
async fn test_get_company_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/data/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client.get_company("missing").await;

    match result {
        Err(Error::NotFound { ref id }) => assert_eq!(id, "missing"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

// ── Scrape ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scrape_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(body_json(json!({ "url": "https://acme.example" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": acme() })))
        .mount(&server)
        .await;

    let company = client.scrape("https://acme.example").await.unwrap();
    assert_eq!(
        company.screenshot_url.as_deref(),
        Some("https://cdn.example/shots/acme.png")
    );
}

#[tokio::test]
async fn test_scrape_upstream_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string("could not reach https://down.example"),
        )
        .mount(&server)
        .await;

    let result = client.scrape("https://down.example").await;

    match result {
        Err(Error::Upstream { ref message }) => {
            assert!(
                message.contains("down.example"),
                "expected target host in message, got: {message}"
            );
        }
        other => panic!("expected Upstream error, got: {other:?}"),
    }
}

// ── Save / delete ───────────────────────────────────────────────────

#[tokio::test]
async fn test_save() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/save"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let record = CompanyRecord {
        id: "665f1c2ab7e2d90012aa41c7".into(),
        name: Some("Acme Corp".into()),
        ..CompanyRecord::default()
    };
    client.save(&record).await.unwrap();
}

#[tokio::test]
async fn test_delete_sends_full_id_batch() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/delete"))
        .and(body_json(json!({ "ids": ["a1", "b2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client.delete(&["a1".into(), "b2".into()]).await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/delete"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.delete(&["a1".into()]).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── CSV export ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_download_csv() {
    let (server, client) = setup().await;

    let csv = "name,websiteUrl\nAcme Corp,https://acme.example\n";
    Mock::given(method("GET"))
        .and(path("/api/download-csv"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string(csv),
        )
        .mount(&server)
        .await;

    let bytes = client.download_csv().await.unwrap();
    assert_eq!(bytes.as_ref(), csv.as_bytes());
}

// ── Envelope errors ─────────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_envelope_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let result = client.list_companies().await;

    match result {
        Err(Error::Deserialization { ref message, .. }) => {
            assert!(message.contains("body preview"));
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
