//! Route-level tests for the site server.
//!
//! The content API is faked with wiremock; requests go straight through the
//! router with `oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coalition_content::{ContentClient, PageLoader};
use coalition_site::{router, AppState, PreviewAuth};

// ─────────────────────── helpers ───────────────────────

fn app_for(base_url: &str, preview_auth: Option<PreviewAuth>) -> Router {
    let loader = PageLoader::new(ContentClient::new(base_url).unwrap());
    router(Arc::new(AppState::new(loader)), preview_auth)
}

fn preview_auth() -> PreviewAuth {
    PreviewAuth {
        username: "admin".into(),
        password: "preview-pass".into(),
    }
}

fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

async fn send(app: Router, uri: &str, authorization: Option<&str>) -> (StatusCode, HeaderMap, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn content_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/homepage/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organization_name": "Prairie Alliance",
            "tagline": "Grasslands forever",
            "hero_title": "Save the tallgrass",
            "campaigns_section_title": "Our Campaigns",
            "show_campaigns_section": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/content-blocks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "page_type": "homepage",
                "order": 1,
                "block_type": "text",
                "title": "Why prairies matter",
                "content": "<p>Deep roots.</p>",
                "is_visible": true
            }
        ])))
        .mount(&server)
        .await;
    server
}

async fn mount_campaigns(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/campaigns/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ─────────────────────── pages ───────────────────────

#[tokio::test]
async fn homepage_renders_live_content() {
    let server = content_api().await;
    mount_campaigns(
        &server,
        json!([{ "id": 3, "name": "burn-permits", "title": "Prescribed Burns", "summary": "Fire heals", "active": true }]),
    )
    .await;

    let (status, headers, body) = send(app_for(&server.uri(), None), "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body.contains("Save the tallgrass"));
    assert!(body.contains("Why prairies matter"));
    assert!(body.contains("href=\"/campaigns/burn-permits\""));
    assert!(!body.contains("notice"));
}

#[tokio::test]
async fn homepage_renders_when_api_is_down() {
    let (status, _, body) = send(app_for("http://127.0.0.1:1", None), "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to"));
    assert!(body.contains("Unable to load campaigns"));
    assert!(!body.contains("Failed to fetch homepage"));
}

#[tokio::test]
async fn campaigns_failure_is_inline_notice() {
    let server = content_api().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, _, body) = send(app_for(&server.uri(), None), "/campaigns", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Prairie Alliance"));
    assert!(body.contains("Failed to fetch campaigns: HTTP 500"));
}

#[tokio::test]
async fn unknown_campaign_is_404() {
    let server = content_api().await;
    mount_campaigns(&server, json!([])).await;

    let (status, _, body) = send(app_for(&server.uri(), None), "/campaigns/ghost", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No campaign found with name: ghost"));
}

#[tokio::test]
async fn campaign_without_exact_name_match_is_404() {
    let server = content_api().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/"))
        .and(query_param("name", "ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 10, "name": "clean-water", "title": "Clean Water Act", "active": true }
        ])))
        .mount(&server)
        .await;

    let (status, _, body) = send(app_for(&server.uri(), None), "/campaigns/ghost", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No campaign found with name: ghost"));
    assert!(!body.contains("Clean Water Act"));
}

#[tokio::test]
async fn campaign_detail_forwards_encoded_name() {
    let server = content_api().await;
    Mock::given(method("GET"))
        .and(path("/api/campaigns/"))
        .and(query_param("name", "test campaign with spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 8,
            "name": "test campaign with spaces",
            "title": "Spaced Campaign",
            "summary": "Room to breathe",
            "active": true
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/endorsements/"))
        .and(query_param("campaign", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (status, _, body) = send(
        app_for(&server.uri(), None),
        "/campaigns/test%20campaign%20with%20spaces",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Spaced Campaign"));
    assert!(body.contains("No endorsements yet."));

    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .any(|r| r.url.query() == Some("name=test+campaign+with+spaces")));
}

#[tokio::test]
async fn page_json_reports_loaded_state() {
    let server = content_api().await;

    let (status, _, body) = send(app_for(&server.uri(), None), "/api/pages/about", None).await;
    assert_eq!(status, StatusCode::OK);

    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["state"], "loaded");
    assert_eq!(value["data"]["page"], "content");
    assert_eq!(value["data"]["page_type"], "about");
    assert_eq!(value["data"]["site"]["organization_name"], "Prairie Alliance");

    let (status, _, body) = send(app_for(&server.uri(), None), "/api/pages/blog", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found: blog"));
}

// ─────────────────────── preview gate ───────────────────────

#[tokio::test]
async fn preview_gate_requires_credentials() {
    let server = content_api().await;
    mount_campaigns(&server, json!([])).await;

    let app = || app_for(&server.uri(), Some(preview_auth()));

    let (status, headers, _) = send(app(), "/", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        headers[header::WWW_AUTHENTICATE],
        "Basic realm=\"Coalition Builder\""
    );

    let wrong = basic("admin", "guess");
    let (status, _, _) = send(app(), "/about", Some(&wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let right = basic("admin", "preview-pass");
    let (status, _, body) = send(app(), "/", Some(&right)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Prairie Alliance"));
}

#[tokio::test]
async fn health_bypasses_preview_gate() {
    let (status, _, body) = send(
        app_for("http://127.0.0.1:1", Some(preview_auth())),
        "/health",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "ok");
}
