mod common;

use axum::http::StatusCode;
use common::{LEGACY_HTML, MODERN_HTML, app, post_json};
use legacy_leads::config::ServerConfig;
use legacy_leads::fetcher::PageFetcher;
use legacy_leads::{Category, ScoreResult, WebsiteAnalyzer};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

async fn site_serving(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn unreachable_site_scores_zero() {
    let analyzer = WebsiteAnalyzer::new(PageFetcher::new(Duration::from_secs(2)), Duration::from_secs(3));

    let result = analyzer.analyze("http://127.0.0.1:1/").await.unwrap();
    assert_eq!(result, ScoreResult::unreachable());

    // HTTPS that fails and whose HTTP twin also fails
    let result = analyzer.analyze("https://127.0.0.1:1/").await.unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.category, Category::Legacy);
    assert!(!result.is_secure);
}

#[tokio::test]
async fn error_status_counts_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = WebsiteAnalyzer::default()
        .analyze(&format!("{}/", server.uri()))
        .await
        .unwrap();
    assert_eq!(result, ScoreResult::unreachable());
}

#[tokio::test]
async fn https_failure_falls_back_to_http() {
    let server = site_serving(MODERN_HTML).await;

    // No scheme: https:// is assumed, the TLS handshake against a plain server fails
    let result = WebsiteAnalyzer::default()
        .analyze(&server.address().to_string())
        .await
        .unwrap();

    assert!(!result.is_secure);
    // 10 - 3 (http) + 2 (framework, capped)
    assert_eq!(result.score, 9);
    assert_eq!(result.category, Category::Modern);
    assert_eq!(result.insights[0], "Not using HTTPS (Security Risk)");
}

#[tokio::test]
async fn legacy_site_over_http() {
    let server = site_serving(LEGACY_HTML).await;

    let result = WebsiteAnalyzer::default()
        .analyze(&server.uri())
        .await
        .unwrap();

    assert!(result.score <= 3);
    assert_eq!(result.category, Category::Legacy);
    assert!(
        result
            .insights
            .iter()
            .any(|i| i.starts_with("Uses deprecated HTML tags"))
    );
}

#[tokio::test]
async fn redirects_are_followed() {
    let server = site_serving(MODERN_HTML).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/", server.uri())),
        )
        .mount(&server)
        .await;

    let result = WebsiteAnalyzer::default()
        .analyze(&format!("{}/old", server.uri()))
        .await
        .unwrap();
    assert_eq!(result.score, 9);
}

#[tokio::test]
async fn slow_site_is_flagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(MODERN_HTML).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let analyzer = WebsiteAnalyzer::new(PageFetcher::default(), Duration::from_millis(100));
    let result = analyzer.analyze(&server.uri()).await.unwrap();

    assert_eq!(
        result.insights.last().map(String::as_str),
        Some("Website load time is unusually slow")
    );
    assert_eq!(result.score, 8);
}

#[tokio::test]
async fn endpoint_scores_website() {
    let server = site_serving(LEGACY_HTML).await;
    let body = serde_json::json!({ "url": server.uri() }).to_string();

    let (status, value) = post_json(app(&ServerConfig::default()), "/api/analyze-website", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["category"], "Legacy");
    assert_eq!(value["isSecure"], false);
    assert!(value["insights"].as_array().is_some_and(|i| !i.is_empty()));
}

#[tokio::test]
async fn endpoint_requires_url() {
    let app = app(&ServerConfig::default());

    let (status, value) = post_json(app.clone(), "/api/analyze-website", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "URL is required");

    let (status, value) = post_json(app.clone(), "/api/analyze-website", r#"{"url": ""}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "URL is required");

    let (status, value) = post_json(app, "/api/analyze-website", "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());
}
