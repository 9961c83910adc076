#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use legacy_leads::config::ServerConfig;
use legacy_leads::server::{self, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const MODERN_HTML: &str = r#"<!doctype html>
<html>
  <head><meta name="viewport" content="width=device-width, initial-scale=1"></head>
  <body><div id="__next"><h1>Fresh</h1></div></body>
</html>"#;

pub const LEGACY_HTML: &str = r#"<html>
  <head><title>Bob's Hardware</title></head>
  <body><center><font face="Comic Sans">Welcome!</font></center></body>
</html>"#;

/// Config pointing the places client at a mock provider
pub fn keyed_config(provider_uri: &str) -> ServerConfig {
    ServerConfig {
        places_api_key: Some("test-key".to_string()),
        places_base_url: provider_uri.to_string(),
        ..ServerConfig::default()
    }
}

pub fn app(config: &ServerConfig) -> Router {
    server::router(Arc::new(AppState::from_config(config)))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
