//! HTTP surface: the businesses aggregator and the website analyzer.

use crate::analyzer::WebsiteAnalyzer;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::places::{PlacesAggregator, SearchParams};
use crate::results::{BusinessPage, ScoreResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// State shared by all handlers
pub struct AppState {
    pub aggregator: PlacesAggregator,
    pub analyzer: WebsiteAnalyzer,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            aggregator: PlacesAggregator::from_config(config),
            analyzer: WebsiteAnalyzer::from_config(config),
        }
    }
}

/// Body of an analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Build the router with both endpoints and a health check
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/businesses", get(businesses))
        .route("/api/analyze-website", post(analyze_website))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn start(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    ::log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn businesses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<BusinessPage>, AppError> {
    let page = state.aggregator.search_params(&params).await?;
    Ok(Json(page))
}

async fn analyze_website(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(request) =
        body.map_err(|e| AppError::Validation(format!("Invalid request body: {}", e.body_text())))?;

    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::Validation("URL is required".to_string()))?;

    let result = state.analyzer.analyze(&url).await?;
    Ok(Json(result))
}
