// Copyright 2026 Pagesift Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP REST API for pagesift.
//!
//! One real endpoint: `POST /api/scrape` accepts `{ url,
//! customSelectors?, dataType? }`, fetches the page, runs one extraction
//! pass, and returns the record list. CORS is wide open for POST/OPTIONS
//! so browser frontends can call it directly; the CORS layer answers
//! preflight requests with no body.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::extract::{scrape_html, ScrapeMode, SelectorHints};
use crate::fetch::PageFetcher;

/// Shared state for the REST handlers.
pub struct AppState {
    pub fetcher: PageFetcher,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            fetcher: PageFetcher::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body for `POST /api/scrape`.
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "customSelectors")]
    pub custom_selectors: SelectorHints,
    #[serde(default, rename = "dataType")]
    pub data_type: Option<String>,
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/scrape", post(handle_scrape))
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server on the given port.
pub async fn start(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    info!("REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/scrape`: validate, fetch, extract, respond.
///
/// There is no partial success: either the full record list comes back
/// with `success: true`, or a single error propagates with a non-2xx
/// status.
async fn handle_scrape(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    // A body the Json extractor rejects still gets the boundary's
    // uniform { success, error } shape.
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(json!({ "success": false, "error": rejection.body_text() })),
            );
        }
    };

    if req.url.trim().is_empty() {
        return error_response(&ScrapeError::InvalidUrl("URL is required".into()));
    }
    if url::Url::parse(&req.url).is_err() {
        return error_response(&ScrapeError::InvalidUrl(format!(
            "'{}' is not a valid URL",
            req.url
        )));
    }

    info!(url = req.url.as_str(), data_type = ?req.data_type, "scrape request");

    let html = match state.fetcher.fetch(&req.url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(url = req.url.as_str(), error = %e, "fetch failed");
            return error_response(&e);
        }
    };

    let mode = ScrapeMode::detect(req.data_type.as_deref(), &req.custom_selectors);
    let page_url = req.url.clone();
    let hints = req.custom_selectors.clone();

    // scraper's DOM types are !Send, so the whole pass runs on the
    // blocking pool and only the record list crosses back.
    let records = match tokio::task::spawn_blocking(move || {
        scrape_html(&html, &page_url, &hints, mode)
    })
    .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "extraction task panicked");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "internal extraction failure" })),
            );
        }
    };

    info!(url = req.url.as_str(), count = records.len(), "scrape complete");

    let mut body = json!({
        "success": true,
        "url": req.url,
        "totalItems": records.len(),
        "data": records,
        "scrapedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    if let Some(data_type) = req.data_type {
        body["dataType"] = Value::String(data_type);
    }
    (StatusCode::OK, Json(body))
}

fn error_response(err: &ScrapeError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "success": false, "error": err.to_string() })))
}
