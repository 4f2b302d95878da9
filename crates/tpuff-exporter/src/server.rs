//! HTTP serving layer.
//!
//! Three fixed routes served straight from the cache — the handlers
//! never fetch and never block on the refresh cycle. A request arriving
//! mid-cycle gets the pre-cycle snapshot with no added latency.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::cache::CacheStore;
use crate::config::ExporterConfig;

/// Shared state for the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheStore>,
    pub config: Arc<ExporterConfig>,
}

/// Build the exporter router.
pub fn build_router(cache: Arc<CacheStore>, config: ExporterConfig) -> Router {
    let state = AppState {
        cache,
        config: Arc::new(config),
    };
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .route("/", get(index))
        .fallback(not_found)
        .with_state(state)
}

/// GET /metrics — always 200, even mid-error (stale-but-labeled).
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let entry = state.cache.metrics().await;
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        entry.rendered_text.clone(),
    )
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(rename = "lastUpdate")]
    last_update: String,
    error: Option<String>,
}

/// GET /health — outcome of the latest refresh attempt, always 200.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let entry = state.cache.metrics().await;
    Json(HealthResponse {
        status: "ok",
        last_update: entry.last_update.to_rfc3339(),
        error: entry.last_error.clone(),
    })
}

/// GET / — static status page reflecting the running configuration.
async fn index(State(state): State<AppState>) -> Html<String> {
    let config = &state.config;
    let entry = state.cache.metrics().await;
    let recall_mode = if config.include_recall {
        format!("enabled (refresh: {}s)", config.recall_interval)
    } else {
        "disabled".to_string()
    };
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Turbopuffer Prometheus Exporter</title>
  <style>
    body {{ font-family: sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }}
    h1 {{ color: #333; }}
    a {{ color: #0066cc; text-decoration: none; }}
    a:hover {{ text-decoration: underline; }}
    .info {{ background: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0; }}
    code {{ background: #eee; padding: 2px 6px; border-radius: 3px; }}
  </style>
</head>
<body>
  <h1>Turbopuffer Prometheus Exporter</h1>
  <div class="info">
    <p><strong>Status:</strong> Running</p>
    <p><strong>Last Update:</strong> {last_update}</p>
    <p><strong>Refresh Interval:</strong> {interval}s</p>
    <p><strong>Region Mode:</strong> {region_mode}</p>
    <p><strong>Recall Metrics:</strong> {recall_mode}</p>
  </div>
  <h2>Endpoints</h2>
  <ul>
    <li><a href="/metrics">/metrics</a> - Prometheus metrics endpoint</li>
    <li><a href="/health">/health</a> - Health check endpoint</li>
  </ul>
  <h2>Example Prometheus Configuration</h2>
  <pre><code>scrape_configs:
  - job_name: 'turbopuffer'
    scrape_interval: {interval}s
    static_configs:
      - targets: ['localhost:{port}']</code></pre>
</body>
</html>"#,
        last_update = entry.last_update.to_rfc3339(),
        interval = config.refresh_interval,
        region_mode = config.region_mode(),
        recall_mode = recall_mode,
        port = config.port,
    ))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
