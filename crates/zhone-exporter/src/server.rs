//! HTTP exposition endpoint.
//!
//! Every request to the metrics path runs one fresh collection cycle. A
//! failed cycle answers 500 with the error text and no metrics.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use zhone_core::metrics::TEXT_FORMAT;
use zhone_core::{Collector, CoreError, encode, snapshot_samples};

use crate::config::ExporterConfig;
use crate::error::ExporterError;

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AppState {
    collector: Arc<Collector>,
    /// Value of the `instance` label: the host as the operator gave it.
    instance: Arc<str>,
    metrics_path: Arc<str>,
}

impl AppState {
    pub fn new(collector: Collector, instance: &str, metrics_path: &str) -> Self {
        Self {
            instance: Arc::from(instance.trim()),
            collector: Arc::new(collector),
            metrics_path: Arc::from(metrics_path),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let metrics_path = state.metrics_path.to_string();
    Router::new()
        .route("/", get(index))
        .route(&metrics_path, get(metrics))
        .with_state(state)
}

// ── Handlers ────────────────────────────────────────────────────────

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n\
         <head><title>Zhone Exporter</title></head>\n\
         <body>\n\
         <h1>Zhone Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         </body>\n\
         </html>\n",
        path = state.metrics_path
    ))
}

async fn metrics(State(state): State<AppState>) -> Response {
    match scrape(&state).await {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(err) => {
            error!(gateway = %state.instance, error = %err, "collection failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err}\n")).into_response()
        }
    }
}

async fn scrape(state: &AppState) -> Result<String, CoreError> {
    let snapshot = state.collector.collect().await?;
    let samples = snapshot_samples(&snapshot, &state.instance);
    debug!(samples = samples.len(), "collection finished");
    encode(&samples)
}

// ── Server ──────────────────────────────────────────────────────────

/// Bind the listen address and serve until Ctrl-C.
pub async fn serve(config: &ExporterConfig, collector: Collector) -> Result<(), ExporterError> {
    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| ExporterError::Bind {
            addr: config.listen,
            source,
        })?;
    info!(
        listen = %config.listen,
        metrics_path = %config.metrics_path,
        "serving metrics"
    );

    let app = router(AppState::new(collector, &config.host, &config.metrics_path));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ExporterError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
