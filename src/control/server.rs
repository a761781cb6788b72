//! HTTP server exposing the orchestrator

use crate::config::Config;
use crate::control::messages::{CrawlRequest, ListQuery};
use crate::crawler::{CrawlReply, Orchestrator};
use crate::{CrawlerError, Result};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builds the control router around an orchestrator
pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/start", post(start))
        .route("/stop", post(stop))
        .route("/list", get(list))
        .with_state(orchestrator)
}

/// Runs the crawl service until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let orchestrator = Arc::new(Orchestrator::new(config)?);
    let listener = TcpListener::bind(&config.server.listen)
        .await
        .map_err(|source| CrawlerError::Bind {
            addr: config.server.listen.clone(),
            source,
        })?;

    serve_with_shutdown(listener, orchestrator, shutdown_signal()).await
}

/// Serves the control surface on `listener` until `shutdown` resolves
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    orchestrator: Arc<Orchestrator>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("Control server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!("Unable to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn start(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(request): Json<CrawlRequest>,
) -> Json<CrawlReply> {
    Json(orchestrator.start(&request.root))
}

async fn stop(
    State(orchestrator): State<Arc<Orchestrator>>,
    Json(request): Json<CrawlRequest>,
) -> Json<CrawlReply> {
    Json(orchestrator.stop(&request.root))
}

/// Streams report lines as newline-delimited JSON while the registry is walked
async fn list(
    State(orchestrator): State<Arc<Orchestrator>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let filter = query.root.unwrap_or_else(|| "*".to_string());
    let lines = orchestrator.list(&filter).map(|reply| {
        serde_json::to_string(&reply).map(|mut line| {
            line.push('\n');
            line
        })
    });

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
}
