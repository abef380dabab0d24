//! In-memory reference backend for the `/api/books` resource, built on Axum.
//!
//! Used for local development of the book form and by integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

use shelf_kernel::settings::ServerSettings;

pub mod books;
pub mod error;
pub mod router;
pub mod store;

use router::RouterBuilder;
pub use store::BookStore;

/// Start the HTTP server with the given settings and an empty store
pub async fn start_server(settings: &ServerSettings) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", settings.host, settings.port))
        .await
        .context("failed to bind to address")?;

    tracing::info!(
        "books backend listening on http://{}:{}",
        settings.host,
        settings.port
    );

    let app = build_router(Arc::new(BookStore::new()), settings.request_timeout_ms);
    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}

/// Bind an ephemeral local port and serve in the background.
///
/// Returns the bound address; the server lives as long as the runtime.
pub async fn spawn_local(store: Arc<BookStore>) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind ephemeral port")?;
    let addr = listener
        .local_addr()
        .context("failed to read bound address")?;

    let app = build_router(store, 5000);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "books backend stopped");
        }
    });

    Ok(addr)
}

/// Build the main HTTP router with the books resource mounted
pub fn build_router(store: Arc<BookStore>, request_timeout_ms: u64) -> Router {
    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .mount_books(store)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .with_timeout(request_timeout_ms)
        .build()
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator for tracing
#[derive(Clone)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
