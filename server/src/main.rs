mod api;
mod store;
mod telemetry;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::Router;
use kairo_core::{Lookup, LookupConfig, ReqwestClient};
use std::env;
use std::sync::Arc;
use store::DocumentStore;
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Default listen address when KAIRO_LISTEN_ADDR is not set.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Everything a request handler needs. Built once at startup.
pub struct AppContext {
    pub lookup: Lookup<ReqwestClient>,
    /// Compound lookups in flight per build.
    pub concurrency: usize,
    pub documents: DocumentStore,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/test", api::testing::router())
        .nest("/api/lookup", api::lookup::router())
        .nest("/api/documents", api::documents::router())
        .nest("/api/import", api::import::router())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::info!(
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis() as u64,
                            "request completed"
                        );
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = latency.as_millis() as u64,
                            "request failed"
                        );
                    },
                ),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to render OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let config = LookupConfig::from_env().context("Invalid lookup configuration")?;
    let client = ReqwestClient::new().context("Failed to build HTTP client")?;

    tracing::info!(
        openfoodfacts = %config.openfoodfacts_url,
        pubchem = %config.pubchem_url,
        concurrency = config.concurrency,
        "registry configuration loaded"
    );

    let state: AppState = Arc::new(AppContext {
        lookup: Lookup::new(client, &config),
        concurrency: config.concurrency,
        documents: DocumentStore::default(),
    });

    let listen_addr =
        env::var("KAIRO_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kairo_core::HttpClient;

    #[tokio::test]
    async fn test_router_serves_through_trace_layer() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(api::lookup::offline_state()))
                .await
                .unwrap();
        });

        let url =
            kairo_core::config::parse_base_url("ping", &format!("http://{}/api/test/ping", addr))
                .unwrap();
        let body = ReqwestClient::new().unwrap().get_json(&url).await.unwrap();
        assert_eq!(body["message"], "pong");
    }
}
