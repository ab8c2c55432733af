pub mod download;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/documents endpoints (mounted at /api/documents)
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/download", get(download::download_document))
}

#[derive(OpenApi)]
#[openapi(paths(download::download_document))]
pub struct ApiDoc;
