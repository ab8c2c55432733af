mod ingredients;

pub use ingredients::import_ingredients;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/import endpoints (mounted at /api/import)
pub fn router() -> Router<AppState> {
    Router::new().route("/ingredients", post(import_ingredients))
}

#[derive(OpenApi)]
#[openapi(paths(ingredients::import_ingredients))]
pub struct ApiDoc;
