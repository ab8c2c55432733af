pub mod batch;
pub mod create;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/lookup endpoints (mounted at /api/lookup)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_lookup))
        .route("/batch", post(batch::batch_lookup))
}

#[derive(OpenApi)]
#[openapi(
    paths(create::create_lookup, batch::batch_lookup),
    components(schemas(
        create::LookupRequest,
        create::LookupResponse,
        batch::BatchLookupRequest,
        batch::BatchLookupResponse
    ))
)]
pub struct ApiDoc;

/// State whose registries point at a closed local port.
#[cfg(test)]
pub(crate) fn offline_state() -> AppState {
    use crate::store::DocumentStore;
    use crate::AppContext;
    use kairo_core::{Lookup, LookupConfig, ReqwestClient};
    use std::sync::Arc;

    let unreachable = kairo_core::config::parse_base_url("test", "http://127.0.0.1:9").unwrap();
    let config = LookupConfig {
        openfoodfacts_url: unreachable.clone(),
        pubchem_url: unreachable,
        concurrency: 1,
    };
    Arc::new(AppContext {
        lookup: Lookup::new(ReqwestClient::new().unwrap(), &config),
        concurrency: 1,
        documents: DocumentStore::default(),
    })
}
