use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use kairo_core::{harvest, OutputDocument, ProductQuery};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message shown when the registry has nothing (or could not be reached).
pub const NOT_FOUND_MESSAGE: &str =
    "No product found or unable to fetch data. Check your internet connection.";

/// Request body for a product lookup. A non-blank barcode wins over a name.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LookupRequest {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Response from a product lookup
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LookupResponse {
    /// Id to download the document with
    pub document_id: Uuid,
    pub document: OutputDocument,
}

#[utoipa::path(
    post,
    path = "/api/lookup",
    tag = "lookup",
    request_body = LookupRequest,
    responses(
        (status = 201, description = "Document built", body = LookupResponse),
        (status = 400, description = "Neither barcode nor product name given", body = ErrorResponse),
        (status = 404, description = "No product found", body = ErrorResponse)
    )
)]
pub async fn create_lookup(
    State(state): State<AppState>,
    Json(request): Json<LookupRequest>,
) -> impl IntoResponse {
    let Some(query) =
        ProductQuery::from_inputs(request.barcode.as_deref(), request.product_name.as_deref())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Enter a barcode or a product name")),
        )
            .into_response();
    };

    let Some(document) = harvest(&state.lookup, &query, state.concurrency).await else {
        tracing::info!(?query, "no product found");
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(NOT_FOUND_MESSAGE)),
        )
            .into_response();
    };

    let document_id = state.documents.insert(document.clone());

    tracing::info!(
        %document_id,
        ingredients = document.ingredients.len(),
        stored = state.documents.len(),
        "built product document"
    );

    (
        StatusCode::CREATED,
        Json(LookupResponse {
            document_id,
            document,
        }),
    )
        .into_response()
}
