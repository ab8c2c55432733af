use crate::api::ErrorResponse;
use crate::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use kairo_core::{to_pretty_json, OutputDocument};
use uuid::Uuid;

/// File name offered to the browser.
pub const DOWNLOAD_FILENAME: &str = "data.json";

#[utoipa::path(
    get,
    path = "/api/documents/{id}/download",
    tag = "documents",
    params(
        ("id" = Uuid, Path, description = "Document ID returned by the lookup")
    ),
    responses(
        (status = 200, description = "Document as a JSON attachment", content_type = "application/json", body = OutputDocument),
        (status = 400, description = "No document stored under this ID", body = ErrorResponse)
    )
)]
pub async fn download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let Some(document) = state.documents.get(&id) else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::new("No data"))).into_response();
    };

    let bytes = match to_pretty_json(&document) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(document_id = %id, error = %e, "failed to serialize document");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to serialize document")),
            )
                .into_response();
        }
    };

    attachment(bytes)
}

fn attachment(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        Body::from(bytes),
    )
        .into_response()
}
