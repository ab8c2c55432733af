use crate::api::ErrorResponse;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use kairo_core::{harvest_batch, split_entries, BatchResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for a batch lookup.
///
/// `entries` holds one barcode or product name each. `text` is free-form
/// input (such as an uploaded file) split on newlines and commas; its
/// entries follow `entries`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BatchLookupRequest {
    #[serde(default)]
    pub entries: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BatchLookupResponse {
    pub results: Vec<BatchResult>,
}

#[utoipa::path(
    post,
    path = "/api/lookup/batch",
    tag = "lookup",
    request_body = BatchLookupRequest,
    responses(
        (status = 200, description = "One result per entry", body = BatchLookupResponse),
        (status = 400, description = "No entries given", body = ErrorResponse)
    )
)]
pub async fn batch_lookup(
    State(state): State<AppState>,
    Json(request): Json<BatchLookupRequest>,
) -> impl IntoResponse {
    let mut entries: Vec<String> = request
        .entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect();
    if let Some(text) = request.text.as_deref() {
        entries.extend(split_entries(text));
    }

    if entries.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Enter or upload at least one barcode or product name",
            )),
        )
            .into_response();
    }

    let results = harvest_batch(&state.lookup, &entries, state.concurrency).await;

    tracing::info!(
        entries = results.len(),
        found = results.iter().filter(|r| r.data.is_some()).count(),
        "batch lookup finished"
    );

    (StatusCode::OK, Json(BatchLookupResponse { results })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::lookup::offline_state;
    use kairo_core::BATCH_NOT_FOUND;

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let request = BatchLookupRequest {
            entries: vec!["  ".to_string()],
            text: Some(" ,\n".to_string()),
        };
        let response = batch_lookup(State(offline_state()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_registry_reports_each_entry() {
        let request = BatchLookupRequest {
            entries: vec!["3017620422003".to_string()],
            text: Some("nutella\n".to_string()),
        };
        let response = batch_lookup(State(offline_state()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["entry"], "3017620422003");
        assert_eq!(results[1]["entry"], "nutella");
        assert_eq!(results[1]["error"], BATCH_NOT_FOUND);
        assert!(results[1].get("data").is_none());
    }
}
