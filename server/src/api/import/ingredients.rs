use crate::api::ErrorResponse;
use axum::{body::Bytes, http::StatusCode, response::IntoResponse, Json};
use kairo_core::ImportedIngredients;

#[utoipa::path(
    post,
    path = "/api/import/ingredients",
    tag = "import",
    request_body(content = String, description = "Ingredient dataset as CSV with a header row", content_type = "text/csv"),
    responses(
        (status = 200, description = "Imported ingredients and health effects", body = ImportedIngredients),
        (status = 400, description = "Malformed dataset", body = ErrorResponse)
    )
)]
pub async fn import_ingredients(body: Bytes) -> impl IntoResponse {
    match kairo_core::import_ingredients(body.as_ref()) {
        Ok(imported) => {
            tracing::info!(
                ingredients = imported.ingredients.len(),
                health_effects = imported.health_effects.len(),
                "imported ingredient dataset"
            );
            (StatusCode::OK, Json(imported)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "rejected ingredient dataset");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Failed to import dataset: {}", e))),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_import_ok() {
        let body = Bytes::from_static(b"name,health_effects\nAspartame,condition=PKU risk\n");
        let response = import_ingredients(body).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_import_malformed_is_bad_request() {
        let body = Bytes::from_static(b"name,category\nAspartame,\xff\xfe\n");
        let response = import_ingredients(body).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
