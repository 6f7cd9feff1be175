use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::{auth::AuthError, validation::ValidationErrors};

/// Error returned by every JSON handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("auth error {}: {}", .0.code, .0.message)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Auth(e) => e.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({
                "error": "validation_failed",
                "message": errors.first().map(|e| e.message.clone()),
                "fields": errors,
            }),
            ApiError::Auth(e) => {
                if status.is_server_error() {
                    error!(code = %e.code, message = %e.message, "auth provider failure");
                }
                json!({ "code": e.code, "message": e.message })
            }
            ApiError::NotFound(what) => json!({ "error": format!("{} not found", what) }),
            ApiError::Internal(e) => {
                error!(error = ?e, "internal error");
                json!({ "error": "internal error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let mut v = ValidationErrors::new();
        v.push("date", "La date est requise");
        assert_eq!(
            ApiError::from(v).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::NotFound("meal").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AuthError::email_in_use()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn validation_body_lists_every_field() {
        let mut v = ValidationErrors::new();
        v.push("items", "Ajoutez au moins un aliment");
        v.push("mealType", "Type de repas invalide");

        let res = ApiError::from(v).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["message"], "Ajoutez au moins un aliment");
        assert_eq!(body["fields"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(body["fields"][1]["path"], "mealType");
    }
}
