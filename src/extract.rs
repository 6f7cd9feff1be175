use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::ApiError,
    validation::{ValidationErrors, REQUIRED},
};

/// JSON body whose malformed or mistyped payloads answer with the same
/// `validation_failed` body as every other constraint check.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let mut errors = ValidationErrors::new();
                errors.push("", rejection.body_text());
                ApiError::Validation(errors)
            })?;

        serde_json::from_value(value)
            .map(ValidJson)
            .map_err(|e| ApiError::Validation(shape_errors(&e)))
    }
}

/// serde reports one problem at a time; a missing field is addressed by its
/// name, anything else lands on the body itself.
fn shape_errors(err: &serde_json::Error) -> ValidationErrors {
    let text = err.to_string();
    let mut errors = ValidationErrors::new();
    match missing_field(&text) {
        Some(field) => errors.push(field, REQUIRED),
        None => errors.push("", text),
    }
    errors
}

fn missing_field(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("missing field `")?;
    rest.split('`').next().filter(|f| !f.is_empty())
}
