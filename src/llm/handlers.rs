use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::client::ChatMessage;
use crate::{
    auth::AuthUser, error::ApiError, extract::ValidJson, state::AppState,
    validation::ValidationErrors,
};

const NO_MESSAGES: &str = "Ajoutez au moins un message";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub model: String,
    pub reply: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/assistant/chat", post(chat))
}

#[instrument(skip(state, body))]
pub async fn chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if body.messages.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.push("messages", NO_MESSAGES);
        return Err(errors.into());
    }

    let reply = state.llm.complete(&body.messages).await?;
    info!(%user_id, model = %state.llm.model(), "assistant replied");
    Ok(Json(ChatResponse {
        model: state.llm.model().to_string(),
        reply,
    }))
}
