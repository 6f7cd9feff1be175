use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            AuthError, AuthResponse, ConfirmResetRequest, PublicUser, RefreshRequest,
            ResetPasswordRequest, SignInRequest, SignUpRequest,
        },
        forms,
        jwt::AuthUser,
        repo_types::User,
    },
    error::ApiError,
    extract::ValidJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/refresh", post(refresh))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/reset-password/confirm", post(confirm_reset))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignUpRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = forms::validate_sign_up(&payload)?;
    let session = state.auth.sign_up(&email, &payload.password).await?;
    Ok(Json(session))
}

#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = forms::validate_sign_in(&payload)?;
    let session = state.auth.sign_in(&email, &payload.password).await?;
    Ok(Json(session))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.auth.refresh(&payload.refresh_token).await?;
    Ok(Json(session))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ResetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let email = forms::validate_reset(&payload)?;
    state.auth.reset_password(&email).await?;
    Ok(StatusCode::ACCEPTED)
}

#[instrument(skip(state, payload))]
pub async fn confirm_reset(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ConfirmResetRequest>,
) -> Result<StatusCode, ApiError> {
    forms::validate_confirm_reset(&payload)?;
    state
        .auth
        .confirm_password_reset(payload.token.trim(), &payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(AuthError::user_not_found)?;

    Ok(Json(PublicUser {
        id: user.id,
        email: user.email,
    }))
}
