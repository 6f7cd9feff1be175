use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CalendarEvent, CreateEventRequest, EventRangeQuery, UpdateStatusRequest},
    repo,
};
use crate::{auth::AuthUser, error::ApiError, extract::ValidJson, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calendar/events", get(list_events).post(create_event))
        .route("/calendar/events/:id", patch(update_status).delete(delete_event))
}

#[instrument(skip(state, body))]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<CalendarEvent>), ApiError> {
    let event = repo::insert(&state.db, user_id, &body).await?;
    info!(%user_id, event_id = %event.id, status = %event.status, "calendar event created");
    Ok((StatusCode::CREATED, Json(event)))
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<EventRangeQuery>,
) -> Result<Json<Vec<CalendarEvent>>, ApiError> {
    Ok(Json(
        repo::list_in_range(&state.db, user_id, q.from, q.to).await?,
    ))
}

#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(body): ValidJson<UpdateStatusRequest>,
) -> Result<Json<CalendarEvent>, ApiError> {
    let event = repo::update_status(&state.db, user_id, id, body.status)
        .await?
        .ok_or(ApiError::NotFound("calendar event"))?;
    info!(%user_id, event_id = %id, status = %event.status, "calendar event status updated");
    Ok(Json(event))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("calendar event"))
    }
}
