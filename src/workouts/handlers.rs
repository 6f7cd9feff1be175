use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateTemplateRequest, CreateWorkoutRequest, Pagination, Workout, WorkoutTemplate},
    repo,
};
use crate::{auth::AuthUser, error::ApiError, extract::ValidJson, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/:id", delete(delete_workout))
        .route("/workout-templates", get(list_templates).post(create_template))
        .route("/workout-templates/:id", delete(delete_template))
}

#[instrument(skip(state, body))]
pub async fn create_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let workout = repo::insert_workout(&state.db, user_id, &body).await?;
    info!(%user_id, workout_id = %workout.id, sport = %workout.sport, "workout logged");
    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let (limit, offset) = p.bounded();
    Ok(Json(
        repo::list_workouts(&state.db, user_id, limit, offset).await?,
    ))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete_workout(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("workout"))
    }
}

#[instrument(skip(state, body))]
pub async fn create_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<WorkoutTemplate>), ApiError> {
    let template = repo::insert_template(&state.db, user_id, &body).await?;
    info!(%user_id, template_id = %template.id, "workout template created");
    Ok((StatusCode::CREATED, Json(template)))
}

#[instrument(skip(state))]
pub async fn list_templates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<WorkoutTemplate>>, ApiError> {
    Ok(Json(repo::list_templates(&state.db, user_id).await?))
}

#[instrument(skip(state))]
pub async fn delete_template(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete_template(&state.db, user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("workout template"))
    }
}
