use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{DailySummary, MealItem, MealListQuery, MealLogRecord, SummaryQuery},
    repo,
    schema::{validate_meal_item, validate_meal_log},
    services::daily_summary,
};
use crate::{auth::AuthUser, error::ApiError, extract::ValidJson, state::AppState};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/summary", get(get_summary))
        .route("/meals/:id", get(get_meal).delete(delete_meal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/items/validate", post(check_item))
}

/// POST /meals/items/validate. Checks one ingredient line before it is added
/// to a meal; nothing is stored.
#[instrument(skip(candidate))]
pub async fn check_item(
    AuthUser(_user_id): AuthUser,
    ValidJson(candidate): ValidJson<Value>,
) -> Result<Json<MealItem>, ApiError> {
    Ok(Json(validate_meal_item(&candidate)?))
}

/// POST /meals. The body is validated as a whole before anything is stored.
#[instrument(skip(state, candidate))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(candidate): ValidJson<Value>,
) -> Result<(StatusCode, HeaderMap, Json<MealLogRecord>), ApiError> {
    let log = validate_meal_log(&candidate)?;
    let record = repo::insert(&state.db, user_id, &log).await?;
    info!(%user_id, meal_id = %record.id, meal_type = %record.log.meal_type, "meal logged");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/meals/{}", record.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(record)))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<MealListQuery>,
) -> Result<Json<Vec<MealLogRecord>>, ApiError> {
    let (limit, offset) = q.bounded();
    let meals = repo::list_by_user(&state.db, user_id, q.date.as_deref(), limit, offset).await?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<SummaryQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let meals = repo::list_for_date(&state.db, user_id, &q.date).await?;
    Ok(Json(daily_summary(&q.date, meals.iter().map(|m| &m.log))))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealLogRecord>, ApiError> {
    repo::get(&state.db, user_id, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("meal"))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if repo::delete(&state.db, user_id, id).await? {
        info!(%user_id, meal_id = %id, "meal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("meal"))
    }
}
