use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateMeasurementRequest, CreateWeighInRequest, Measurement, RangeQuery, WeighIn},
    repo,
};
use crate::{auth::AuthUser, error::ApiError, extract::ValidJson, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/weigh-ins", get(list_weigh_ins).post(create_weigh_in))
        .route("/measurements", get(list_measurements).post(create_measurement))
}

#[instrument(skip(state, body))]
pub async fn create_weigh_in(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<CreateWeighInRequest>,
) -> Result<(StatusCode, Json<WeighIn>), ApiError> {
    let weigh_in = repo::insert_weigh_in(&state.db, user_id, &body).await?;
    info!(%user_id, weigh_in_id = %weigh_in.id, "weigh-in recorded");
    Ok((StatusCode::CREATED, Json(weigh_in)))
}

#[instrument(skip(state))]
pub async fn list_weigh_ins(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<WeighIn>>, ApiError> {
    let rows =
        repo::list_weigh_ins(&state.db, user_id, q.from.as_deref(), q.to.as_deref()).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, body))]
pub async fn create_measurement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(body): ValidJson<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<Measurement>), ApiError> {
    let m = repo::insert_measurement(&state.db, user_id, &body).await?;
    info!(%user_id, measurement_id = %m.id, "measurement recorded");
    Ok((StatusCode::CREATED, Json(m)))
}

#[instrument(skip(state))]
pub async fn list_measurements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<RangeQuery>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    let rows =
        repo::list_measurements(&state.db, user_id, q.from.as_deref(), q.to.as_deref()).await?;
    Ok(Json(rows))
}
