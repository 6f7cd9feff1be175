use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateMeasurementRequest, CreateWeighInRequest, Measurement, WeighIn};

pub async fn insert_weigh_in(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateWeighInRequest,
) -> anyhow::Result<WeighIn> {
    sqlx::query_as::<_, WeighIn>(
        r#"
        INSERT INTO weigh_ins (id, user_id, weight, date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, weight, date, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(req.weight)
    .bind(&req.date)
    .fetch_one(db)
    .await
    .context("insert weigh-in")
}

/// Dates are ISO strings, so the range filter compares them lexically.
pub async fn list_weigh_ins(
    db: &PgPool,
    user_id: Uuid,
    from: Option<&str>,
    to: Option<&str>,
) -> anyhow::Result<Vec<WeighIn>> {
    sqlx::query_as::<_, WeighIn>(
        r#"
        SELECT id, user_id, weight, date, created_at
        FROM weigh_ins
        WHERE user_id = $1
          AND ($2::TEXT IS NULL OR date >= $2)
          AND ($3::TEXT IS NULL OR date <= $3)
        ORDER BY date ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
    .context("list weigh-ins")
}

pub async fn insert_measurement(
    db: &PgPool,
    user_id: Uuid,
    req: &CreateMeasurementRequest,
) -> anyhow::Result<Measurement> {
    sqlx::query_as::<_, Measurement>(
        r#"
        INSERT INTO measurements (id, user_id, date, waist, chest, hips, arm, thigh, body_fat)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, date, waist, chest, hips, arm, thigh, body_fat, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&req.date)
    .bind(req.waist)
    .bind(req.chest)
    .bind(req.hips)
    .bind(req.arm)
    .bind(req.thigh)
    .bind(req.body_fat)
    .fetch_one(db)
    .await
    .context("insert measurement")
}

pub async fn list_measurements(
    db: &PgPool,
    user_id: Uuid,
    from: Option<&str>,
    to: Option<&str>,
) -> anyhow::Result<Vec<Measurement>> {
    sqlx::query_as::<_, Measurement>(
        r#"
        SELECT id, user_id, date, waist, chest, hips, arm, thigh, body_fat, created_at
        FROM measurements
        WHERE user_id = $1
          AND ($2::TEXT IS NULL OR date >= $2)
          AND ($3::TEXT IS NULL OR date <= $3)
        ORDER BY date ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await
    .context("list measurements")
}
